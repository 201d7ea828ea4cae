//! Skill text tokenization and alias canonicalization.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Alias → canonical skill name.
static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        ("javascript", &["js", "javascript", "java script", "ecmascript", "es6"]),
        ("typescript", &["ts", "typescript", "type script"]),
        ("nodejs", &["node.js", "node js", "nodejs", "node"]),
        ("react", &["reactjs", "react.js", "react js", "react"]),
        ("vue", &["vue.js", "vuejs", "vue js", "vue"]),
        ("angular", &["angularjs", "angular.js", "angular"]),
        ("python", &["python", "python3", "py"]),
        ("django", &["django", "django rest framework", "drf"]),
        ("flask", &["flask"]),
        ("java", &["java", "java8", "java11", "java17"]),
        ("spring", &["spring", "spring boot", "springboot"]),
        ("csharp", &["c#", "csharp", "c sharp"]),
        ("dotnet", &[".net", "dotnet", "asp.net", ".net core"]),
        ("cpp", &["c++", "cpp"]),
        ("go", &["go", "golang"]),
        ("rust", &["rust", "rustlang"]),
        ("ruby", &["ruby"]),
        ("rails", &["rails", "ruby on rails", "ror"]),
        ("php", &["php"]),
        ("sql", &["sql"]),
        ("postgresql", &["postgresql", "postgres", "psql"]),
        ("mysql", &["mysql"]),
        ("mongodb", &["mongodb", "mongo"]),
        ("redis", &["redis"]),
        ("aws", &["aws", "amazon web services"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("azure", &["azure", "microsoft azure"]),
        ("docker", &["docker"]),
        ("kubernetes", &["kubernetes", "k8s"]),
        ("terraform", &["terraform"]),
        ("machine learning", &["machine learning", "ml"]),
        ("pytorch", &["pytorch", "torch"]),
        ("tensorflow", &["tensorflow", "tf"]),
        ("excel", &["excel", "ms excel", "microsoft excel"]),
        ("html", &["html", "html5"]),
        ("css", &["css", "css3"]),
    ];

    let mut map = HashMap::new();
    for (canonical, names) in aliases {
        for name in *names {
            map.insert(*name, *canonical);
        }
    }
    map
});

/// Canonical skills long enough to be safely spotted inside free text.
static FREE_TEXT_VOCABULARY: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    ALIAS_TO_CANONICAL
        .iter()
        .filter(|(alias, _)| alias.len() >= 3)
        .map(|(_, canonical)| *canonical)
        .collect()
});

const SKILL_DELIMITERS: &[char] = &[',', ';', '/', '|', '\n'];

/// Why a skills text could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillTextDefect {
    /// Looks like a JSON array but does not parse as one.
    MalformedArray(String),
    /// Contains control characters or decoding replacement characters.
    GarbledText,
}

impl std::fmt::Display for SkillTextDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillTextDefect::MalformedArray(reason) => {
                write!(f, "malformed skill array: {}", reason)
            }
            SkillTextDefect::GarbledText => write!(f, "skill text contains garbled characters"),
        }
    }
}

/// Normalizes one skill token to its canonical name (lower-cased, whitespace collapsed).
pub fn normalize_skill(raw: &str) -> String {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let trimmed = collapsed.trim_end_matches('.');

    ALIAS_TO_CANONICAL
        .get(trimmed)
        .map(|c| (*c).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Parses skill text strictly, reporting corruption instead of guessing.
pub fn parse_skill_text(text: &str) -> Result<BTreeSet<String>, SkillTextDefect> {
    if text
        .chars()
        .any(|c| c == '\u{FFFD}' || (c.is_control() && !matches!(c, '\n' | '\r' | '\t')))
    {
        return Err(SkillTextDefect::GarbledText);
    }

    let trimmed = text.trim();
    let tokens: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| SkillTextDefect::MalformedArray(e.to_string()))?
    } else {
        trimmed
            .split(SKILL_DELIMITERS)
            .map(str::to_string)
            .collect()
    };

    Ok(tokens
        .iter()
        .map(|t| normalize_skill(t))
        .filter(|t| !t.is_empty())
        .collect())
}

/// Best-effort parse: corrupted text yields whatever clean tokens can be salvaged.
pub fn parse_skill_text_lenient(text: &str) -> BTreeSet<String> {
    match parse_skill_text(text) {
        Ok(skills) => skills,
        Err(_) => text
            .split(|c: char| SKILL_DELIMITERS.contains(&c) || matches!(c, '[' | ']' | '"'))
            .filter(|t| !t.chars().any(|c| c == '\u{FFFD}' || c.is_control()))
            .map(normalize_skill)
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

/// Spots known skills mentioned in prose such as a job description.
pub fn skills_mentioned_in(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut found = BTreeSet::new();
    for window in 1..=2 {
        for chunk in words.windows(window) {
            let phrase = chunk.join(" ");
            if let Some(canonical) = ALIAS_TO_CANONICAL.get(phrase.as_str())
                && FREE_TEXT_VOCABULARY.contains(canonical)
                && phrase.len() >= 3
            {
                found.insert((*canonical).to_string());
            }
        }
    }
    found
}
