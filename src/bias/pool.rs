use std::collections::BTreeMap;

use crate::constants::{MAX_SCORE, NEUTRAL_SUB_SCORE};
use crate::features::{Background, EducationTier, Region};

/// Counts of (region, education) backgrounds across a candidate pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolComposition {
    counts: BTreeMap<Background, usize>,
    total: usize,
}

impl PoolComposition {
    pub fn from_backgrounds<I>(backgrounds: I) -> Self
    where
        I: IntoIterator<Item = Background>,
    {
        let mut pool = Self::default();
        for background in backgrounds {
            *pool.counts.entry(background).or_insert(0) += 1;
            pool.total += 1;
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, background: &Background) -> usize {
        self.counts.get(background).copied().unwrap_or(0)
    }

    /// `100 * (1 - share)` of this background in the pool.
    ///
    /// A fully unknown background, or an empty pool, is neutral.
    pub fn diversity_score(&self, background: &Background) -> f64 {
        let unknown = background.region == Region::Unknown
            && background.education == EducationTier::Unknown;
        if unknown || self.total == 0 {
            return NEUTRAL_SUB_SCORE;
        }
        let share = self.count(background) as f64 / self.total as f64;
        MAX_SCORE * (1.0 - share.min(1.0))
    }
}
