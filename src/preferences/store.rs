use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{LearningError, LearningResult};
use super::profile::{FactorWeights, WeightProfile};

/// On-disk JSON form of the learned profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profiles: Vec<WeightProfile>,
}

/// Per-organization weight profiles.
///
/// Readers get an `Arc` to a complete, immutable profile. [`publish`](Self::publish) swaps the
/// `Arc` under a short write lock, so a reader sees either the old or the new profile.
pub struct PreferenceStore {
    profiles: RwLock<HashMap<String, Arc<WeightProfile>>>,
    default_weights: FactorWeights,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("organizations", &self.profiles.read().len())
            .field("default_weights", &self.default_weights)
            .finish()
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            default_weights: FactorWeights::DEFAULT,
        }
    }

    /// Store whose unlearned organizations start from `weights` instead of the built-in default.
    pub fn with_default_weights(weights: FactorWeights) -> LearningResult<Self> {
        let weights = weights
            .normalized()
            .ok_or_else(|| LearningError::InvalidWeights {
                organization: "<default>".to_string(),
                reason: format!("{:?}", weights),
            })?;
        Ok(Self {
            profiles: RwLock::new(HashMap::new()),
            default_weights: weights,
        })
    }

    pub fn default_profile(&self) -> WeightProfile {
        WeightProfile::with_weights(None, self.default_weights)
    }

    /// Profile for an organization.
    ///
    /// An organization seen for the first time gets a version-0 profile seeded from the
    /// default weights; that profile is kept so later reads return the same `Arc`.
    pub fn get_profile(&self, organization_id: &str) -> Arc<WeightProfile> {
        if let Some(profile) = self.profiles.read().get(organization_id) {
            return Arc::clone(profile);
        }

        let mut profiles = self.profiles.write();
        let profile = profiles
            .entry(organization_id.to_string())
            .or_insert_with(|| {
                debug!(org_id = organization_id, "Seeding default weight profile");
                Arc::new(WeightProfile::with_weights(
                    Some(organization_id.to_string()),
                    self.default_weights,
                ))
            });
        Arc::clone(profile)
    }

    /// Learned profile for an organization, if one has been published.
    pub fn learned_profile(&self, organization_id: &str) -> Option<Arc<WeightProfile>> {
        self.profiles
            .read()
            .get(organization_id)
            .filter(|p| p.is_learned())
            .cloned()
    }

    /// Atomically replaces an organization's profile with a newer version.
    ///
    /// The new profile must carry normalized weights and a version above the current one.
    pub fn publish(&self, profile: WeightProfile) -> LearningResult<Arc<WeightProfile>> {
        let organization = profile
            .organization_id
            .clone()
            .unwrap_or_else(|| "<default>".to_string());

        if !profile.weights.is_normalized() {
            return Err(LearningError::InvalidWeights {
                organization,
                reason: format!("{:?}", profile.weights),
            });
        }

        let mut profiles = self.profiles.write();
        let current = profiles.get(&organization).map(|p| p.version).unwrap_or(0);
        if profile.version <= current {
            return Err(LearningError::StaleVersion {
                organization,
                offered: profile.version,
                current,
            });
        }

        let profile = Arc::new(profile);
        profiles.insert(organization, Arc::clone(&profile));
        Ok(profile)
    }

    /// Organizations with a profile, sorted.
    pub fn organizations(&self) -> Vec<String> {
        let mut orgs: Vec<String> = self.profiles.read().keys().cloned().collect();
        orgs.sort();
        orgs
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// Loads learned profiles from a JSON snapshot into a fresh store.
    ///
    /// Fails on a missing or unreadable file, or on any profile with invalid weights; a partly
    /// valid snapshot is never half-loaded.
    pub fn load_snapshot(path: &Path) -> LearningResult<Self> {
        if !path.exists() {
            return Err(LearningError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let snapshot: ProfileSnapshot = serde_json::from_slice(&bytes)?;

        let mut profiles = HashMap::with_capacity(snapshot.profiles.len());
        for profile in snapshot.profiles {
            let Some(organization) = profile.organization_id.clone() else {
                continue;
            };
            if !profile.weights.is_valid() {
                return Err(LearningError::InvalidWeights {
                    organization,
                    reason: format!("{:?}", profile.weights),
                });
            }
            profiles.insert(organization, Arc::new(profile));
        }

        info!(
            path = %path.display(),
            profiles = profiles.len(),
            "Loaded weight profile snapshot"
        );

        Ok(Self {
            profiles: RwLock::new(profiles),
            default_weights: FactorWeights::DEFAULT,
        })
    }

    /// Writes every learned profile to `path` as JSON, via a temp file and rename.
    pub fn save_snapshot(&self, path: &Path) -> LearningResult<usize> {
        let mut profiles: Vec<WeightProfile> = self
            .profiles
            .read()
            .values()
            .filter(|p| p.is_learned())
            .map(|p| p.as_ref().clone())
            .collect();
        profiles.sort_by(|a, b| a.organization_id.cmp(&b.organization_id));
        let count = profiles.len();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&ProfileSnapshot { profiles })?)?;
        std::fs::rename(&tmp, path)?;

        debug!(path = %path.display(), profiles = count, "Saved weight profile snapshot");
        Ok(count)
    }
}
