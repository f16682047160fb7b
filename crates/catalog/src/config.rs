use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Fuzzy name-matching configuration.
///
/// Cheap to clone and serde-friendly so it can ride inside higher-level
/// configs (pipeline YAML, server env).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuzzyConfig {
    /// Minimum similarity ratio a candidate must reach, in [0.0, 1.0].
    #[serde(default = "FuzzyConfig::default_cutoff")]
    pub cutoff: f32,
    /// Maximum number of candidates returned per mention.
    #[serde(default = "FuzzyConfig::default_max_candidates")]
    pub max_candidates: usize,
    /// Scan the catalog with rayon. Pays off only on large catalogs.
    #[serde(default)]
    pub use_parallel: bool,
}

impl FuzzyConfig {
    pub(crate) fn default_cutoff() -> f32 {
        0.6
    }

    pub(crate) fn default_max_candidates() -> usize {
        3
    }

    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(CatalogError::InvalidConfig(
                "cutoff must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(CatalogError::InvalidConfig(
                "max_candidates must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            cutoff: Self::default_cutoff(),
            max_candidates: Self::default_max_candidates(),
            use_parallel: false,
        }
    }
}
