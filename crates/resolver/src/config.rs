use serde::{Deserialize, Serialize};

use crate::error::ResolverError;

/// Resolver configuration.
///
/// The collapse heuristic mirrors the trained system's behavior: when a
/// basket's resolved names are mostly paraphrases of one product, averaging
/// their vectors would over-weight that product, so the basket is collapsed
/// to its first resolved identifier instead. The 0.5 threshold is inherited
/// behavior with no stronger numeric claim behind it, hence configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfig {
    /// Whether the ambiguity collapse heuristic is applied at all.
    #[serde(default = "ResolverConfig::default_collapse")]
    pub collapse: bool,
    /// Mean pairwise name similarity above which the resolved basket is
    /// treated as single-intent, in [0.0, 1.0].
    #[serde(default = "ResolverConfig::default_collapse_threshold")]
    pub collapse_threshold: f32,
}

impl ResolverConfig {
    pub(crate) fn default_collapse() -> bool {
        true
    }

    pub(crate) fn default_collapse_threshold() -> f32 {
        0.5
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_collapse_threshold(mut self, threshold: f32) -> Self {
        self.collapse_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ResolverError> {
        if !(0.0..=1.0).contains(&self.collapse_threshold) {
            return Err(ResolverError::InvalidConfig(
                "collapse_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            collapse: Self::default_collapse(),
            collapse_threshold: Self::default_collapse_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ResolverConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.collapse);
        assert!((cfg.collapse_threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let cfg = ResolverConfig::default().with_collapse_threshold(1.2);
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            ResolverError::InvalidConfig(msg) => assert!(msg.contains("collapse_threshold")),
        }
    }
}
