//! YAML configuration file support for the full recommendation pipeline.
//!
//! This module lets deployments define every stage's knobs (fuzzy matching,
//! basket collapse, ranking, ANN acceleration, fallback policy) in a single
//! YAML file and load them at runtime. Each section deserializes straight
//! into the owning crate's config struct, so a section may be omitted
//! entirely or spelled out field by field; anything missing takes that
//! stage's default.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! fuzzy:
//!   cutoff: 0.6
//!   max_candidates: 3
//!   use_parallel: false
//!
//! resolver:
//!   collapse: true
//!   collapse_threshold: 0.5
//!
//! engine:
//!   rank_margin: 5
//!
//! ann:
//!   enabled: true
//!   min_vectors: 1000
//!   m: 16
//!   ef_construction: 200
//!   ef_search: 50
//!
//! fallback: popularity
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog::FuzzyConfig;
use embedding::AnnConfig;
use engine::{FallbackKind, RecommendConfig};
use resolver::ResolverConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the entire recommendation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AisleConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Fuzzy name-matching knobs for the catalog stage
    #[serde(default)]
    pub fuzzy: FuzzyConfig,

    /// Basket resolution and collapse knobs
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Ranking and assembly knobs
    #[serde(default)]
    pub engine: RecommendConfig,

    /// ANN acceleration parameters for embedding spaces
    #[serde(default)]
    pub ann: AnnConfig,

    /// Shortfall top-up policy
    #[serde(default)]
    pub fallback: FallbackKind,
}

impl AisleConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AisleConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.fuzzy
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.resolver
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        Ok(())
    }
}

impl Default for AisleConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            fuzzy: FuzzyConfig::default(),
            resolver: ResolverConfig::default(),
            engine: RecommendConfig::default(),
            ann: AnnConfig::default(),
            fallback: FallbackKind::default(),
        }
    }
}
