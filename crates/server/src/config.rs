use catalog::FuzzyConfig;
use engine::RecommendConfig;
use resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub use engine::FallbackKind;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the JSON artifact bundle (catalog, vectors, popularity)
    #[serde(default = "default_artifacts_path")]
    pub artifacts_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Recommendation count when a request omits `count`
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Shortfall top-up source
    #[serde(default)]
    pub fallback_source: FallbackKind,

    /// Minimum fuzzy-match ratio for basket mentions
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f32,

    /// Candidates kept per basket mention
    #[serde(default = "default_fuzzy_max_candidates")]
    pub fuzzy_max_candidates: usize,

    /// Scan the catalog in parallel during fuzzy matching
    #[serde(default)]
    pub fuzzy_parallel: bool,

    /// Whether the ambiguity collapse heuristic is applied
    #[serde(default = "default_true")]
    pub collapse: bool,

    /// Mean pairwise name similarity above which a basket collapses
    #[serde(default = "default_collapse_threshold")]
    pub collapse_threshold: f32,

    /// Extra nearest-neighbor hits fetched to survive basket exclusion
    #[serde(default = "default_rank_margin")]
    pub rank_margin: usize,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artifacts_path: default_artifacts_path(),
            request_timeout_secs: default_request_timeout_secs(),
            default_count: default_count(),
            fallback_source: FallbackKind::default(),
            fuzzy_cutoff: default_fuzzy_cutoff(),
            fuzzy_max_candidates: default_fuzzy_max_candidates(),
            fuzzy_parallel: false,
            collapse: default_true(),
            collapse_threshold: default_collapse_threshold(),
            rank_margin: default_rank_margin(),
            log_level: default_log_level(),
            enable_cors: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("AISLE_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the engine or resolver would refuse at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.artifacts_path.trim().is_empty() {
            anyhow::bail!("artifacts_path must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        if self.default_count == 0 {
            anyhow::bail!("default_count must be greater than zero");
        }
        self.fuzzy_config().validate()?;
        self.resolver_config().validate()?;
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Fuzzy-matching knobs in the catalog crate's shape
    pub fn fuzzy_config(&self) -> FuzzyConfig {
        FuzzyConfig::default()
            .with_cutoff(self.fuzzy_cutoff)
            .with_max_candidates(self.fuzzy_max_candidates)
            .with_parallel(self.fuzzy_parallel)
    }

    /// Collapse heuristic knobs in the resolver crate's shape
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .with_collapse(self.collapse)
            .with_collapse_threshold(self.collapse_threshold)
    }

    /// Ranking knobs in the engine crate's shape
    pub fn recommend_config(&self) -> RecommendConfig {
        RecommendConfig::default().with_rank_margin(self.rank_margin)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_artifacts_path() -> String {
    "artifacts.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_count() -> usize {
    5
}

fn default_fuzzy_cutoff() -> f32 {
    0.6
}

fn default_fuzzy_max_candidates() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_collapse_threshold() -> f32 {
    0.5
}

fn default_rank_margin() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}
