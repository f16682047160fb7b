use thiserror::Error;

/// Errors produced by resolver configuration.
///
/// Resolution itself is total: unmatched mentions are a normal outcome, not
/// an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("invalid resolver config: {0}")]
    InvalidConfig(String),
}
