use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque product identifier.
///
/// Identifiers are assigned by the upstream catalog build and never reused.
/// The numeric ordering carries no domain meaning; it exists only so ranked
/// output can break score ties deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry: identifier plus canonical display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
        }
    }
}
