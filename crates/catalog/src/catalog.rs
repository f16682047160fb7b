use std::collections::HashMap;

use crate::config::FuzzyConfig;
use crate::error::CatalogError;
use crate::fuzzy::NameIndex;
use crate::product::{Product, ProductId};

/// Canonical product name ↔ identifier mapping with fuzzy lookup.
///
/// Built once at startup and immutable afterwards; request handlers share it
/// behind an `Arc`. Iteration order is insertion order, which doubles as the
/// deterministic tie-break for duplicate names.
#[derive(Debug)]
pub struct Catalog {
    names: NameIndex,
    by_name: HashMap<String, usize>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from `products` in their given order.
    ///
    /// Duplicate identifiers are rejected. Duplicate display names are
    /// tolerated: the first occurrence wins `name_to_id` lookups, later
    /// occurrences remain resolvable by id.
    pub fn new(products: Vec<Product>, cfg: FuzzyConfig) -> Result<Self, CatalogError> {
        cfg.validate()?;
        let mut by_name = HashMap::with_capacity(products.len());
        let mut by_id = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if by_id.insert(product.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
            by_name.entry(product.name.clone()).or_insert(pos);
        }
        Ok(Self {
            names: NameIndex::new(products, cfg),
            by_name,
            by_id,
        })
    }

    /// Catalog names textually similar to `mention`, best first.
    ///
    /// Empty when nothing clears the configured cutoff; at most
    /// `max_candidates` entries.
    pub fn resolve_candidates(&self, mention: &str) -> Vec<&str> {
        let k = self.names.config().max_candidates;
        self.names
            .candidates(mention, k)
            .into_iter()
            .filter_map(|(pos, _)| self.names.product_at(pos).map(|p| p.name.as_str()))
            .collect()
    }

    pub fn name_to_id(&self, name: &str) -> Result<ProductId, CatalogError> {
        self.by_name
            .get(name)
            .and_then(|&pos| self.names.product_at(pos))
            .map(|p| p.id)
            .ok_or_else(|| CatalogError::NameNotFound(name.to_string()))
    }

    pub fn id_to_name(&self, id: ProductId) -> Result<&str, CatalogError> {
        self.by_id
            .get(&id)
            .and_then(|&pos| self.names.product_at(pos))
            .map(|p| p.name.as_str())
            .ok_or(CatalogError::IdNotFound(id))
    }

    pub fn contains_id(&self, id: ProductId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        self.names.products()
    }

    pub fn len(&self) -> usize {
        self.names.products().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &FuzzyConfig {
        self.names.config()
    }

    /// The underlying text-similarity index.
    pub fn name_index(&self) -> &NameIndex {
        &self.names
    }
}
