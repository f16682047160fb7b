use tracing::debug;

use catalog::{sequence_ratio, Catalog, ProductId};

use crate::config::ResolverConfig;
use crate::error::ResolverError;

/// Outcome of resolving a basket's free-text mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBasket {
    /// Identifiers in basket order; unmatched mentions contribute nothing.
    /// Duplicates are preserved; repetition semantics belong downstream.
    pub ids: Vec<ProductId>,
    /// Set when the resolved names are near-duplicates of each other and
    /// the basket should be vectorized from its first identifier only.
    pub collapse_hint: bool,
}

impl ResolvedBasket {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Maps free-text basket mentions to product identifiers.
///
/// A pure function of catalog + config: no side effects beyond debug logs,
/// no errors from resolution itself. Unknown items are an expected, common
/// case and simply produce no identifier.
#[derive(Debug, Clone)]
pub struct Resolver {
    cfg: ResolverConfig,
}

impl Resolver {
    pub fn new(cfg: ResolverConfig) -> Result<Self, ResolverError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.cfg
    }

    /// Resolve `basket` against `catalog`, preserving mention order.
    ///
    /// Per mention: fuzzy candidates from the catalog; none means the
    /// mention is dropped (logged at debug level); otherwise the top
    /// candidate's identifier is taken via `name_to_id`, which picks the
    /// first catalog entry on duplicate names.
    pub fn resolve(&self, catalog: &Catalog, basket: &[String]) -> ResolvedBasket {
        let mut ids = Vec::with_capacity(basket.len());
        let mut names = Vec::with_capacity(basket.len());

        for mention in basket {
            let candidates = catalog.resolve_candidates(mention);
            let Some(&best) = candidates.first() else {
                debug!(mention = %mention, "no catalog match above cutoff; mention dropped");
                continue;
            };
            match catalog.name_to_id(best) {
                Ok(id) => {
                    ids.push(id);
                    names.push(best);
                }
                Err(err) => {
                    // Candidates come from the catalog itself, so this path
                    // requires a broken catalog; drop the mention and say so.
                    debug!(mention = %mention, %err, "candidate name failed id lookup");
                }
            }
        }

        let collapse_hint = self.cfg.collapse
            && names.len() >= 2
            && mean_pairwise_similarity(&names) > self.cfg.collapse_threshold;

        debug!(
            mentions = basket.len(),
            resolved = ids.len(),
            collapse_hint,
            "basket resolved"
        );

        ResolvedBasket { ids, collapse_hint }
    }
}

/// Mean similarity over all unordered name pairs; 0.0 below two names.
///
/// The ratio is symmetric, so this equals the original cross-product mean
/// with self-pairs excluded.
fn mean_pairwise_similarity(names: &[&str]) -> f32 {
    if names.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0f32;
    let mut pairs = 0usize;
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            total += sequence_ratio(names[i], names[j]);
            pairs += 1;
        }
    }
    total / pairs as f32
}
