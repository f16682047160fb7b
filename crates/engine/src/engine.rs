use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use basket::vectorize;
use catalog::{Catalog, ProductId};
use embedding::EmbeddingStore;
use resolver::Resolver;

use crate::metrics::metrics_recorder;
use crate::popularity::FallbackSource;
use crate::rank::rank;
use crate::types::{
    InsufficiencyReason, Outcome, RecommendConfig, RecommendError, RecommendRequest,
    RecommendResponse,
};

#[cfg(test)]
mod tests;

/// Message attached to every insufficient-input response.
const INSUFFICIENT_MESSAGE: &str = "no recognizable items";

/// Recommendation assembler.
///
/// Orchestrates resolve → filter → vectorize → rank over process-wide
/// catalog and store handles, then applies the exclusion and fallback
/// policy. Stateless per request; safe to share behind an `Arc`.
pub struct Recommender {
    catalog: Arc<Catalog>,
    store: Arc<EmbeddingStore>,
    resolver: Resolver,
    cfg: RecommendConfig,
    fallback: FallbackSource,
}

impl Recommender {
    /// Build an assembler over shared catalog and store handles.
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<EmbeddingStore>,
        resolver: Resolver,
        cfg: RecommendConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            resolver,
            cfg,
            fallback: FallbackSource::None,
        }
    }

    /// Configure the shortfall top-up source.
    pub fn with_fallback(mut self, fallback: FallbackSource) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Run one recommendation request end to end.
    pub fn recommend(&self, req: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        if req.basket.is_empty() {
            return Err(RecommendError::InvalidInput(
                "basket must not be empty".into(),
            ));
        }
        if req.basket.iter().all(|m| m.trim().is_empty()) {
            return Err(RecommendError::InvalidInput(
                "basket contains only blank mentions".into(),
            ));
        }
        if req.count == 0 {
            return Err(RecommendError::InvalidInput(
                "count must be greater than zero".into(),
            ));
        }

        let start = Instant::now();

        // Unknown clusters fail before any resolution work happens.
        let space = self.store.space(req.cluster)?;

        let resolved = self.resolver.resolve(&self.catalog, &req.basket);
        if resolved.is_empty() {
            return Ok(self.insufficient(req, InsufficiencyReason::NoCatalogMatch, start));
        }

        let filtered: Vec<ProductId> = resolved
            .ids
            .iter()
            .copied()
            .filter(|id| space.has(*id))
            .collect();
        if filtered.is_empty() {
            return Ok(self.insufficient(req, InsufficiencyReason::NoEmbeddingCoverage, start));
        }

        let basket_ids = if resolved.collapse_hint {
            &filtered[..1]
        } else {
            &filtered[..]
        };
        let query = vectorize(space, basket_ids)?;

        let exclude: HashSet<ProductId> = filtered.iter().copied().collect();
        let ranked = rank(space, &query, &exclude, req.count, self.cfg.rank_margin)?;

        // The ranker only knew about embedded basket items; re-filter
        // against the full resolved set so a resolved-but-unembedded
        // product can never recommend itself.
        let resolved_set: HashSet<ProductId> = resolved.ids.iter().copied().collect();
        let mut picks: Vec<ProductId> = ranked
            .into_iter()
            .filter(|id| !resolved_set.contains(id))
            .collect();

        if picks.len() < req.count {
            self.top_up(req.cluster, &resolved_set, req.count, &mut picks);
        }

        let mut recommendations = Vec::with_capacity(picks.len());
        for id in &picks {
            let name = self.catalog.id_to_name(*id).map_err(|err| {
                error!(
                    cluster = req.cluster,
                    id = id.0,
                    %err,
                    "ranked id missing from catalog"
                );
                err
            })?;
            recommendations.push(name.to_string());
        }

        let outcome = if recommendations.len() == req.count {
            Outcome::Ok
        } else {
            Outcome::OkPartial
        };

        info!(
            cluster = req.cluster,
            mentions = req.basket.len(),
            resolved = resolved.len(),
            filtered = filtered.len(),
            returned = recommendations.len(),
            outcome = ?outcome,
            "recommendation assembled"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_recommend(
                req.cluster,
                outcome,
                None,
                start.elapsed(),
                recommendations.len(),
            );
        }

        Ok(RecommendResponse {
            outcome,
            recommendations,
            message: None,
        })
    }

    fn insufficient(
        &self,
        req: &RecommendRequest,
        reason: InsufficiencyReason,
        start: Instant,
    ) -> RecommendResponse {
        info!(
            cluster = req.cluster,
            mentions = req.basket.len(),
            reason = reason.as_str(),
            "insufficient input for recommendation"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_recommend(
                req.cluster,
                Outcome::InsufficientInput,
                Some(reason),
                start.elapsed(),
                0,
            );
        }
        RecommendResponse {
            outcome: Outcome::InsufficientInput,
            recommendations: Vec::new(),
            message: Some(INSUFFICIENT_MESSAGE.to_string()),
        }
    }

    /// Top up a shortfall from the configured fallback source.
    ///
    /// Fallback shares the exclusion contract with ranking: resolved
    /// identifiers and anything already picked stay out.
    fn top_up(
        &self,
        cluster: u32,
        resolved: &HashSet<ProductId>,
        count: usize,
        picks: &mut Vec<ProductId>,
    ) {
        let FallbackSource::Popularity(table) = &self.fallback else {
            return;
        };
        let before = picks.len();
        let mut have: HashSet<ProductId> = picks.iter().copied().collect();
        for &id in table.top(cluster) {
            if picks.len() == count {
                break;
            }
            if resolved.contains(&id) || !have.insert(id) {
                continue;
            }
            picks.push(id);
        }
        if picks.len() > before {
            debug!(
                cluster,
                added = picks.len() - before,
                "popularity fallback topped up the list"
            );
        }
    }
}
