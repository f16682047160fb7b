use super::*;
use std::sync::RwLock;
use std::time::Duration;

use catalog::{FuzzyConfig, Product};
use embedding::EmbeddingSpace;
use resolver::ResolverConfig;

use crate::metrics::{set_recommend_metrics, RecommendMetrics};
use crate::popularity::PopularityTable;

fn grocery_catalog() -> Arc<Catalog> {
    let products = vec![
        Product::new(1, "Milk"),
        Product::new(2, "Bread"),
        Product::new(3, "Eggs"),
        Product::new(4, "Butter"),
        // Jam and Tea have no embeddings anywhere; only popularity can
        // surface them.
        Product::new(5, "Jam"),
        Product::new(6, "Tea"),
    ];
    Arc::new(Catalog::new(products, FuzzyConfig::default()).expect("catalog"))
}

fn grocery_store() -> Arc<EmbeddingStore> {
    let mut cluster1 = EmbeddingSpace::new(2);
    cluster1.insert(ProductId(1), vec![1.0, 0.0]).expect("milk");
    cluster1.insert(ProductId(2), vec![0.0, 1.0]).expect("bread");
    cluster1.insert(ProductId(3), vec![0.1, 0.9]).expect("eggs");
    cluster1.insert(ProductId(4), vec![0.9, 0.1]).expect("butter");

    // Cluster 0 covers only part of the catalog, in a different dimension.
    let mut cluster0 = EmbeddingSpace::new(3);
    cluster0.insert(ProductId(3), vec![1.0, 0.0, 0.0]).expect("eggs");
    cluster0.insert(ProductId(4), vec![0.0, 1.0, 0.0]).expect("butter");

    let mut store = EmbeddingStore::default();
    store.insert_space(0, cluster0).expect("space 0");
    store.insert_space(1, cluster1).expect("space 1");
    Arc::new(store)
}

fn recommender() -> Recommender {
    let resolver = Resolver::new(ResolverConfig::default()).expect("resolver");
    Recommender::new(grocery_catalog(), grocery_store(), resolver, RecommendConfig::default())
}

fn basket(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn basket_of_staples_recommends_the_rest() -> Result<(), RecommendError> {
    let engine = recommender();
    let req = RecommendRequest::new(1, basket(&["Milk", "Bread"])).with_count(2);
    let resp = engine.recommend(&req)?;
    assert_eq!(resp.outcome, Outcome::Ok);
    assert_eq!(resp.recommendations, vec!["Eggs", "Butter"]);
    assert!(resp.message.is_none());
    Ok(())
}

#[test]
fn single_item_basket_recommends_its_neighbors() -> Result<(), RecommendError> {
    let engine = recommender();
    let req = RecommendRequest::new(1, basket(&["milk"])).with_count(2);
    let resp = engine.recommend(&req)?;
    assert_eq!(resp.outcome, Outcome::Ok);
    assert_eq!(resp.recommendations, vec!["Butter", "Eggs"]);
    Ok(())
}

#[test]
fn unrecognizable_basket_is_insufficient_not_an_error() -> Result<(), RecommendError> {
    let engine = recommender();
    let resp = engine.recommend(&RecommendRequest::new(1, basket(&["Quinoa"])))?;
    assert_eq!(resp.outcome, Outcome::InsufficientInput);
    assert!(resp.recommendations.is_empty());
    assert_eq!(resp.message.as_deref(), Some("no recognizable items"));
    Ok(())
}

#[test]
fn matched_but_unembedded_basket_is_insufficient() -> Result<(), RecommendError> {
    let engine = recommender();
    // Milk and Bread resolve fine but cluster 0 has no vectors for them.
    let resp = engine.recommend(&RecommendRequest::new(0, basket(&["Milk", "Bread"])))?;
    assert_eq!(resp.outcome, Outcome::InsufficientInput);
    assert!(resp.recommendations.is_empty());
    assert_eq!(resp.message.as_deref(), Some("no recognizable items"));
    Ok(())
}

#[test]
fn unknown_cluster_is_a_request_error() {
    let engine = recommender();
    let err = engine
        .recommend(&RecommendRequest::new(99, basket(&["Milk"])))
        .unwrap_err();
    assert_eq!(err, RecommendError::UnknownCluster { cluster: 99, configured: 2 });
}

#[test]
fn shortfall_is_partial_and_still_excludes_the_basket() -> Result<(), RecommendError> {
    let engine = recommender();
    let req = RecommendRequest::new(1, basket(&["Milk", "Bread"])).with_count(4);
    let resp = engine.recommend(&req)?;
    assert_eq!(resp.outcome, Outcome::OkPartial);
    assert_eq!(resp.recommendations, vec!["Eggs", "Butter"]);
    assert!(!resp.recommendations.iter().any(|n| n == "Milk" || n == "Bread"));
    Ok(())
}

#[test]
fn identical_requests_yield_identical_responses() -> Result<(), RecommendError> {
    let engine = recommender();
    let req = RecommendRequest::new(1, basket(&["mikl", "bread"])).with_count(3);
    let first = engine.recommend(&req)?;
    let second = engine.recommend(&req)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn empty_basket_rejected() {
    let engine = recommender();
    let err = engine
        .recommend(&RecommendRequest::new(1, Vec::new()))
        .unwrap_err();
    match err {
        RecommendError::InvalidInput(msg) => assert!(msg.contains("basket")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_basket_rejected() {
    let engine = recommender();
    let err = engine
        .recommend(&RecommendRequest::new(1, basket(&["", "   "])))
        .unwrap_err();
    match err {
        RecommendError::InvalidInput(msg) => assert!(msg.contains("blank")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_count_rejected() {
    let engine = recommender();
    let err = engine
        .recommend(&RecommendRequest::new(1, basket(&["Milk"])).with_count(0))
        .unwrap_err();
    match err {
        RecommendError::InvalidInput(msg) => assert!(msg.contains("count")),
        other => panic!("unexpected error: {other}"),
    }
}

fn soda_fixture() -> (Arc<Catalog>, Arc<EmbeddingStore>) {
    let products = vec![
        Product::new(1, "Soda"),
        Product::new(2, "Soda Can"),
        Product::new(3, "Chips"),
        Product::new(4, "Pretzels"),
    ];
    let catalog = Arc::new(Catalog::new(products, FuzzyConfig::default()).expect("catalog"));

    let mut space = EmbeddingSpace::new(2);
    space.insert(ProductId(1), vec![1.0, 0.0]).expect("soda");
    space.insert(ProductId(2), vec![0.0, 1.0]).expect("can");
    space.insert(ProductId(3), vec![0.9, 0.1]).expect("chips");
    space.insert(ProductId(4), vec![0.1, 0.9]).expect("pretzels");
    let mut store = EmbeddingStore::default();
    store.insert_space(1, space).expect("space");
    (catalog, Arc::new(store))
}

#[test]
fn collapse_hint_drives_vectorization() -> Result<(), RecommendError> {
    let (catalog, store) = soda_fixture();
    let collapsing = Recommender::new(
        catalog.clone(),
        store.clone(),
        Resolver::new(ResolverConfig::default()).expect("resolver"),
        RecommendConfig::default(),
    );
    let literal = Recommender::new(
        catalog,
        store,
        Resolver::new(ResolverConfig::default().with_collapse(false)).expect("resolver"),
        RecommendConfig::default(),
    );

    // "Soda" and "Soda Can" are near-duplicates: with the hint the basket
    // vectorizes from Soda alone, without it the recency weighting pulls
    // the query toward Soda Can. The two engines rank in opposite orders.
    let req = RecommendRequest::new(1, basket(&["soda", "soda can"])).with_count(2);
    let collapsed = collapsing.recommend(&req)?;
    assert_eq!(collapsed.recommendations, vec!["Chips", "Pretzels"]);

    let uncollapsed = literal.recommend(&req)?;
    assert_eq!(uncollapsed.recommendations, vec!["Pretzels", "Chips"]);
    Ok(())
}

#[test]
fn popularity_fallback_fills_the_shortfall() -> Result<(), RecommendError> {
    let mut table = PopularityTable::new();
    table.insert(1, vec![ProductId(1), ProductId(5), ProductId(6)]);
    let resolver = Resolver::new(ResolverConfig::default()).expect("resolver");
    let engine = Recommender::new(
        grocery_catalog(),
        grocery_store(),
        resolver,
        RecommendConfig::default(),
    )
    .with_fallback(FallbackSource::Popularity(table));

    let req = RecommendRequest::new(1, basket(&["Milk", "Bread"])).with_count(4);
    let resp = engine.recommend(&req)?;
    // Ranking yields Eggs and Butter; popularity supplies Jam and Tea but
    // must skip Milk, which the shopper already has.
    assert_eq!(resp.outcome, Outcome::Ok);
    assert_eq!(resp.recommendations, vec!["Eggs", "Butter", "Jam", "Tea"]);
    Ok(())
}

#[test]
fn exhausted_popularity_still_returns_partial() -> Result<(), RecommendError> {
    let mut table = PopularityTable::new();
    table.insert(1, vec![ProductId(1)]);
    let resolver = Resolver::new(ResolverConfig::default()).expect("resolver");
    let engine = Recommender::new(
        grocery_catalog(),
        grocery_store(),
        resolver,
        RecommendConfig::default(),
    )
    .with_fallback(FallbackSource::Popularity(table));

    let req = RecommendRequest::new(1, basket(&["Milk", "Bread"])).with_count(4);
    let resp = engine.recommend(&req)?;
    assert_eq!(resp.outcome, Outcome::OkPartial);
    assert_eq!(resp.recommendations, vec!["Eggs", "Butter"]);
    Ok(())
}

#[test]
fn fallback_never_rescues_insufficient_input() -> Result<(), RecommendError> {
    let mut table = PopularityTable::new();
    table.insert(1, vec![ProductId(5), ProductId(6)]);
    let resolver = Resolver::new(ResolverConfig::default()).expect("resolver");
    let engine = Recommender::new(
        grocery_catalog(),
        grocery_store(),
        resolver,
        RecommendConfig::default(),
    )
    .with_fallback(FallbackSource::Popularity(table));

    let resp = engine.recommend(&RecommendRequest::new(1, basket(&["Quinoa"])))?;
    assert_eq!(resp.outcome, Outcome::InsufficientInput);
    assert!(resp.recommendations.is_empty());
    Ok(())
}

struct RecordingMetrics {
    events: Arc<RwLock<Vec<(u32, Outcome, Option<InsufficiencyReason>, usize)>>>,
}

impl RecordingMetrics {
    fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn snapshot(&self) -> Vec<(u32, Outcome, Option<InsufficiencyReason>, usize)> {
        self.events.read().unwrap().clone()
    }
}

impl RecommendMetrics for RecordingMetrics {
    fn record_recommend(
        &self,
        cluster: u32,
        outcome: Outcome,
        reason: Option<InsufficiencyReason>,
        _latency: Duration,
        returned: usize,
    ) {
        self.events.write().unwrap().push((cluster, outcome, reason, returned));
    }
}

#[test]
fn metrics_distinguish_the_two_insufficiency_causes() -> Result<(), RecommendError> {
    let engine = recommender();
    let metrics = Arc::new(RecordingMetrics::new());
    set_recommend_metrics(Some(metrics.clone()));

    engine.recommend(&RecommendRequest::new(1, basket(&["Quinoa"])))?;
    engine.recommend(&RecommendRequest::new(0, basket(&["Milk"])))?;

    let events = metrics.snapshot();
    set_recommend_metrics(None);

    // Other tests may record events while the recorder is installed, so
    // assert on presence rather than exact counts.
    assert!(events.iter().any(|(_, outcome, reason, returned)| {
        *outcome == Outcome::InsufficientInput
            && *reason == Some(InsufficiencyReason::NoCatalogMatch)
            && *returned == 0
    }));
    assert!(events.iter().any(|(_, outcome, reason, _)| {
        *outcome == Outcome::InsufficientInput
            && *reason == Some(InsufficiencyReason::NoEmbeddingCoverage)
    }));
    Ok(())
}
