use std::collections::HashSet;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use aisle::{
    rank, AnnConfig, Catalog, EmbeddingSpace, EmbeddingStore, FuzzyConfig, Product, ProductId,
    RecommendConfig, RecommendRequest, Recommender, Resolver, ResolverConfig,
};

const DIMENSION: usize = 8;

const ADJECTIVES: &[&str] = &[
    "Organic", "Fresh", "Frozen", "Smoked", "Whole", "Sliced", "Baked", "Dried", "Sweet", "Roasted",
];

const NOUNS: &[&str] = &[
    "Milk", "Bread", "Eggs", "Cheese", "Yogurt", "Butter", "Apples", "Coffee", "Tea", "Chicken",
    "Rice", "Pasta", "Beans", "Salmon", "Honey", "Oats", "Juice", "Cereal", "Jam", "Tomatoes",
];

/// Grocery-style name for a synthetic product id. Names repeat past
/// 200 ids, which is realistic for large catalogs and exercises the
/// resolver's tie handling.
fn product_name(id: u64) -> String {
    let adjective = ADJECTIVES[(id as usize / NOUNS.len()) % ADJECTIVES.len()];
    let noun = NOUNS[id as usize % NOUNS.len()];
    format!("{adjective} {noun}")
}

/// Deterministic pseudo-vector so runs are comparable across machines.
fn vector_for(id: u64, dimension: usize) -> Vec<f32> {
    (0..dimension as u64)
        .map(|d| {
            let h = id.wrapping_mul(31).wrapping_add(d).wrapping_mul(2_654_435_761);
            (h % 1000) as f32 / 1000.0 + 0.001
        })
        .collect()
}

/// Setup a recommender over `product_count` synthetic products, all
/// vectorized into cluster 1.
fn setup_recommender(product_count: usize, ann: AnnConfig) -> Recommender {
    let products: Vec<Product> = (1..=product_count as u64)
        .map(|id| Product::new(id, product_name(id)))
        .collect();
    let catalog = Catalog::new(products, FuzzyConfig::default()).expect("catalog should build");

    let mut space = EmbeddingSpace::new(DIMENSION);
    for id in 1..=product_count as u64 {
        space
            .insert(ProductId(id), vector_for(id, DIMENSION))
            .expect("insert should succeed");
    }
    space.build_ann(ann);

    let mut store = EmbeddingStore::new();
    store.insert_space(1, space).expect("insert_space should succeed");

    let resolver = Resolver::new(ResolverConfig::default()).expect("resolver config is valid");
    Recommender::new(Arc::new(catalog), Arc::new(store), resolver, RecommendConfig::default())
}

/// Two mentions that exist at every benchmarked catalog size.
fn exact_basket() -> Vec<String> {
    vec!["fresh milk".to_string(), "organic eggs".to_string()]
}

/// Benchmark the full recommend call at different catalog sizes
fn bench_recommend_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_scale");

    for &size in [100, 1000, 10000].iter() {
        let engine = setup_recommender(size, AnnConfig::default());
        let request = RecommendRequest::new(1, exact_basket()).with_count(10);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("products_{}", size), |b| {
            b.iter(|| {
                let _ = engine
                    .recommend(black_box(&request))
                    .expect("recommend should succeed");
            });
        });
    }

    group.finish();
}

/// Benchmark exact linear scan against the HNSW graph at the same size
fn bench_ranking_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking_paths");

    let paths = [
        ("linear_scan", AnnConfig::default().with_enabled(false)),
        ("hnsw_graph", AnnConfig::default().with_min_vectors(0)),
    ];

    for (name, ann) in paths {
        let engine = setup_recommender(5000, ann);
        let request = RecommendRequest::new(1, exact_basket()).with_count(10);

        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = engine
                    .recommend(black_box(&request))
                    .expect("recommend should succeed");
            });
        });
    }

    group.finish();
}

/// Benchmark basket resolution alone at different catalog sizes
fn bench_resolve_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_scale");

    for &size in [100, 1000, 10000].iter() {
        let engine = setup_recommender(size, AnnConfig::default());
        let mentions = exact_basket();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("products_{}", size), |b| {
            b.iter(|| {
                let _ = engine.resolver().resolve(engine.catalog(), black_box(&mentions));
            });
        });
    }

    group.finish();
}

/// Benchmark resolution of clean spellings against misspelled ones
fn bench_basket_spelling(c: &mut Criterion) {
    let mut group = c.benchmark_group("basket_spelling");
    let engine = setup_recommender(1000, AnnConfig::default());

    let baskets = [
        ("exact", exact_basket()),
        (
            "misspelled",
            vec!["fersh mikl".to_string(), "orgnaic egs".to_string()],
        ),
    ];

    for (name, mentions) in baskets {
        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = engine.resolver().resolve(engine.catalog(), black_box(&mentions));
            });
        });
    }

    group.finish();
}

/// Benchmark the raw ranking helper with different result counts
fn bench_count_limits(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_limits");

    let mut space = EmbeddingSpace::new(DIMENSION);
    for id in 1..=1000u64 {
        space
            .insert(ProductId(id), vector_for(id, DIMENSION))
            .expect("insert should succeed");
    }
    let query = vector_for(7, DIMENSION);
    let exclude: HashSet<ProductId> = [ProductId(7), ProductId(20)].into_iter().collect();

    for count in [1, 5, 10, 50].iter() {
        group.bench_function(format!("count_{}", count), |b| {
            b.iter(|| {
                let _ = rank(&space, black_box(&query), &exclude, *count, 8)
                    .expect("rank should succeed");
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_recommend_scale,
    bench_ranking_paths,
    bench_resolve_scale,
    bench_basket_spelling,
    bench_count_limits
);
criterion_main!(benches);
