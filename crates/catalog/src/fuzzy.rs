//! Ratio-based fuzzy name matching.
//!
//! The scorer is the classic Ratcliff/Obershelp measure: twice the total
//! length of all longest common matching blocks, divided by the combined
//! length of the two sequences. Scores land in [0.0, 1.0] with 1.0 for
//! identical sequences. Matching runs over folded text (see
//! [`fold`](crate::normalize::fold)) so case, width, and spacing differences
//! do not count against a candidate.

use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::FuzzyConfig;
use crate::normalize::fold;
use crate::product::Product;
use crate::similarity::{Scored, SimilarityIndex};

/// Similarity ratio between two strings after folding, in [0.0, 1.0].
///
/// Two empty strings are defined to be identical (ratio 1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = fold(a).chars().collect();
    let b: Vec<char> = fold(b).chars().collect();
    ratio_chars(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> f32 {
    let denom = a.len() + b.len();
    if denom == 0 {
        return 1.0;
    }
    2.0 * total_matched(a, b) as f32 / denom as f32
}

/// Total length of the recursively chosen longest matching blocks.
fn total_matched(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest block `a[i..i+size] == b[j..j+size]` within the given windows,
/// preferring the earliest block on equal lengths.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, &ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = match j.checked_sub(1) {
                    Some(prev) => j2len.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next_j2len.insert(j, run);
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}

#[derive(Debug)]
struct NameEntry {
    product_pos: usize,
    folded: Vec<char>,
}

/// Text-similarity index over the catalog's canonical names.
///
/// Entries are scored with [`sequence_ratio`] against a folded query; hits
/// below the configured cutoff are discarded. Ties on score are broken by
/// catalog insertion order, which is what makes duplicate-name resolution
/// deterministic.
#[derive(Debug)]
pub struct NameIndex {
    entries: Vec<NameEntry>,
    products: Vec<Product>,
    cfg: FuzzyConfig,
}

impl NameIndex {
    /// Build an index over `products` in their given (insertion) order.
    pub fn new(products: Vec<Product>, cfg: FuzzyConfig) -> Self {
        let entries = products
            .iter()
            .enumerate()
            .map(|(product_pos, p)| NameEntry {
                product_pos,
                folded: fold(&p.name).chars().collect(),
            })
            .collect();
        Self {
            entries,
            products,
            cfg,
        }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.cfg
    }

    /// All indexed products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product backing a hit returned from [`SimilarityIndex::top_k`].
    pub fn product_at(&self, pos: usize) -> Option<&Product> {
        self.products.get(pos)
    }

    /// Scored candidate positions for `mention`, best first.
    ///
    /// Returns `(catalog position, score)` pairs so callers can recover the
    /// display name without a second id lookup.
    pub fn candidates(&self, mention: &str, k: usize) -> Vec<(usize, f32)> {
        if k == 0 {
            return Vec::new();
        }
        let query: Vec<char> = fold(mention).chars().collect();
        if query.is_empty() {
            return Vec::new();
        }

        let cutoff = self.cfg.cutoff;
        let score_entry = |entry: &NameEntry| -> Option<(usize, f32)> {
            let score = ratio_chars(&query, &entry.folded);
            (score >= cutoff).then_some((entry.product_pos, score))
        };

        let mut hits: Vec<(usize, f32)> = if self.cfg.use_parallel {
            self.entries.par_iter().filter_map(score_entry).collect()
        } else {
            self.entries.iter().filter_map(score_entry).collect()
        };

        hits.sort_unstable_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        hits.truncate(k);
        hits
    }
}

impl SimilarityIndex for NameIndex {
    type Query = str;

    fn top_k(&self, query: &str, k: usize) -> Vec<Scored> {
        self.candidates(query, k)
            .into_iter()
            .map(|(pos, score)| Scored {
                id: self.products[pos].id,
                score,
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;

    #[test]
    fn ratio_known_values() {
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-6);
        assert!((sequence_ratio("milk", "milk") - 1.0).abs() < 1e-6);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn ratio_ignores_case_and_spacing() {
        assert!((sequence_ratio("Whole  Milk", "whole milk") - 1.0).abs() < 1e-6);
    }

    fn sample_index(use_parallel: bool) -> NameIndex {
        let products = vec![
            Product::new(1, "Milk"),
            Product::new(2, "Bread"),
            Product::new(3, "Breadcrumbs"),
            Product::new(4, "Eggs"),
        ];
        let cfg = FuzzyConfig::default().with_parallel(use_parallel);
        NameIndex::new(products, cfg)
    }

    #[test]
    fn candidates_ordered_by_descending_score() {
        let index = sample_index(false);
        let hits = index.candidates("bread", 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, 1); // "Bread" is the exact match
        assert_eq!(hits[1].0, 2); // "Breadcrumbs" still clears 0.6
        assert!(hits[0].1 > hits[1].1);
    }

    #[test]
    fn candidates_below_cutoff_dropped() {
        let index = sample_index(false);
        assert!(index.candidates("quinoa", 5).is_empty());
    }

    #[test]
    fn candidates_respect_k() {
        let index = sample_index(false);
        assert_eq!(index.candidates("bread", 1).len(), 1);
        assert!(index.candidates("bread", 0).is_empty());
    }

    #[test]
    fn blank_mention_yields_nothing() {
        let index = sample_index(false);
        assert!(index.candidates("   ", 3).is_empty());
    }

    #[test]
    fn parallel_scan_matches_serial_scan() {
        let serial = sample_index(false);
        let parallel = sample_index(true);
        for mention in ["bread", "mikl", "eggs", "butter"] {
            assert_eq!(
                serial.candidates(mention, 3),
                parallel.candidates(mention, 3),
                "mention {mention:?} diverged"
            );
        }
    }

    #[test]
    fn duplicate_names_tie_break_by_insertion_order() {
        let products = vec![
            Product::new(7, "Soda"),
            Product::new(3, "Soda"),
            Product::new(9, "Soda Can"),
        ];
        let index = NameIndex::new(products, FuzzyConfig::default());
        let hits = index.top_k("soda", 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, ProductId(7));
        assert_eq!(hits[1].id, ProductId(3));
        assert_eq!(hits[2].id, ProductId(9));
    }

    #[test]
    fn misspelling_clears_cutoff() {
        let index = sample_index(false);
        let hits = index.top_k("mikl", 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId(1));
        assert!(hits[0].score >= 0.6);
    }
}
