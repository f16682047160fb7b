use std::collections::HashSet;

use catalog::ProductId;
use embedding::{EmbeddingError, EmbeddingSpace};

/// Rank candidate products for a basket vector.
///
/// Queries the space with headroom `n + |exclude| + margin` so excluded
/// hits cannot starve the list, drops every id in `exclude`, and truncates
/// to `n`. An all-zero query short-circuits to empty output: cosine
/// similarity is undefined against the zero vector, and "no basket signal"
/// must not produce arbitrary-order results.
pub fn rank(
    space: &EmbeddingSpace,
    query: &[f32],
    exclude: &HashSet<ProductId>,
    n: usize,
    margin: usize,
) -> Result<Vec<ProductId>, EmbeddingError> {
    if n == 0 || query.iter().all(|&x| x == 0.0) {
        return Ok(Vec::new());
    }
    let k = n + exclude.len() + margin;
    let mut out = Vec::with_capacity(n);
    for scored in space.nearest(query, k)? {
        if exclude.contains(&scored.id) {
            continue;
        }
        out.push(scored.id);
        if out.len() == n {
            break;
        }
    }
    Ok(out)
}
