/// Softmax position weights over basket order.
///
/// The raw score for position `i` is just `i`, so later additions dominate
/// and the most recent item always carries the largest weight. Scores are
/// shifted by the maximum before exponentiation so long baskets cannot
/// overflow.
pub fn position_weights(len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    let max = (len - 1) as f64;
    let exps: Vec<f64> = (0..len).map(|i| (i as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
