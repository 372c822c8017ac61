use crate::domain::types::KRatioScore;

/// Filter, order and truncate a set of scores.
///
/// Keeps scores with `k_ratio >= min_k_ratio` (inclusive), sorts descending
/// and returns the first `limit` entries. Ties keep input order (stable
/// sort), which makes the result deterministic for a given input sequence.
/// `total_cmp` gives non-finite scores a defined position: +inf ranks first.
pub fn rank(scores: &[KRatioScore], min_k_ratio: f64, limit: usize) -> Vec<KRatioScore> {
    let mut qualified: Vec<KRatioScore> = scores
        .iter()
        .filter(|s| s.k_ratio >= min_k_ratio)
        .cloned()
        .collect();

    qualified.sort_by(|a, b| b.k_ratio.total_cmp(&a.k_ratio));
    qualified.truncate(limit);
    qualified
}
