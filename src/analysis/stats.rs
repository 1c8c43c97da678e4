// ---------------------------------------------------------------------------
// Guarded arithmetic shared by every aggregate
// ---------------------------------------------------------------------------

/// Sum starting from +0.0, so an empty input never yields -0.0.
pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/// `part / total`, or 0 when the total is not positive.
pub fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}

/// `sum / count`, or 0 for an empty population.
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Quantile with linear interpolation between order statistics.
///
/// rank = q·(n−1); the result interpolates between `sorted[floor(rank)]` and
/// `sorted[ceil(rank)]`. `q` is clamped to `[0, 1]`. Returns `None` when
/// `values` is empty.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
