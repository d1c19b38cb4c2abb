//! Percentile normalization of raw metrics.

/// Rank `value` against its peers on a 0–100 scale.
///
/// Missing and non-finite peers are ignored. The result is the share of peers less than or equal
/// to `value`, so the population maximum always scores 100 and tied values share a percentile.
/// The population is expected to include `value` itself. A missing value or an empty population
/// scores 0.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "Population sizes are far below 2^52")]
pub fn percentile<I>(value: Option<f64>, population: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return 0.0;
    };

    let mut total = 0_usize;
    let mut at_or_below = 0_usize;
    for peer in population.into_iter().flatten().filter(|p| p.is_finite()) {
        total += 1;
        if peer <= value {
            at_or_below += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }

    at_or_below as f64 / total as f64 * 100.0
}
