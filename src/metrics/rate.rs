//! Counter differencing primitives

use std::time::Duration;

/// Per-second rate of a cumulative counter
///
/// Returns 0 when either sample or the elapsed time is missing, or when the
/// elapsed time is zero. A counter that went backwards (HAProxy reload,
/// wraparound) clamps to 0 rather than producing a negative rate.
///
/// ```
/// use haproxy_collector::metrics::rate_of;
/// use std::time::Duration;
///
/// let five = Some(Duration::from_secs(5));
/// assert_eq!(rate_of(Some(150), Some(100), five), 10);
/// assert_eq!(rate_of(Some(50), Some(100), five), 0);
/// assert_eq!(rate_of(Some(150), None, five), 0);
/// ```
#[must_use]
#[inline]
pub fn rate_of(current: Option<i64>, previous: Option<i64>, elapsed: Option<Duration>) -> i64 {
    scaled_rate_of(current, previous, elapsed, 1.0)
}

/// [`rate_of`] with the difference multiplied by `scale` before dividing
#[must_use]
pub fn scaled_rate_of(
    current: Option<i64>,
    previous: Option<i64>,
    elapsed: Option<Duration>,
    scale: f64,
) -> i64 {
    let (Some(current), Some(previous), Some(elapsed)) = (current, previous, elapsed) else {
        return 0;
    };
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }

    let delta = current.saturating_sub(previous).max(0);
    ((delta as f64 * scale) / secs).round() as i64
}

/// Instantaneous ratio `numerator / denominator`
///
/// 0.0 unless both values are present and non-zero.
#[must_use]
pub fn ratio_of(numerator: Option<i64>, denominator: Option<i64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if n != 0 && d != 0 => n as f64 / d as f64,
        _ => 0.0,
    }
}
