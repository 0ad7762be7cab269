//! Coarse-scan + bisection helpers shared by the event finders.

use crate::ephemeris::error::EphemerisError;

/// Two hours, in days
pub const COARSE_STEP_DAYS: f64 = 1.0 / 12.0;
/// One minute, in days
pub const PRECISION_DAYS: f64 = 1.0 / 1440.0;

/// Hard cap on halvings; a two hour bracket needs 7
const MAX_BISECTIONS: u32 = 48;

/// Shrink `[lo, hi]` until it is at most `precision` wide.
///
/// `before(t)` must hold at `lo` and fail at `hi`; the returned bracket keeps
/// that property.
pub fn bisect<F>(
    mut lo: f64,
    mut hi: f64,
    precision: f64,
    mut before: F,
) -> Result<(f64, f64), EphemerisError>
where
    F: FnMut(f64) -> Result<bool, EphemerisError>,
{
    for _ in 0..MAX_BISECTIONS {
        if hi - lo <= precision {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if before(mid)? {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok((lo, hi))
}

/// Sample instants from `start` to `end` every `step` days.
///
/// Always includes both ends; the last interval may be shorter than `step`.
pub fn sample_times(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut times = vec![start];
    if end <= start {
        return times;
    }
    let mut k = 1u32;
    loop {
        let t = start + k as f64 * step;
        if t >= end {
            break;
        }
        times.push(t);
        k += 1;
    }
    times.push(end);
    times
}
