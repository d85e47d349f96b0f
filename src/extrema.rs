//! # Apogee / perigee detection
//!
//! Local extrema of an altitude or semi-major-axis history are found with a
//! **three-sample sliding window**: the middle sample of `(previous, current, next)`
//! is an extremum when it equals the maximum or the minimum of the window.
//!
//! Ties count as extrema, so a plateau of equal samples flags every interior sample.
//! The rule assumes that each apogee/perigee shows up as a single-sample peak or
//! trough in an oscillating series; it misfires on flat or noisy data.

use itertools::Itertools;

/// `true` iff `current` is the maximum or the minimum of the three samples.
///
/// ```
/// use apsis::extrema::is_extremum;
///
/// assert!(!is_extremum(1.0, 2.0, 3.0));
/// assert!(is_extremum(1.0, 3.0, 2.0));
/// assert!(is_extremum(3.0, 1.0, 2.0));
/// ```
#[inline]
pub fn is_extremum(previous: f64, current: f64, next: f64) -> bool {
    let max = previous.max(current).max(next);
    let min = previous.min(current).min(next);
    current == max || current == min
}

/// Indices of the samples flagged by the three-sample window.
///
/// The first and last samples are never candidates since they lack a neighbour.
/// Indices are returned in increasing order.
pub fn extremum_centers(samples: &[f64]) -> Vec<usize> {
    samples
        .iter()
        .tuple_windows()
        .enumerate()
        .filter(|&(_, (&prev, &cur, &next))| is_extremum(prev, cur, next))
        .map(|(i, _)| i + 1)
        .collect()
}
