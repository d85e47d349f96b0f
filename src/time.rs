//! # Epochs and elapsed time
//!
//! All three input formats stamp their records with a fractional-day epoch
//! (a Modified Julian Date). The comparison plot uses a **relative** time base
//! instead: hours elapsed since the first record of each file.
//!
//! ```text
//! elapsed = round((epoch − base_epoch) · 24, 6)
//! ```
//!
//! The base epoch is fixed once per file and never recomputed.
//!
//! GPS records split their epoch in two positional fields (whole day and seconds
//! of day); [`EpochTimestamp`] keeps that pair and exposes the combined MJD.

use hifitime::Epoch;

use crate::constants::{Hours, HOURS_PER_DAY, MJD, ROUNDING_DECIMALS, SECONDS_PER_DAY};

/// Absolute epoch stored as a (whole day, fractional day) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochTimestamp {
    pub day: f64,
    pub fraction: f64,
}

impl EpochTimestamp {
    /// Epoch from a whole-day count and the seconds elapsed in that day.
    pub fn from_day_seconds(day: f64, seconds_of_day: f64) -> Self {
        EpochTimestamp {
            day,
            fraction: seconds_of_day / SECONDS_PER_DAY,
        }
    }

    /// Epoch from a single fractional-day value.
    pub fn from_mjd(mjd: MJD) -> Self {
        EpochTimestamp {
            day: mjd.trunc(),
            fraction: mjd.fract(),
        }
    }

    pub fn mjd(&self) -> MJD {
        self.day + self.fraction
    }

    /// Hours elapsed since `base`, rounded to [`ROUNDING_DECIMALS`] places.
    pub fn elapsed_hours_since(&self, base: &EpochTimestamp) -> Hours {
        elapsed_hours(self.mjd(), base.mjd())
    }
}

/// Round `value` to `decimals` decimal places.
///
/// Rounding works on the exact decimal expansion of the stored double, so a value
/// whose representation lies just below a half (`0.1234565` is stored as
/// `0.12345649999…`) rounds down. Scaling by `10^decimals` first would round the
/// already rounded product instead.
///
/// Rounding an already rounded value is a no-op.
#[inline]
pub fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Round to the precision used for every stored elapsed time and extremum value.
#[inline]
pub fn round_output(value: f64) -> f64 {
    round_to_decimals(value, ROUNDING_DECIMALS)
}

/// Hours elapsed between `base` and `epoch` (both MJD), rounded to 6 decimals.
///
/// The result is `0.0` when `epoch == base`, and negative if `epoch` precedes the base.
#[inline]
pub fn elapsed_hours(epoch: MJD, base: MJD) -> Hours {
    // `+ 0.0` folds a possible -0.0 into 0.0
    round_output((epoch - base) * HOURS_PER_DAY) + 0.0
}

/// Human readable UTC calendar date for an MJD epoch, used in log output.
pub fn mjd_to_calendar(mjd: MJD) -> String {
    Epoch::from_mjd_utc(mjd).to_string()
}
