//! # Constants and type definitions for Apsis
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! type aliases** shared by the readers, the extrema scan and the trend fit.
//!
//! ## Overview
//!
//! - Earth gravitational parameter used by the vis-viva relation
//! - Time conversions (days ↔ hours ↔ seconds)
//! - Rounding precision applied to every stored elapsed time and extremum value
//! - Unit aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Earth gravitational parameter GM in km³/s², the value used by the orbit propagator
/// producing the simulated histories. Fixed, not configurable.
pub const GM_EARTH_KM3_S2: f64 = 398_600.441_5;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Number of decimal places kept for elapsed hours and extremum values
pub const ROUNDING_DECIMALS: usize = 6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance in kilometers
pub type Kilometer = f64;

/// Velocity in kilometers per second
pub type KilometerPerSecond = f64;

/// Modified Julian Date (fractional days)
pub type MJD = f64;

/// Elapsed time in hours
pub type Hours = f64;
