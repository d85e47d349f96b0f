//! # Input formats: classification and record readers
//!
//! Three text formats feed the comparison plot. Each one is handled by a reader that
//! turns the raw lines of a file into an [`ExtremaSeries`]:
//!
//! | Format | Reader | Selected when the file name… | Extrema |
//! |---|---|---|---|
//! | Numerical propagator (OPS) tabular output | [`propagator::PropagatorReader`] | contains neither `GPS` nor `TLE` | 3-sample window |
//! | Two-line-element derived tabular output | [`element_set::ElementSetReader`] | contains `TLE` (and not `GPS`) | every record (pre-filtered upstream) |
//! | GPS ephemeris | [`gps_ephemeris::GpsEphemerisReader`] | contains `GPS` | 3-sample window |
//!
//! ## Record layouts
//! -----------------
//! Field positions are declared once per format ([`TabularSchema`] for the two tabular
//! formats, [`gps_ephemeris::GpsSchema`] for GPS) instead of being scattered through the
//! parsing code. Token indices are 0-based positions in the whitespace-split line.
//!
//! ## Errors
//! -----------------
//! Readers are fail-fast: the first missing or non-numeric field aborts the file with
//! [`ApsisError::MalformedRecord`]. The requested [`Quantity`] is already typed when it
//! reaches a reader, so an invalid quantity is rejected before any line is read.
//!
//! ## See also
//! ------------
//! * [`crate::extrema`] – The 3-sample window used by the propagator and GPS readers.
//! * [`crate::loader`] – Directory enumeration and dispatch by [`FileFormat::classify`].

pub mod element_set;
pub mod gps_ephemeris;
pub mod propagator;
mod tokens;

use std::fmt;

use crate::{
    apsis_errors::ApsisError,
    quantity::Quantity,
    series::{CollisionPolicy, ExtremaSeries},
};

use self::{
    element_set::ElementSetReader, gps_ephemeris::GpsEphemerisReader,
    propagator::PropagatorReader,
};

/// Per-run options forwarded to every reader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadOptions {
    pub quantity: Quantity,
    pub collision_policy: CollisionPolicy,
    /// Fail on a GPS state whose semi-major axis is non-finite or negative
    /// instead of keeping the value.
    pub reject_degenerate_orbits: bool,
}

impl ReadOptions {
    pub fn new(quantity: Quantity) -> Self {
        ReadOptions {
            quantity,
            ..Default::default()
        }
    }
}

/// A reader turning the lines of one file into its extrema series.
pub trait ExtremaReader {
    /// Parse `lines` (the whole file, header included) and return the extrema series.
    ///
    /// Arguments
    /// -----------------
    /// * `lines` – Every line of the file, without line terminators.
    /// * `options` – Requested quantity and collision handling.
    ///
    /// Return
    /// ----------
    /// * The time-ordered series of `(elapsed hours → value)` points, or the first
    ///   parse failure.
    fn read_extrema(
        &self,
        lines: &[&str],
        options: &ReadOptions,
    ) -> Result<ExtremaSeries, ApsisError>;
}

/// Field layout of the two whitespace-tokenized tabular formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularSchema {
    /// Line index of the first data record; lines before it are headers.
    pub first_record: usize,
    /// Token holding the record epoch (fractional MJD).
    pub epoch_token: usize,
    pub altitude_token: usize,
    pub semi_major_token: usize,
}

impl TabularSchema {
    /// Token index holding the requested quantity.
    pub fn value_token(&self, quantity: Quantity) -> usize {
        match quantity {
            Quantity::Altitude => self.altitude_token,
            Quantity::SemiMajorAxis => self.semi_major_token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Propagator,
    ElementSet,
    GpsEphemeris,
}

impl FileFormat {
    /// Select the format from a file name: `GPS` wins over `TLE`, anything else is
    /// propagator output.
    ///
    /// ```
    /// use apsis::formats::FileFormat;
    ///
    /// assert_eq!(FileFormat::classify("day1_GPS_2021.txt"), FileFormat::GpsEphemeris);
    /// assert_eq!(FileFormat::classify("day1_TLE_2021.txt"), FileFormat::ElementSet);
    /// assert_eq!(FileFormat::classify("day1_OPS_2021.txt"), FileFormat::Propagator);
    /// ```
    pub fn classify(file_name: &str) -> FileFormat {
        if file_name.contains("GPS") {
            FileFormat::GpsEphemeris
        } else if file_name.contains("TLE") {
            FileFormat::ElementSet
        } else {
            FileFormat::Propagator
        }
    }

    /// `true` for the formats that describe a measured (reference) orbit rather than a prediction.
    pub fn is_measured(&self) -> bool {
        matches!(self, FileFormat::GpsEphemeris)
    }

    /// Run the default reader of this format over `lines`.
    pub fn read_extrema(
        &self,
        lines: &[&str],
        options: &ReadOptions,
    ) -> Result<ExtremaSeries, ApsisError> {
        match self {
            FileFormat::Propagator => PropagatorReader::default().read_extrema(lines, options),
            FileFormat::ElementSet => ElementSetReader::default().read_extrema(lines, options),
            FileFormat::GpsEphemeris => GpsEphemerisReader::default().read_extrema(lines, options),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Propagator => "propagator",
            FileFormat::ElementSet => "element-set",
            FileFormat::GpsEphemeris => "gps-ephemeris",
        };
        f.write_str(name)
    }
}
