//! # GPS ephemeris records
//!
//! Converted GPS (CHAMP-style) ephemerides mix two encodings on every line:
//!
//! * the **epoch** is positional: characters `0..5` hold the whole MJD day and
//!   characters `6..15` the seconds of that day,
//! * the **body** is whitespace-tokenized: an Earth-centred state `x y z u v w`
//!   (km, km/s) followed by the altitude (km).
//!
//! Where the body starts depends on the line. When the first token carries the `ECI`
//! frame marker, the epoch and the marker are packed in that token and the state
//! starts at token 1; otherwise day and seconds are two tokens and the state starts at
//! token 2:
//!
//! ```text
//! 59215_00000.000ECI_POS  6778.137  0.0  0.0  0.0  7.668558  0.0  400.0
//! 59215 00060.000         6777.891 27.5  0.0 -0.031 7.668  0.0  399.7
//! ```
//!
//! The offset is resolved **per line**, so both kinds may alternate in one file.
//!
//! The semi-major axis is not stored and is derived from the state with
//! [`StateVector::semi_major_axis`]. Apogees/perigees are found with the 3-sample window
//! and stamped with the positional epoch of the flagged line.

use std::ops::Range;

use tracing::{debug, warn};

use super::{
    tokens::{numeric_token, numeric_tokens, positional_number, token},
    ExtremaReader, ReadOptions,
};
use crate::{
    apsis_errors::{ApsisError, ParseRecordError},
    extrema::extremum_centers,
    orbit_quantity::StateVector,
    quantity::Quantity,
    series::ExtremaSeries,
    time::{mjd_to_calendar, EpochTimestamp},
};

/// Field layout of a GPS ephemeris line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsSchema {
    /// Characters holding the whole MJD day.
    pub day_columns: Range<usize>,
    /// Characters holding the seconds of day.
    pub seconds_columns: Range<usize>,
    /// Substring of the first token selecting [`GpsSchema::marked_offset`].
    pub frame_marker: &'static str,
    pub marked_offset: usize,
    pub unmarked_offset: usize,
    /// Position of the altitude token relative to the start of the state.
    pub altitude_after_state: usize,
}

pub const GPS_SCHEMA: GpsSchema = GpsSchema {
    day_columns: 0..5,
    seconds_columns: 6..15,
    frame_marker: "ECI",
    marked_offset: 1,
    unmarked_offset: 2,
    altitude_after_state: 6,
};

impl GpsSchema {
    /// Token index where the state vector starts on `line`.
    pub fn field_offset(&self, line: &str, line_no: usize) -> Result<usize, ParseRecordError> {
        let first = token(line, line_no, 0, "frame_marker")?;
        Ok(if first.contains(self.frame_marker) {
            self.marked_offset
        } else {
            self.unmarked_offset
        })
    }

    /// Positional epoch of `line`.
    pub fn epoch(&self, line: &str, line_no: usize) -> Result<EpochTimestamp, ParseRecordError> {
        let day = positional_number(line, line_no, self.day_columns.clone(), "epoch_day")?;
        let seconds =
            positional_number(line, line_no, self.seconds_columns.clone(), "epoch_seconds")?;
        Ok(EpochTimestamp::from_day_seconds(day, seconds))
    }

    /// Requested quantity on `line`.
    pub fn sample(
        &self,
        line: &str,
        line_no: usize,
        quantity: Quantity,
    ) -> Result<f64, ParseRecordError> {
        let offset = self.field_offset(line, line_no)?;
        match quantity {
            Quantity::SemiMajorAxis => {
                let components: [f64; 6] = numeric_tokens(line, line_no, offset, "state_vector")?;
                Ok(StateVector::from_components(components).semi_major_axis())
            }
            Quantity::Altitude => numeric_token(
                line,
                line_no,
                offset + self.altitude_after_state,
                "altitude",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsEphemerisReader {
    pub schema: GpsSchema,
}

impl Default for GpsEphemerisReader {
    fn default() -> Self {
        GpsEphemerisReader { schema: GPS_SCHEMA }
    }
}

impl GpsEphemerisReader {
    fn checked_sample(
        &self,
        line: &str,
        line_no: usize,
        options: &ReadOptions,
    ) -> Result<f64, ApsisError> {
        let value = self.schema.sample(line, line_no, options.quantity)?;
        if options.quantity == Quantity::SemiMajorAxis && !(value.is_finite() && value > 0.0) {
            if options.reject_degenerate_orbits {
                return Err(ApsisError::DegenerateOrbitState {
                    line: line_no,
                    value,
                });
            }
            warn!(line = line_no, value, "degenerate orbit state, semi-major axis kept");
        }
        Ok(value)
    }
}

impl ExtremaReader for GpsEphemerisReader {
    fn read_extrema(
        &self,
        lines: &[&str],
        options: &ReadOptions,
    ) -> Result<ExtremaSeries, ApsisError> {
        let Some(first_line) = lines.first() else {
            return Err(ParseRecordError::TooFewLines {
                expected: 1,
                found: 0,
            }
            .into());
        };
        let base_epoch = self.schema.epoch(first_line, 0)?;

        let samples = lines
            .iter()
            .enumerate()
            .map(|(line_no, line)| self.checked_sample(line, line_no, options))
            .collect::<Result<Vec<f64>, _>>()?;

        let mut series = ExtremaSeries::new(options.collision_policy);
        for center in extremum_centers(&samples) {
            let epoch = self.schema.epoch(lines[center], center)?;
            series.insert(epoch.elapsed_hours_since(&base_epoch), samples[center])?;
        }

        debug!(
            records = samples.len(),
            extrema = series.len(),
            base_epoch = base_epoch.mjd(),
            start = %mjd_to_calendar(base_epoch.mjd()),
            "gps ephemeris scanned"
        );
        Ok(series)
    }
}
