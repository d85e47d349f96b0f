//! # Numerical propagator (OPS) tabular output
//!
//! One header line, then one record per integration step. Records are
//! whitespace-delimited with trailing commas:
//!
//! ```text
//! step, mjd, x, y, z, vx, vy, vz, sma, ecc, inc, raan, argp, ma, ..., ..., altitude
//!   0     1  2  3  4   5   6   7    8    9   10    11    12  13   14   15        16
//! ```
//!
//! The base epoch is the epoch of the first record (line 1). Apogees and perigees are
//! the records flagged by the 3-sample window over the requested column; each flagged
//! record is stamped with its **own** epoch.

use tracing::debug;

use super::{tokens::numeric_token, ExtremaReader, ReadOptions, TabularSchema};
use crate::{
    apsis_errors::{ApsisError, ParseRecordError},
    extrema::extremum_centers,
    series::ExtremaSeries,
    time::{elapsed_hours, mjd_to_calendar},
};

/// Record layout of the OPS propagator output.
pub const PROPAGATOR_SCHEMA: TabularSchema = TabularSchema {
    first_record: 1,
    epoch_token: 1,
    altitude_token: 16,
    semi_major_token: 8,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagatorReader {
    pub schema: TabularSchema,
}

impl Default for PropagatorReader {
    fn default() -> Self {
        PropagatorReader {
            schema: PROPAGATOR_SCHEMA,
        }
    }
}

impl ExtremaReader for PropagatorReader {
    fn read_extrema(
        &self,
        lines: &[&str],
        options: &ReadOptions,
    ) -> Result<ExtremaSeries, ApsisError> {
        let TabularSchema {
            first_record,
            epoch_token,
            ..
        } = self.schema;
        let value_token = self.schema.value_token(options.quantity);
        let field = options.quantity.field_name();

        if lines.len() <= first_record {
            return Err(ParseRecordError::TooFewLines {
                expected: first_record + 1,
                found: lines.len(),
            }
            .into());
        }

        let base_epoch = numeric_token(lines[first_record], first_record, epoch_token, "epoch")?;

        let samples = lines[first_record..]
            .iter()
            .enumerate()
            .map(|(k, line)| numeric_token(line, first_record + k, value_token, field))
            .collect::<Result<Vec<f64>, _>>()?;

        let mut series = ExtremaSeries::new(options.collision_policy);
        for center in extremum_centers(&samples) {
            let line_no = first_record + center;
            let epoch = numeric_token(lines[line_no], line_no, epoch_token, "epoch")?;
            series.insert(elapsed_hours(epoch, base_epoch), samples[center])?;
        }

        debug!(
            records = samples.len(),
            extrema = series.len(),
            base_epoch,
            start = %mjd_to_calendar(base_epoch),
            "propagator output scanned"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod propagator_test {
    use super::*;
    use crate::{extrema::is_extremum, quantity::Quantity};

    /// OPS-like record: 17 comma-terminated tokens, sma at 8 and altitude at 16.
    fn record(step: usize, mjd: f64, sma: f64, altitude: f64) -> String {
        let mut tokens = vec![format!("{step},"), format!("{mjd:.8},")];
        tokens.extend((2..8).map(|k| format!("{}.0,", k)));
        tokens.push(format!("{sma:.6},"));
        tokens.extend((9..16).map(|k| format!("0.{k},")));
        tokens.push(format!("{altitude:.6}"));
        tokens.join("  ")
    }

    fn file(values: &[f64]) -> Vec<String> {
        let mut lines = vec!["step, mjd, x, y, z, vx, vy, vz, sma, ...".to_string()];
        lines.extend(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| record(i, 59215.0 + i as f64 / 24.0, v, v - 6378.137)),
        );
        lines
    }

    fn read(lines: &[String], quantity: Quantity) -> Result<ExtremaSeries, ApsisError> {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        PropagatorReader::default().read_extrema(&refs, &ReadOptions::new(quantity))
    }

    #[test]
    fn test_oscillating_semi_major_axis() {
        let values = [100.0, 105.0, 95.0, 110.0, 90.0];
        let series = read(&file(&values), Quantity::SemiMajorAxis).unwrap();

        // direct application of the window over the records
        let expected: Vec<(f64, f64)> = (1..values.len() - 1)
            .filter(|&i| is_extremum(values[i - 1], values[i], values[i + 1]))
            .map(|i| (i as f64, values[i]))
            .collect();

        let got: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (p.elapsed_hours, p.value))
            .collect();
        assert_eq!(got, expected);
        assert_eq!(got, vec![(1.0, 105.0), (2.0, 95.0), (3.0, 110.0)]);
    }

    #[test]
    fn test_altitude_column() {
        let values = [7000.0, 7010.0, 7005.0, 7006.0];
        let series = read(&file(&values), Quantity::Altitude).unwrap();
        assert_eq!(series.values(), vec![round(7010.0 - 6378.137), round(7005.0 - 6378.137)]);
        assert_eq!(series.elapsed_hours(), vec![1.0, 2.0]);
    }

    fn round(v: f64) -> f64 {
        crate::time::round_output(v)
    }

    #[test]
    fn test_monotonic_series_has_no_extrema() {
        let series = read(&file(&[1.0, 2.0, 3.0, 4.0, 5.0]), Quantity::SemiMajorAxis).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_header_only_is_too_short() {
        let lines = vec!["header".to_string()];
        assert_eq!(
            read(&lines, Quantity::SemiMajorAxis),
            Err(ApsisError::MalformedRecord(ParseRecordError::TooFewLines {
                expected: 2,
                found: 1
            }))
        );
    }

    #[test]
    fn test_non_numeric_value_is_fatal() {
        let mut lines = file(&[100.0, 105.0, 95.0, 110.0, 90.0]);
        lines[4] = lines[4].replacen("110.000000,", "11O.000000,", 1);
        assert_eq!(
            read(&lines, Quantity::SemiMajorAxis),
            Err(ApsisError::MalformedRecord(ParseRecordError::InvalidNumber {
                line: 4,
                field: "semi_major_axis",
                value: "11O.000000".into()
            }))
        );
    }

    #[test]
    fn test_short_record_is_fatal() {
        let mut lines = file(&[100.0, 105.0, 95.0]);
        lines.push("3, 59215.125,".into());
        assert_eq!(
            read(&lines, Quantity::Altitude),
            Err(ApsisError::MalformedRecord(ParseRecordError::MissingField {
                line: 4,
                field: "altitude",
                index: 16
            }))
        );
    }
}
