//! # Two-line-element derived tabular output
//!
//! Same tokenized layout as the propagator output (epoch at token 1, semi-major axis
//! at token 8) but with the altitude at token 14. The file is already reduced to
//! apogee/perigee records upstream, so **every** record from line 1 onward becomes a
//! point of the series; no window is applied.

use tracing::debug;

use super::{tokens::numeric_token, ExtremaReader, ReadOptions, TabularSchema};
use crate::{
    apsis_errors::{ApsisError, ParseRecordError},
    series::ExtremaSeries,
    time::{elapsed_hours, mjd_to_calendar},
};

/// Record layout of the TLE-derived output.
pub const ELEMENT_SET_SCHEMA: TabularSchema = TabularSchema {
    first_record: 1,
    epoch_token: 1,
    altitude_token: 14,
    semi_major_token: 8,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSetReader {
    pub schema: TabularSchema,
}

impl Default for ElementSetReader {
    fn default() -> Self {
        ElementSetReader {
            schema: ELEMENT_SET_SCHEMA,
        }
    }
}

impl ExtremaReader for ElementSetReader {
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

        let mut series = ExtremaSeries::new(options.collision_policy);
        for (line_no, line) in lines.iter().enumerate().skip(first_record) {
            let value = numeric_token(line, line_no, value_token, field)?;
            let epoch = numeric_token(line, line_no, epoch_token, "epoch")?;
            series.insert(elapsed_hours(epoch, base_epoch), value)?;
        }

        debug!(
            records = series.len(),
            base_epoch,
            start = %mjd_to_calendar(base_epoch),
            "element-set output read"
        );
        Ok(series)
    }
}
