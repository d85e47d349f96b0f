//! Field extraction helpers shared by the record readers.
//!
//! Two encodings coexist in the input files:
//! * **tokenized** fields: the line is split on runs of whitespace and a field is
//!   addressed by its token index; trailing commas are stripped,
//! * **positional** fields: a fixed character range of the raw line (GPS epochs).

use std::ops::Range;

use crate::apsis_errors::ParseRecordError;

/// Token `index` of the whitespace-split `line`, trailing commas removed.
pub(crate) fn token<'a>(
    line: &'a str,
    line_no: usize,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ParseRecordError> {
    line.split_whitespace()
        .nth(index)
        .map(|t| t.trim_end_matches(','))
        .ok_or(ParseRecordError::MissingField {
            line: line_no,
            field,
            index,
        })
}

/// Token `index` parsed as a number.
pub(crate) fn numeric_token(
    line: &str,
    line_no: usize,
    index: usize,
    field: &'static str,
) -> Result<f64, ParseRecordError> {
    parse_number(token(line, line_no, index, field)?, line_no, field)
}

/// `N` consecutive tokens starting at `start`, each parsed as a number.
pub(crate) fn numeric_tokens<const N: usize>(
    line: &str,
    line_no: usize,
    start: usize,
    field: &'static str,
) -> Result<[f64; N], ParseRecordError> {
    let mut tokens = line.split_whitespace().skip(start);
    let mut out = [0.0; N];
    for (k, slot) in out.iter_mut().enumerate() {
        let raw = tokens.next().ok_or(ParseRecordError::MissingField {
            line: line_no,
            field,
            index: start + k,
        })?;
        *slot = parse_number(raw.trim_end_matches(','), line_no, field)?;
    }
    Ok(out)
}

/// Characters `columns` of `line` parsed as a number.
///
/// A range running past the end of the line is truncated; only a range starting
/// past the end is an error.
pub(crate) fn positional_number(
    line: &str,
    line_no: usize,
    columns: Range<usize>,
    field: &'static str,
) -> Result<f64, ParseRecordError> {
    let end = columns.end.min(line.len());
    let raw = line
        .get(columns.start..end)
        .filter(|s| !s.is_empty())
        .ok_or(ParseRecordError::LineTooShort {
            line: line_no,
            start: columns.start,
            end: columns.end,
        })?;
    parse_number(raw.trim(), line_no, field)
}

fn parse_number(raw: &str, line_no: usize, field: &'static str) -> Result<f64, ParseRecordError> {
    raw.parse::<f64>()
        .map_err(|_| ParseRecordError::InvalidNumber {
            line: line_no,
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tokens_test {
    use super::*;

    #[test]
    fn test_token_strips_trailing_commas() {
        let line = "  12,   59215.125000,  6778.137,,";
        assert_eq!(token(line, 3, 1, "epoch"), Ok("59215.125000"));
        assert_eq!(numeric_token(line, 3, 2, "sma"), Ok(6778.137));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(
            numeric_token("1, 2, 3", 7, 16, "altitude"),
            Err(ParseRecordError::MissingField {
                line: 7,
                field: "altitude",
                index: 16
            })
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            numeric_token("1 abc 3", 0, 1, "epoch"),
            Err(ParseRecordError::InvalidNumber {
                line: 0,
                field: "epoch",
                value: "abc".into()
            })
        );
    }

    #[test]
    fn test_numeric_tokens_reads_consecutive_fields() {
        let got: [f64; 3] = numeric_tokens("a 1 2 3 4", 0, 1, "state").unwrap();
        assert_eq!(got, [1.0, 2.0, 3.0]);

        let short: Result<[f64; 6], _> = numeric_tokens("a 1 2", 2, 1, "state");
        assert_eq!(
            short,
            Err(ParseRecordError::MissingField {
                line: 2,
                field: "state",
                index: 3
            })
        );
    }

    #[test]
    fn test_positional_number() {
        let line = "59215 43200.000 6778.1";
        assert_eq!(positional_number(line, 0, 0..5, "day"), Ok(59215.0));
        assert_eq!(positional_number(line, 0, 6..15, "seconds"), Ok(43200.0));
        assert_eq!(positional_number("59215 12", 0, 6..15, "seconds"), Ok(12.0));
        assert_eq!(
            positional_number("59215", 4, 6..15, "seconds"),
            Err(ParseRecordError::LineTooShort {
                line: 4,
                start: 6,
                end: 15
            })
        );
    }
}
