use camino::Utf8PathBuf;
use thiserror::Error;

/// Line-level parsing errors shared by the three record readers.
///
/// Line numbers are **0-based** indices into the file, matching the way the
/// readers address header and data lines.
///
/// Variants
/// -----------------
/// * `MissingField` – The whitespace-split record has no token at `index`.
/// * `InvalidNumber` – The token (or positional slice) is not a valid number.
/// * `LineTooShort` – A positional field (`start..end` characters) lies past the end of the line.
/// * `TooFewLines` – The file is too short to hold the records the format requires.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRecordError {
    #[error("line {line}: missing field `{field}` (token {index})")]
    MissingField {
        line: usize,
        field: &'static str,
        index: usize,
    },
    #[error("line {line}: invalid number `{value}` for field `{field}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: too short for columns {start}..{end}")]
    LineTooShort {
        line: usize,
        start: usize,
        end: usize,
    },
    #[error("expected at least {expected} lines, found {found}")]
    TooFewLines { expected: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum ApsisError {
    #[error("Invalid quantity: `{0}` (expected `altitude` or `semi-major`)")]
    InvalidQuantity(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(#[from] ParseRecordError),

    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<ApsisError>,
    },

    #[error("Two extrema round to the same elapsed time: {elapsed_hours} h")]
    DuplicateElapsedTime { elapsed_hours: f64 },

    #[error("line {line}: degenerate orbit state (semi-major axis = {value} km)")]
    DegenerateOrbitState { line: usize, value: f64 },

    #[error("Unable to list input directory {path}: {source}")]
    InputDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read file {path}: {source}")]
    FileRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No input files found in {0}")]
    EmptyInputDirectory(Utf8PathBuf),

    #[error("Non UTF-8 file name in input directory: {0}")]
    NonUtf8FileName(String),

    #[error("{file}: at least 2 extrema are needed for a linear fit, found {found}")]
    InsufficientPoints { file: String, found: usize },

    #[error("{file}: linear fit is singular (all extrema share the same elapsed time)")]
    SingularFit { file: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Plot rendering failed: {0}")]
    Plot(String),
}

impl ApsisError {
    /// Attach the originating file name to an error raised while reading that file.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        ApsisError::InFile {
            file: file.into(),
            source: Box::new(self),
        }
    }
}

impl PartialEq for ApsisError {
    fn eq(&self, other: &Self) -> bool {
        use ApsisError::*;
        match (self, other) {
            (InvalidQuantity(a), InvalidQuantity(b)) => a == b,
            (MalformedRecord(a), MalformedRecord(b)) => a == b,
            (
                InFile {
                    file: fa,
                    source: sa,
                },
                InFile {
                    file: fb,
                    source: sb,
                },
            ) => fa == fb && sa == sb,
            (
                DuplicateElapsedTime { elapsed_hours: a },
                DuplicateElapsedTime { elapsed_hours: b },
            ) => a == b,
            (
                DegenerateOrbitState { line: la, value: va },
                DegenerateOrbitState { line: lb, value: vb },
            ) => la == lb && (va == vb || (va.is_nan() && vb.is_nan())),

            // io::Error is not comparable: same variant and path is enough
            (InputDirectory { path: a, .. }, InputDirectory { path: b, .. }) => a == b,
            (FileRead { path: a, .. }, FileRead { path: b, .. }) => a == b,

            (EmptyInputDirectory(a), EmptyInputDirectory(b)) => a == b,
            (NonUtf8FileName(a), NonUtf8FileName(b)) => a == b,
            (
                InsufficientPoints {
                    file: fa,
                    found: na,
                },
                InsufficientPoints {
                    file: fb,
                    found: nb,
                },
            ) => fa == fb && na == nb,
            (SingularFit { file: a }, SingularFit { file: b }) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (Plot(a), Plot(b)) => a == b,

            _ => false,
        }
    }
}
