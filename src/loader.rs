//! # Loading a directory of orbit histories
//!
//! The loader turns an input directory into a [`PlotDataset`]: one [`FileSeries`]
//! per regular file, each produced by the reader selected with
//! [`FileFormat::classify`].
//!
//! ## Enumeration
//! -----------------
//! * Operating-system bookkeeping files are skipped (see [`is_metadata_artifact`]),
//!   as are sub-directories.
//! * Entries are sorted by file name so that runs are reproducible across platforms.
//! * Files are read one at a time; each handle is closed before the next file is opened.
//!
//! ## Errors
//! -----------------
//! Loading is all-or-nothing. The first failing file aborts the run; its error is
//! wrapped in [`ApsisError::InFile`] so the message names the file as well as the line.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::{
    apsis_errors::ApsisError,
    formats::{FileFormat, ReadOptions},
    series::ExtremaSeries,
};

/// Extrema series of one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSeries {
    pub file_name: String,
    pub format: FileFormat,
    pub series: ExtremaSeries,
}

/// Ordered collection of per-file extrema series, built once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotDataset {
    files: Vec<FileSeries>,
}

impl PlotDataset {
    pub fn new(files: Vec<FileSeries>) -> Self {
        PlotDataset { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileSeries> {
        self.files.iter()
    }

    pub fn get(&self, file_name: &str) -> Option<&FileSeries> {
        self.files.iter().find(|f| f.file_name == file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.file_name.as_str())
    }

    /// Title derived from the file names, see [`plot_title`].
    pub fn title(&self) -> Option<String> {
        plot_title(self.file_names())
    }
}

impl<'a> IntoIterator for &'a PlotDataset {
    type Item = &'a FileSeries;
    type IntoIter = std::slice::Iter<'a, FileSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// `true` for file-system bookkeeping entries that never hold orbit data.
pub fn is_metadata_artifact(file_name: &str) -> bool {
    file_name.contains("DS_Store")
        || file_name.starts_with("._")
        || file_name == "Thumbs.db"
        || file_name == "desktop.ini"
}

/// Regular files of `dir` holding orbit data, sorted by name.
pub fn list_input_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ApsisError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ApsisError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ApsisError::InputDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| ApsisError::NonUtf8FileName(p.display().to_string()))?;

        let Some(name) = path.file_name() else {
            continue;
        };
        if is_metadata_artifact(name) || !path.is_file() {
            debug!(file = name, "skipping non-data entry");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Lines of `text` without trailing blank lines.
fn data_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Read one file and extract its extrema series.
pub fn load_file(path: &Utf8Path, options: &ReadOptions) -> Result<FileSeries, ApsisError> {
    let file_name = path.file_name().unwrap_or(path.as_str()).to_string();
    let format = FileFormat::classify(&file_name);

    let text = std::fs::read_to_string(path).map_err(|source| ApsisError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = data_lines(&text);

    let series = format
        .read_extrema(&lines, options)
        .map_err(|e| e.in_file(file_name.as_str()))?;

    debug!(
        file = file_name.as_str(),
        %format,
        lines = lines.len(),
        extrema = series.len(),
        collisions = series.collisions(),
        "file loaded"
    );

    Ok(FileSeries {
        file_name,
        format,
        series,
    })
}

/// Load every data file of `dir` into a [`PlotDataset`].
///
/// Arguments
/// -----------------
/// * `dir` – Input directory (injected, never derived from the working directory).
/// * `options` – Requested quantity, collision policy and degenerate-state handling.
///
/// Return
/// ----------
/// * The dataset in file-name order, or the first failure.
///   [`ApsisError::EmptyInputDirectory`] when no data file is found.
pub fn load_dataset(dir: &Utf8Path, options: &ReadOptions) -> Result<PlotDataset, ApsisError> {
    let paths = list_input_files(dir)?;
    if paths.is_empty() {
        return Err(ApsisError::EmptyInputDirectory(dir.to_path_buf()));
    }

    let files = paths
        .iter()
        .map(|path| load_file(path, options))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        dir = dir.as_str(),
        files = files.len(),
        quantity = %options.quantity,
        "dataset loaded"
    );
    Ok(PlotDataset::new(files))
}

/// Plot title from the first GPS or TLE file name of the form
/// `<any>_<any>_<period>_<day>_...`.
///
/// ```
/// use apsis::loader::plot_title;
///
/// let names = ["a_OPS_2021_032_msis.txt", "CHAMP_GPS_2021_032_conv.txt"];
/// assert_eq!(
///     plot_title(names).as_deref(),
///     Some("Simulated Orbits vs Actual, Starting Day 032 of 2021")
/// );
/// ```
pub fn plot_title<'a>(file_names: impl IntoIterator<Item = &'a str>) -> Option<String> {
    file_names
        .into_iter()
        .filter(|name| name.contains("GPS") || name.contains("TLE"))
        .find_map(|name| {
            let segments: Vec<&str> = name.split('_').collect();
            match segments.as_slice() {
                [_, _, period, day, ..] => Some(format!(
                    "Simulated Orbits vs Actual, Starting Day {day} of {period}"
                )),
                _ => None,
            }
        })
}

#[cfg(test)]
mod loader_test {
    use super::*;

    #[test]
    fn test_metadata_artifacts() {
        assert!(is_metadata_artifact(".DS_Store"));
        assert!(is_metadata_artifact("._day1_GPS_2021.txt"));
        assert!(is_metadata_artifact("Thumbs.db"));
        assert!(!is_metadata_artifact("day1_GPS_2021.txt"));
    }

    #[test]
    fn test_trailing_blank_lines_dropped() {
        assert_eq!(data_lines("a\nb\n\n  \n"), vec!["a", "b"]);
        assert_eq!(data_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(data_lines("").is_empty());
    }

    #[test]
    fn test_plot_title_uses_first_gps_or_tle_name() {
        let names = [
            "x_OPS_1999_001_a.txt",
            "x_TLE_2021_045_b.txt",
            "x_GPS_2022_100_c.txt",
        ];
        assert_eq!(
            plot_title(names).as_deref(),
            Some("Simulated Orbits vs Actual, Starting Day 045 of 2021")
        );
    }

    #[test]
    fn test_plot_title_skips_short_names() {
        assert_eq!(plot_title(["GPS.txt", "a_OPS_b_c"]), None);
        assert_eq!(
            plot_title(["GPS.txt", "c_GPS_2020_7"]).as_deref(),
            Some("Simulated Orbits vs Actual, Starting Day 7 of 2020")
        );
    }
}
