#![allow(dead_code)]

use std::fs;

use approx::assert_relative_eq;
use apsis::series::ExtremaSeries;
use camino::{Utf8Path, Utf8PathBuf};

pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Directory of the three CHAMP fixture files (day 032 of 2021).
pub fn fixture_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/plot_input_files")
}

/// Semi-major axis of record `i` in the propagator fixture.
pub fn ops_semi_major(i: usize) -> f64 {
    6790.0 + 5.0 * (-1f64).powi(i as i32) - 0.01 * i as f64
}

/// Radius of line `i` in the GPS fixture.
pub fn gps_radius(i: usize) -> f64 {
    6788.0 + 4.0 * (-1f64).powi(i as i32) - 0.02 * i as f64
}

/// Propagator record with the semi-major axis at token 8 and the altitude at token 16.
pub fn ops_record(step: usize, mjd: f64, sma: f64) -> String {
    let mut tokens = vec![format!("{step},"), format!("{mjd:.10},")];
    tokens.extend(std::iter::repeat("0.0,".to_string()).take(6));
    tokens.push(format!("{sma:.6},"));
    tokens.extend(std::iter::repeat("0.0,".to_string()).take(7));
    tokens.push(format!("{:.6}", sma - EARTH_RADIUS_KM));
    tokens.join(" ")
}

/// Propagator file from a list of semi-major axes, one record every 15 minutes.
pub fn ops_file(values: &[f64]) -> String {
    let mut lines = vec!["step, mjd, x, y, z, vx, vy, vz, sma, ...".to_string()];
    lines.extend(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ops_record(i, 59246.0 + i as f64 / 96.0, v)),
    );
    lines.join("\n")
}

pub fn write_file(dir: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, path)
}

pub fn assert_series_close(actual: &ExtremaSeries, expected: &[(f64, f64)], epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    for (point, &(hours, value)) in actual.iter().zip(expected) {
        assert_eq!(point.elapsed_hours, hours);
        assert_relative_eq!(point.value, value, epsilon = epsilon);
    }
}
