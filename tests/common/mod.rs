//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use climate_balance::refdata::RefData;
use climate_balance::{Balance, calculate};

/// Germany as a whole.
pub const NATIONAL: &str = "DG000000";

/// Large city with industry.
pub const CITY: &str = "11000000";

/// Small municipality without any industry.
pub const RURAL: &str = "09780139";

/// Built-in reference dataset.
pub fn builtin() -> RefData {
    RefData::builtin().expect("built-in reference data should load")
}

/// Balance of `ags` for `year` from the built-in dataset.
pub fn balance(ags: &str, year: i32) -> Balance {
    calculate(&builtin(), ags, year).expect("balance calculation should succeed")
}

/// Directory of the bundled CSV files.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Contents of one bundled CSV file.
pub fn data_file(name: &str) -> String {
    fs::read_to_string(data_dir().join(name)).expect("bundled data file should be readable")
}

/// Contents of one file under `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    fs::read_to_string(path).expect("test fixture should be readable")
}

/// `actual` equals `expected` up to a relative tolerance of 1e-9.
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= 1e-9 * scale,
        "{what}: expected {expected}, got {actual}"
    );
}
