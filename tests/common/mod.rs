//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Molar measurements for two rodent species with known characteristics
///
/// This DataFrame includes:
/// - `specimen`: Unique id per row (carries no information, usually dropped)
/// - `species`: Target, 6 × "A" then 6 × "B"
/// - `cusp_count`: Categorical, perfectly separates the species
/// - `m1_length`: Continuous, A specimens all shorter than B specimens
/// - `ridge`: Categorical, alternates independently of species
/// - `enamel`: Continuous with two missing measurements
pub fn create_molar_dataframe() -> DataFrame {
    df! {
        "specimen" => ["s01", "s02", "s03", "s04", "s05", "s06",
                       "s07", "s08", "s09", "s10", "s11", "s12"],
        "species" => ["A", "A", "A", "A", "A", "A", "B", "B", "B", "B", "B", "B"],
        "cusp_count" => [3i32, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4],
        "m1_length" => [1.0f64, 1.1, 1.2, 1.3, 1.4, 1.5, 2.0, 2.1, 2.2, 2.3, 2.4, 2.5],
        "ridge" => ["x", "y", "x", "y", "x", "y", "x", "y", "x", "y", "x", "y"],
        "enamel" => [Some(0.2f64), Some(0.3), None, Some(0.25), Some(0.31), Some(0.22),
                     Some(0.4), None, Some(0.35), Some(0.28), Some(0.33), Some(0.29)],
    }
    .unwrap()
}

/// A larger random table for property and stress tests
///
/// `label` is a categorical target with `classes` levels, `noise_<i>`
/// are uniform continuous columns unrelated to it.
pub fn create_random_dataframe(rows: usize, cols: usize, classes: u32, seed: u64) -> DataFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let label: Vec<String> = (0..rows)
        .map(|_| format!("c{}", rng.gen_range(0..classes)))
        .collect();
    columns.push(Column::new("label".into(), label));

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
        columns.push(Column::new(format!("noise_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("molars.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw text to a file in a fresh temporary directory
pub fn create_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// Assert two floats agree to within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
