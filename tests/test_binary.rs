//! End-to-end tests of the morphent binary

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::{create_molar_dataframe, create_temp_csv};

#[test]
fn test_rank_command_prints_ranking() {
    let mut df = create_molar_dataframe();
    let (dir, path) = create_temp_csv(&mut df);

    Command::cargo_bin("morphent")
        .unwrap()
        .args(["rank", "-t", "species", "--drop-columns", "specimen"])
        .args(["--continuous", "m1_length,enamel", "--default-kind", "categorical"])
        .args(["--bins", "2", "--export", "-i"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFORMATION GAIN RANKING"))
        .stdout(predicate::str::contains("cusp_count"));

    let exported = dir.path().join("molars_ranking.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(exported).unwrap()).unwrap();
    assert_eq!(json["ranking"].as_array().unwrap().len(), 4);
}

#[test]
fn test_entropy_command_succeeds() {
    let mut df = create_molar_dataframe();
    let (_dir, path) = create_temp_csv(&mut df);

    Command::cargo_bin("morphent")
        .unwrap()
        .args(["entropy", "--default-kind", "categorical", "-i"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("COLUMN ENTROPY"));
}

#[test]
fn test_rank_without_target_fails() {
    let mut df = create_molar_dataframe();
    let (_dir, path) = create_temp_csv(&mut df);

    Command::cargo_bin("morphent")
        .unwrap()
        .args(["rank", "--default-kind", "categorical", "-i"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target column is required"));
}

#[test]
fn test_bins_below_two_rejected() {
    Command::cargo_bin("morphent")
        .unwrap()
        .args(["entropy", "-i", "molars.csv", "--bins", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bins must be at least 2"));
}

#[test]
fn test_rank_reports_skipped_predictors() {
    let (_dir, path) = common::create_temp_file(
        "teeth.csv",
        "species,cusp,wear\nA,3,\nA,3,\nB,4,\nB,4,\n",
    );

    Command::cargo_bin("morphent")
        .unwrap()
        .args(["rank", "-t", "species", "--continuous", "wear"])
        .args(["--default-kind", "categorical", "-i"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Skipped 1 predictor(s) without usable observations: wear",
        ));
}
