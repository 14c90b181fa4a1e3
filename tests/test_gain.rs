//! Tests for conditional entropy, information gain and predictor ranking

use morphent::pipeline::{
    conditional_entropy, dataframe_columns, information_gain, load_table, overall_entropy,
    predictor_gain, rank_predictors, AnalysisError, LoadOptions, Variable, VariableKind,
    VariableSchema, VariableTable,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, create_molar_dataframe, create_random_dataframe, create_temp_csv};

fn molar_table() -> VariableTable {
    let df = create_molar_dataframe();
    let schema = VariableSchema::new()
        .with_categorical("species")
        .with_categorical("cusp_count")
        .with_continuous("m1_length")
        .with_categorical("ridge")
        .with_continuous("enamel");
    VariableTable::from_dataframe(&df, &schema).unwrap()
}

#[test]
fn test_perfect_predictor_gains_full_entropy() {
    let target = ["A", "A", "B", "B"];
    let predictor = ["x", "x", "y", "y"];

    assert_close(conditional_entropy(&target, &predictor).unwrap(), 0.0);
    assert_close(information_gain(&target, &predictor).unwrap(), 1.0);
}

#[test]
fn test_independent_predictor_gains_nothing() {
    let target = ["A", "B", "A", "B"];
    let predictor = ["x", "x", "y", "y"];

    assert_close(conditional_entropy(&target, &predictor).unwrap(), 1.0);
    assert_close(information_gain(&target, &predictor).unwrap(), 0.0);
}

#[test]
fn test_length_mismatch_rejected() {
    let err = conditional_entropy(&["A", "B"], &[1, 2, 3]).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::LengthMismatch {
            target: 2,
            predictor: 3
        }
    );
}

#[test]
fn test_empty_target_rejected() {
    let empty: [&str; 0] = [];
    let none: [u8; 0] = [];
    assert_eq!(
        information_gain(&empty, &none).unwrap_err(),
        AnalysisError::EmptyInput
    );
}

#[test]
fn test_random_gain_decomposition() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let len = rng.gen_range(1..50);
        let target: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4)).collect();
        let predictor: Vec<u8> = (0..len).map(|_| rng.gen_range(0..5)).collect();

        let h = overall_entropy(&target).unwrap();
        let ce = conditional_entropy(&target, &predictor).unwrap();
        let ig = information_gain(&target, &predictor).unwrap();

        assert!(ig >= -1e-12, "gain must not be negative, got {}", ig);
        assert!(ce <= h + 1e-12, "conditioning must not add entropy");
        assert!((h - ce - ig).abs() < 1e-12);
    }
}

#[test]
fn test_rank_molar_predictors() {
    let ranking = rank_predictors(&molar_table(), "species", 2).unwrap();

    assert_close(ranking.overall_entropy, 1.0);
    assert_eq!(ranking.records_used, 12);
    assert!(ranking.skipped.is_empty());

    let order: Vec<&str> = ranking.records.iter().map(|r| r.predictor.as_str()).collect();
    assert_eq!(order, vec!["cusp_count", "m1_length", "enamel", "ridge"]);

    assert_close(ranking.records[0].information_gain, 1.0);
    assert_close(ranking.records[1].information_gain, 1.0);
    assert_close(ranking.get("ridge").unwrap().information_gain, 0.0);

    let enamel = ranking.get("enamel").unwrap();
    assert!(enamel.information_gain > 0.0 && enamel.information_gain < 0.1);
    // two bins plus the missing-value partition
    assert_eq!(enamel.partitions, 3);
}

#[test]
fn test_ranking_orders_match() {
    let ranking = rank_predictors(&molar_table(), "species", 3).unwrap();
    let by_gain: Vec<&str> = ranking.records.iter().map(|r| r.predictor.as_str()).collect();
    let by_ce: Vec<&str> = ranking
        .by_conditional_entropy()
        .iter()
        .map(|r| r.predictor.as_str())
        .collect();
    assert_eq!(by_gain, by_ce);
}

#[test]
fn test_rank_rejects_continuous_target() {
    let err = rank_predictors(&molar_table(), "m1_length", 2).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::NotCategorical {
            name: "m1_length".into()
        }
    );
}

#[test]
fn test_rank_rejects_unknown_target() {
    let err = rank_predictors(&molar_table(), "genus", 2).unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownColumn { .. }));
}

#[test]
fn test_rank_rejects_small_bin_count() {
    let err = rank_predictors(&molar_table(), "species", 1).unwrap_err();
    assert_eq!(err, AnalysisError::InvalidBinCount { requested: 1 });
}

#[test]
fn test_missing_target_rows_excluded() {
    let target = Variable::categorical(
        "age_group",
        vec![Some("juvenile"), None, Some("adult"), Some("adult"), None],
    );
    let predictor = Variable::categorical(
        "fusion",
        vec![Some("open"), Some("closed"), Some("closed"), Some("closed"), Some("open")],
    );
    let table = VariableTable::new(vec![target, predictor]).unwrap();

    let ranking = rank_predictors(&table, "age_group", 2).unwrap();
    assert_eq!(ranking.records_used, 3);
    assert_close(ranking.records[0].information_gain, ranking.overall_entropy);
}

#[test]
fn test_all_missing_predictor_is_skipped() {
    let table = VariableTable::new(vec![
        Variable::categorical("species", vec![Some("A"), Some("B")]),
        Variable::continuous("wear", vec![None, None]),
        Variable::categorical("ridge", vec![Some("x"), Some("y")]),
    ])
    .unwrap();

    let ranking = rank_predictors(&table, "species", 2).unwrap();
    assert_eq!(ranking.records.len(), 1);
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].name, "wear");

    let target = table.get("species").unwrap();
    let wear = table.get("wear").unwrap();
    assert!(matches!(
        predictor_gain(target, wear, 2),
        Err(AnalysisError::InsufficientData { .. })
    ));
}

#[test]
fn test_random_table_gains_stay_within_bounds() {
    let mut df = create_random_dataframe(300, 8, 3, 11);
    let (_dir, path) = create_temp_csv(&mut df);

    let loaded = load_table(&path, &LoadOptions::new(0)).unwrap();
    let schema = VariableSchema::resolve(
        &dataframe_columns(&loaded),
        &["label".to_string()],
        &[],
        Some(VariableKind::Continuous),
        &[],
    )
    .unwrap();
    let table = VariableTable::from_dataframe(&loaded, &schema).unwrap();

    for num_bins in [2, 6, 10] {
        let ranking = rank_predictors(&table, "label", num_bins).unwrap();

        assert_eq!(ranking.records_used, 300);
        assert_eq!(ranking.records.len(), 8);
        assert!(ranking.skipped.is_empty());

        for record in &ranking.records {
            assert!(
                record.information_gain >= -1e-12,
                "{} has negative gain {}",
                record.predictor,
                record.information_gain
            );
            assert!(record.information_gain <= ranking.overall_entropy + 1e-12);
            assert!(record.partitions <= num_bins);
        }
        assert!(ranking
            .records
            .windows(2)
            .all(|w| w[0].information_gain >= w[1].information_gain - 1e-12));
    }
}
