//! Integration test: Preprocessing pipeline properties on in-memory frames

use churn_prep::error::PrepError;
use churn_prep::preprocessing::{DataPreprocessor, PreprocessingConfig, ScalerType};
use polars::prelude::*;
use std::collections::HashSet;

fn churn_df() -> DataFrame {
    df!(
        "customerID" => &["C1", "C2", "C3", "C4", "C5", "C6", "C5"],
        "gender" => &["Female", "Male", "Male", "Female", "Male", "Female", "Male"],
        "SeniorCitizen" => &["0", "1", "0", "0", "1", "0", "1"],
        "Partner" => &["True", "False", "False", "True", "True", "False", "True"],
        "tenure" => &["5", "34", "2", "45", "8", "22", "8"],
        "Contract" => &["Month-to-month", "One year", "Month-to-month", "Two year", "Month-to-month", "One year", "Month-to-month"],
        "MonthlyCharges" => &["70.0", "56.95", "53.85", "42.3", "99.65", "89.1", "99.65"],
        "TotalCharges" => &[" ", "1889.5", "108.15", "1840.75", "820.5", "1949.4", "820.5"],
        "Churn" => &["Yes", "No", "Yes", "No", "Yes", "No", "Yes"],
    )
    .unwrap()
}

fn column_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

fn mean_and_population_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[test]
fn test_row_count_never_grows_and_no_duplicates() {
    let df = churn_df();
    let processed = DataPreprocessor::new().fit_transform(&df).unwrap();

    assert!(processed.height() <= df.height());
    assert_eq!(processed.height(), 6, "the repeated C5 row should be dropped");

    let mut seen = HashSet::new();
    for row in 0..processed.height() {
        let key: Vec<u64> = processed
            .get_columns()
            .iter()
            .map(|c| c.f64().unwrap().get(row).unwrap().to_bits())
            .collect();
        assert!(seen.insert(key), "row {row} is a duplicate");
    }
}

#[test]
fn test_every_output_column_is_float() {
    let processed = DataPreprocessor::new().fit_transform(&churn_df()).unwrap();

    for col in processed.get_columns() {
        assert_eq!(col.dtype(), &DataType::Float64, "column {} not Float64", col.name());
        assert_eq!(col.null_count(), 0);
    }
}

#[test]
fn test_identifier_removed() {
    let processed = DataPreprocessor::new().fit_transform(&churn_df()).unwrap();

    assert!(processed
        .get_columns()
        .iter()
        .all(|c| !c.name().as_str().contains("customerID")));
}

#[test]
fn test_churn_label_encoding() {
    let processed = DataPreprocessor::new().fit_transform(&churn_df()).unwrap();

    let churn = column_values(&processed, "Churn");
    assert_eq!(churn, vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_categorical_and_boolean_expansion() {
    let processed = DataPreprocessor::new().fit_transform(&churn_df()).unwrap();

    for name in [
        "gender_Female",
        "gender_Male",
        "Partner_False",
        "Partner_True",
        "Contract_Month-to-month",
        "Contract_One year",
        "Contract_Two year",
    ] {
        assert!(processed.column(name).is_ok(), "missing indicator {name}");
    }
    assert!(processed.column("gender").is_err());
    assert!(processed.column("Contract").is_err());

    // Numeric text columns stay a single column
    assert_eq!(
        column_values(&processed, "SeniorCitizen"),
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    );
    assert_eq!(
        column_values(&processed, "Contract_Two year"),
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    );
}

#[test]
fn test_scaled_columns_standardized() {
    let processed = DataPreprocessor::new().fit_transform(&churn_df()).unwrap();

    for name in ["tenure", "MonthlyCharges", "TotalCharges"] {
        let (mean, std) = mean_and_population_std(&column_values(&processed, name));
        assert!(mean.abs() < 1e-6, "{name} mean = {mean}");
        assert!((std - 1.0).abs() < 1e-6, "{name} std = {std}");
    }
}

#[test]
fn test_unparseable_total_charges_becomes_zero_before_scaling() {
    let config = PreprocessingConfig::default().with_scaler(ScalerType::None);
    let processed = DataPreprocessor::with_config(config)
        .fit_transform(&churn_df())
        .unwrap();

    let total = column_values(&processed, "TotalCharges");
    assert_eq!(total[0], 0.0);
    assert_eq!(total[1], 1889.5);
}

#[test]
fn test_scaling_is_all_or_nothing() {
    let df = churn_df().drop("tenure").unwrap();
    let mut preprocessor = DataPreprocessor::new();
    let processed = preprocessor.fit_transform(&df).unwrap();

    assert!(!preprocessor.report().unwrap().scaled);
    assert_eq!(
        column_values(&processed, "MonthlyCharges"),
        vec![70.0, 56.95, 53.85, 42.3, 99.65, 89.1]
    );
}

#[test]
fn test_multiclass_target_not_restricted_to_binary() {
    let df = df!(
        "tenure" => &["1", "2", "3", "4"],
        "MonthlyCharges" => &["10", "20", "30", "40"],
        "TotalCharges" => &["10", "40", "90", "160"],
        "Churn" => &["Stayed", "Churned", "Joined", "Churned"],
    )
    .unwrap();

    let mut preprocessor = DataPreprocessor::new();
    let processed = preprocessor.fit_transform(&df).unwrap();

    assert_eq!(
        preprocessor.report().unwrap().target_labels,
        vec!["Churned", "Joined", "Stayed"]
    );
    assert_eq!(column_values(&processed, "Churn"), vec![2.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_constant_scaling_column_maps_to_zero() {
    let df = df!(
        "tenure" => &["12", "12", "12"],
        "MonthlyCharges" => &["10", "20", "30"],
        "TotalCharges" => &["120", "240", "360"],
    )
    .unwrap();

    let processed = DataPreprocessor::new().fit_transform(&df).unwrap();
    assert_eq!(column_values(&processed, "tenure"), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_zero_row_input() {
    let empty: Vec<&str> = Vec::new();
    let df = df!(
        "customerID" => &empty,
        "tenure" => &empty,
        "MonthlyCharges" => &empty,
        "TotalCharges" => &empty,
        "Churn" => &empty,
    )
    .unwrap();

    let processed = DataPreprocessor::new().fit_transform(&df).unwrap();
    assert_eq!(processed.height(), 0);
    let names: Vec<String> = processed.get_columns().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["tenure", "MonthlyCharges", "TotalCharges", "Churn"]);
    for col in processed.get_columns() {
        assert_eq!(col.dtype(), &DataType::Float64);
    }
}

#[test]
fn test_dedup_compares_coerced_values() {
    let df = df!(
        "customerID" => &["C1", "C1"],
        "tenure" => &["5", "5"],
        "MonthlyCharges" => &["70.0", "70.0"],
        "TotalCharges" => &[" ", "abc"],
        "Churn" => &["Yes", "Yes"],
    )
    .unwrap();

    let mut preprocessor = DataPreprocessor::new();
    let processed = preprocessor.fit_transform(&df).unwrap();

    assert_eq!(processed.height(), 1);
    let report = preprocessor.report().unwrap();
    assert_eq!(report.coerced_values, 2);
    assert_eq!(report.duplicates_removed, 1);
}

#[test]
fn test_boolean_spellings_share_indicators() {
    let df = df!(
        "tenure" => &["1", "2", "3"],
        "MonthlyCharges" => &["10", "20", "30"],
        "TotalCharges" => &["10", "40", "90"],
        "Partner" => &["True", "TRUE", "false"],
    )
    .unwrap();

    let processed = DataPreprocessor::new().fit_transform(&df).unwrap();

    let names: Vec<String> = processed.get_columns().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(
        names,
        vec!["tenure", "MonthlyCharges", "TotalCharges", "Partner_False", "Partner_True"]
    );
    assert_eq!(column_values(&processed, "Partner_True"), vec![1.0, 1.0, 0.0]);
    assert_eq!(column_values(&processed, "Partner_False"), vec![0.0, 0.0, 1.0]);
}

#[test]
fn test_empty_target_value_is_rejected() {
    let df = df!(
        "tenure" => &["1", "2", "3"],
        "MonthlyCharges" => &["10", "20", "30"],
        "TotalCharges" => &["10", "40", "90"],
        "Churn" => &[Some("Yes"), None, Some("No")],
    )
    .unwrap();

    let err = DataPreprocessor::new().fit_transform(&df).unwrap_err();
    assert!(matches!(err, PrepError::DataError(msg) if msg.contains("Churn")));
}
