use chrono::NaiveDate;

use synthgen_core::{Column, Dataset, Row, Value};
use synthgen_eval::{DataValidator, EvalError, FieldClass, OutlierMethod};

fn numeric_dataset(field: &str, values: &[f64]) -> Dataset {
    Dataset::from_columns(vec![Column::new(
        field,
        values.iter().copied().map(Value::from).collect(),
    )])
}

fn date(value: &str) -> Value {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Value::Date)
        .expect("valid date")
}

#[test]
fn iqr_flags_the_extreme_age() {
    let dataset = numeric_dataset("age", &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
    let validator = DataValidator::default();
    let report = validator
        .detect_outliers(&dataset, "age", OutlierMethod::Iqr)
        .expect("report");
    assert_eq!(report.outlier_values, vec![100.0]);
    assert_eq!(report.outlier_count, 1);
    assert_eq!(report.lower_bound, Some(-1.5));
    assert_eq!(report.upper_bound, Some(8.5));
    assert!((report.outlier_percentage - 100.0 / 6.0).abs() < 1e-9);
}

#[test]
fn zscore_uses_threshold_three() {
    let mut values = vec![10.0; 20];
    values.push(1000.0);
    let dataset = numeric_dataset("amount", &values);
    let validator = DataValidator::default();
    let report = validator
        .detect_outliers_by_name(&dataset, "amount", "zscore")
        .expect("known method")
        .expect("report");
    assert_eq!(report.outlier_values, vec![1000.0]);
    assert_eq!(report.z_score_threshold, Some(3.0));
    assert_eq!(report.lower_bound, None);

    let flat = numeric_dataset("amount", &[5.0; 10]);
    let report = validator
        .detect_outliers(&flat, "amount", OutlierMethod::ZScore)
        .expect("report");
    assert_eq!(report.outlier_count, 0);
}

#[test]
fn unknown_method_is_an_error() {
    let dataset = numeric_dataset("x", &[1.0, 2.0, 3.0]);
    let result = DataValidator::default().detect_outliers_by_name(&dataset, "x", "dbscan");
    assert!(matches!(result, Err(EvalError::UnknownOutlierMethod(_))));
}

#[test]
fn numeric_methods_guard_their_inputs() {
    let validator = DataValidator::default();
    let short = numeric_dataset("x", &[1.0, 2.0]);
    let text = Dataset::from_columns(vec![Column::new(
        "x",
        vec![Value::from("a"), Value::from("b"), Value::from("c")],
    )]);
    assert!(validator.detect_outliers(&short, "x", OutlierMethod::Iqr).is_none());
    assert!(validator.detect_outliers(&short, "y", OutlierMethod::Iqr).is_none());
    assert!(validator.detect_outliers(&text, "x", OutlierMethod::Iqr).is_none());
    assert!(validator.test_normality(&text, "x").is_none());
    assert!(validator.compare_distributions(&short, &short, "x").is_none());
    assert!(validator.histogram(&text, "x").is_none());
}

#[test]
fn normality_needs_enough_varied_samples() {
    let validator = DataValidator::default();
    let few = numeric_dataset("x", &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(validator.test_normality(&few, "x").is_none());
    let flat = numeric_dataset("x", &[2.0; 30]);
    assert!(validator.test_normality(&flat, "x").is_none());

    let spread: Vec<f64> = (0..20).map(f64::from).collect();
    let result = validator
        .test_normality(&numeric_dataset("x", &spread), "x")
        .expect("result");
    assert_eq!(result.sample_size, 20);
    assert!((result.statistic - 3.992).abs() < 1e-2);
    assert!(result.is_normal);
}

#[test]
fn self_comparison_is_similar() {
    let values: Vec<f64> = (0..40).map(|value| f64::from(value) * 1.5).collect();
    let dataset = numeric_dataset("score", &values);
    let validator = DataValidator::default();
    let result = validator
        .compare_distributions(&dataset, &dataset, "score")
        .expect("result");
    assert_eq!(result.ks_statistic, 0.0);
    assert!(result.similar_distributions);
    assert_eq!((result.sample_size_1, result.sample_size_2), (40, 40));
}

#[test]
fn shifted_samples_are_not_similar() {
    let a: Vec<f64> = (0..100).map(f64::from).collect();
    let b: Vec<f64> = (60..160).map(f64::from).collect();
    let validator = DataValidator::default();
    let result = validator
        .compare_distributions(&numeric_dataset("v", &a), &numeric_dataset("v", &b), "v")
        .expect("result");
    assert!((result.ks_statistic - 0.6).abs() < 1e-12);
    assert!(!result.similar_distributions);
}

#[test]
fn tiny_disjoint_samples_are_not_significant() {
    let validator = DataValidator::default();
    let result = validator
        .compare_distributions(
            &numeric_dataset("v", &[1.0, 2.0, 3.0]),
            &numeric_dataset("v", &[10.0, 11.0, 12.0]),
            "v",
        )
        .expect("result");
    assert_eq!(result.ks_statistic, 1.0);
    assert!((result.p_value - 0.1).abs() < 1e-12);
    assert!(result.similar_distributions);
}

#[test]
fn consistency_flags_discharge_before_admit() {
    let rows = vec![
        Row::new()
            .with("admit_date", date("2023-01-05"))
            .with("discharge_date", date("2023-01-01"))
            .with("age", 40_i64),
        Row::new()
            .with("admit_date", date("2023-01-01"))
            .with("discharge_date", date("2023-01-03"))
            .with("age", 130_i64),
        Row::new()
            .with("admit_date", Value::Null)
            .with("discharge_date", date("2023-01-03"))
            .with("age", Value::Null),
    ];
    let dataset = Dataset::from_rows(&rows);
    let issues = DataValidator::default().validate_cross_field_consistency(&dataset);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].row, 0);
    assert_eq!(issues[0].issue, "Discharge date before admit date");
    assert_eq!(issues[0].fields, vec!["admit_date", "discharge_date"]);
    assert_eq!(issues[1].row, 1);
    assert_eq!(issues[1].fields, vec!["age"]);
}

#[test]
fn credit_score_rule_applies_to_datasets() {
    let dataset = Dataset::from_rows(&[Row::new().with("credit_score", 900_i64)]);
    let issues = DataValidator::default().validate_cross_field_consistency(&dataset);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue, "Credit score out of valid range");
}

#[test]
fn analysis_buckets_columns() {
    let rows: Vec<Row> = (0..6_i64)
        .map(|idx| {
            Row::new()
                .with("amount", idx as f64 * 2.0)
                .with("active", idx % 2 == 0)
                .with("city", if idx < 4 { "Lisbon" } else { "Porto" })
                .with(
                    "joined",
                    NaiveDate::from_ymd_opt(2024, 1, 1 + idx as u32).map(Value::Date),
                )
        })
        .collect();
    let dataset = Dataset::from_rows(&rows);
    let analysis = DataValidator::default().analyze_distributions(&dataset);

    assert_eq!(analysis.field_class("amount"), Some(FieldClass::Numeric));
    assert_eq!(analysis.field_class("active"), Some(FieldClass::Categorical));
    assert_eq!(analysis.field_class("city"), Some(FieldClass::Categorical));
    assert_eq!(analysis.field_class("joined"), Some(FieldClass::Date));

    let amount = &analysis.numeric_summary["amount"];
    assert_eq!(amount.count, 6);
    assert_eq!(amount.mean, Some(5.0));
    assert_eq!(amount.median, Some(5.0));
    assert_eq!(amount.min, Some(0.0));
    assert_eq!(amount.max, Some(10.0));

    let city = &analysis.categorical_summary["city"];
    assert_eq!(city.unique_values, 2);
    assert_eq!(city.most_common[0].value, "Lisbon");
    assert_eq!(city.most_common[0].count, 4);

    let active = &analysis.categorical_summary["active"];
    assert_eq!(active.unique_values, 2);

    let joined = &analysis.date_summary["joined"];
    assert_eq!(joined.date_range_days, Some(5));
}

#[test]
fn histogram_counts_every_value() {
    let values: Vec<f64> = (0..90).map(f64::from).collect();
    let histogram = DataValidator::default()
        .histogram(&numeric_dataset("x", &values), "x")
        .expect("histogram");
    assert_eq!(histogram.counts.len(), 30);
    assert_eq!(histogram.edges.len(), 31);
    assert_eq!(histogram.counts.iter().sum::<usize>(), 90);
}
