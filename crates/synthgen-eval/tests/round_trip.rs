use serde_json::json;

use synthgen_core::parse_schema;
use synthgen_eval::{DataValidator, FieldClass, OutlierMethod};
use synthgen_generate::{GeneratorConfig, SyntheticGenerator};

fn ecommerce_schema() -> synthgen_core::Schema {
    parse_schema(&json!({
        "fields": {
            "order_id": {"type": "uuid"},
            "quantity": {"type": "quantity", "min": 1, "max": 20},
            "price": {"type": "price", "min": 5, "max": 500, "precision": 2},
            "category": {"type": "product_category"},
            "gift": {"type": "boolean"},
            "order_date": {"type": "date", "start": "2024-01-01", "end": "2024-03-31"},
            "shipping_date": {"type": "date", "start": "2024-01-01", "end": "2024-04-30"}
        }
    }))
    .expect("valid schema")
}

#[test]
fn analysis_counts_match_generated_rows() {
    let mut generator = SyntheticGenerator::new(GeneratorConfig::seeded(99));
    let dataset = generator
        .generate_data(&ecommerce_schema(), 250)
        .expect("generate");
    let analysis = DataValidator::default().analyze_distributions(&dataset);

    assert_eq!(analysis.row_count, 250);
    assert_eq!(analysis.numeric_fields(), vec!["quantity", "price"]);
    assert_eq!(
        analysis.categorical_fields(),
        vec!["order_id", "category", "gift"]
    );
    assert_eq!(analysis.date_fields(), vec!["order_date", "shipping_date"]);
    for field in ["quantity", "price"] {
        assert_eq!(analysis.numeric_summary[field].count, 250);
    }
    let quantity = &analysis.numeric_summary["quantity"];
    assert!(quantity.min.is_some_and(|min| min >= 1.0));
    assert!(quantity.max.is_some_and(|max| max <= 20.0));
    assert_eq!(analysis.categorical_summary["gift"].unique_values, 2);
}

#[test]
fn generated_data_compares_to_itself() {
    let mut generator = SyntheticGenerator::new(GeneratorConfig::seeded(3));
    let dataset = generator
        .generate_data(&ecommerce_schema(), 120)
        .expect("generate");
    let validator = DataValidator::default();
    let result = validator
        .compare_distributions(&dataset, &dataset, "price")
        .expect("comparison");
    assert_eq!(result.ks_statistic, 0.0);
    assert!(result.similar_distributions);

    let outliers = validator
        .detect_outliers(&dataset, "quantity", OutlierMethod::Iqr)
        .expect("outliers");
    assert_eq!(outliers.outlier_count, 0);
}

#[test]
fn validator_sees_the_same_issues_as_the_generator() {
    let mut generator = SyntheticGenerator::new(GeneratorConfig::seeded(5));
    let outcome = generator
        .generate(&ecommerce_schema(), 200)
        .expect("generate");
    let issues = DataValidator::default().validate_cross_field_consistency(&outcome.dataset);
    let generator_rows: Vec<usize> = outcome
        .report
        .consistency_issues
        .iter()
        .map(|issue| issue.row)
        .collect();
    let validator_rows: Vec<usize> = issues.iter().map(|issue| issue.row).collect();
    assert_eq!(generator_rows, validator_rows);
    assert!(!issues.is_empty(), "independent dates should sometimes invert");
    assert!(
        issues
            .iter()
            .all(|issue| issue.issue == "Shipping date before order date")
    );
    assert_eq!(
        DataValidator::default()
            .analyze_distributions(&outcome.dataset)
            .field_class("shipping_date"),
        Some(FieldClass::Date)
    );
}
