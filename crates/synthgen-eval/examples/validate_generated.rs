use std::env;

use serde_json::json;
use synthgen_core::parse_schema;
use synthgen_eval::{DataValidator, OutlierMethod, ValidatorOptions};
use synthgen_generate::{GeneratorConfig, SyntheticGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rows: usize = env::args()
        .nth(1)
        .map(|value| value.parse())
        .transpose()?
        .unwrap_or(500);

    let schema = parse_schema(&json!({
        "fields": {
            "patient_id": {"type": "uuid"},
            "age": {"type": "age", "min": 18, "max": 95},
            "gender": {"type": "gender"},
            "bill": {"type": "float", "min": 100, "max": 20000, "precision": 2},
            "admit_date": {"type": "date", "start": "2023-01-01", "end": "2023-12-31"},
            "discharge_date": {"type": "date", "start": "2023-01-01", "end": "2024-01-31"}
        }
    }))?;

    let config = GeneratorConfig {
        inject_edge_cases: true,
        ..GeneratorConfig::seeded(7)
    };
    let dataset = SyntheticGenerator::new(config).generate_data(&schema, rows)?;

    let validator = DataValidator::new(ValidatorOptions::default())?;
    let analysis = validator.analyze_distributions(&dataset);
    print!("{}", validator.generate_summary_report(&analysis));

    for field in analysis.numeric_fields() {
        if let Some(report) = validator.detect_outliers(&dataset, field, OutlierMethod::Iqr) {
            println!(
                "{field}: {} outliers ({:.1}%)",
                report.outlier_count, report.outlier_percentage
            );
        }
        if let Some(normality) = validator.test_normality(&dataset, field) {
            println!(
                "{field}: K2={:.3} p={:.4} normal={}",
                normality.statistic, normality.p_value, normality.is_normal
            );
        }
    }

    let issues = validator.validate_cross_field_consistency(&dataset);
    println!("consistency issues: {}", issues.len());
    Ok(())
}
