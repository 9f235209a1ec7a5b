use crate::model::{DistributionAnalysis, FieldClass};

/// Render a plain-text summary of a distribution analysis.
pub fn render_summary_report(analysis: &DistributionAnalysis) -> String {
    let numeric = analysis.fields_of(FieldClass::Numeric);
    let categorical = analysis.fields_of(FieldClass::Categorical);
    let dates = analysis.fields_of(FieldClass::Date);

    let mut lines = vec![
        "Dataset Summary Report".to_string(),
        "=".repeat(50),
        format!("Total Rows: {}", analysis.row_count),
        format!("Total Columns: {}", analysis.column_count),
        format!("Numeric Fields: {}", numeric.len()),
        format!("Categorical Fields: {}", categorical.len()),
        format!("Date Fields: {}", dates.len()),
        String::new(),
    ];

    if !numeric.is_empty() {
        lines.push("Numeric Field Statistics:".to_string());
        for field in &numeric {
            let Some(stats) = analysis.numeric_summary.get(*field) else {
                continue;
            };
            lines.push(format!(
                "  {field}: mean={}, std={}, range=[{}, {}]",
                fixed(stats.mean),
                fixed(stats.std),
                fixed(stats.min),
                fixed(stats.max)
            ));
        }
    }

    if !categorical.is_empty() {
        lines.push(String::new());
        lines.push("Categorical Field Summary:".to_string());
        for field in &categorical {
            if let Some(stats) = analysis.categorical_summary.get(*field) {
                lines.push(format!("  {field}: {} unique values", stats.unique_values));
            }
        }
    }

    if !dates.is_empty() {
        lines.push(String::new());
        lines.push("Date Field Summary:".to_string());
        for field in &dates {
            let Some(stats) = analysis.date_summary.get(*field) else {
                continue;
            };
            match (stats.min_date, stats.max_date, stats.date_range_days) {
                (Some(min), Some(max), Some(days)) => {
                    lines.push(format!("  {field}: {min} to {max} ({days} days)"))
                }
                _ => lines.push(format!("  {field}: no dates")),
            }
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn fixed(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "nan".to_string())
}
