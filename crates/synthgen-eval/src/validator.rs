use tracing::{debug, info, warn};

use synthgen_core::{Column, Dataset, FieldIssue, Value, check_row_detailed};

use crate::errors::EvalError;
use crate::model::{
    CategoricalSummary, CategoryCount, ComparisonResult, DateSummary, DistributionAnalysis,
    FieldClass, FieldClassification, Histogram, NormalityResult, NumericSummary, OutlierMethod,
    OutlierReport, ValidatorOptions,
};
use crate::report::render_summary_report;
use crate::stats;

/// Statistical validator for generated datasets.
///
/// Holds only its options; every call returns a fresh result.
#[derive(Debug, Clone, Default)]
pub struct DataValidator {
    options: ValidatorOptions,
}

impl DataValidator {
    pub fn new(options: ValidatorOptions) -> Result<Self, EvalError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Classify every column and compute its statistics bundle.
    pub fn analyze_distributions(&self, dataset: &Dataset) -> DistributionAnalysis {
        let mut analysis = DistributionAnalysis {
            row_count: dataset.num_rows(),
            column_count: dataset.num_columns(),
            ..DistributionAnalysis::default()
        };

        for column in dataset.columns() {
            let class = classify(column);
            analysis.fields.push(FieldClassification {
                name: column.name.clone(),
                class,
            });
            match class {
                FieldClass::Numeric => {
                    analysis
                        .numeric_summary
                        .insert(column.name.clone(), numeric_summary(column));
                }
                FieldClass::Categorical => {
                    analysis.categorical_summary.insert(
                        column.name.clone(),
                        categorical_summary(column, self.options.top_categories),
                    );
                }
                FieldClass::Date => {
                    analysis
                        .date_summary
                        .insert(column.name.clone(), date_summary(column));
                }
            }
        }

        info!(
            rows = analysis.row_count,
            numeric = analysis.numeric_summary.len(),
            categorical = analysis.categorical_summary.len(),
            date = analysis.date_summary.len(),
            "distribution analysis finished"
        );
        analysis
    }

    pub fn detect_outliers(
        &self,
        dataset: &Dataset,
        field: &str,
        method: OutlierMethod,
    ) -> Option<OutlierReport> {
        let data = self.numeric_sample(dataset, field)?;
        let total = data.len() as f64;

        let report = match method {
            OutlierMethod::Iqr => {
                let sorted = stats::sorted(&data);
                let q1 = stats::quantile(&sorted, 0.25)?;
                let q3 = stats::quantile(&sorted, 0.75)?;
                let spread = self.options.iqr_multiplier * (q3 - q1);
                let (lower, upper) = (q1 - spread, q3 + spread);
                let outliers: Vec<f64> = data
                    .iter()
                    .copied()
                    .filter(|value| *value < lower || *value > upper)
                    .collect();
                OutlierReport {
                    method,
                    outlier_count: outliers.len(),
                    outlier_percentage: outliers.len() as f64 / total * 100.0,
                    lower_bound: Some(lower),
                    upper_bound: Some(upper),
                    z_score_threshold: None,
                    outlier_values: outliers,
                }
            }
            OutlierMethod::ZScore => {
                let threshold = self.options.zscore_threshold;
                let mean = stats::mean(&data)?;
                let std = stats::population_std(&data)?;
                let outliers: Vec<f64> = if std > 0.0 {
                    data.iter()
                        .copied()
                        .filter(|value| ((value - mean) / std).abs() > threshold)
                        .collect()
                } else {
                    Vec::new()
                };
                OutlierReport {
                    method,
                    outlier_count: outliers.len(),
                    outlier_percentage: outliers.len() as f64 / total * 100.0,
                    lower_bound: None,
                    upper_bound: None,
                    z_score_threshold: Some(threshold),
                    outlier_values: outliers,
                }
            }
        };
        Some(report)
    }

    /// Outlier detection with the method given by name (`"iqr"`, `"zscore"`).
    pub fn detect_outliers_by_name(
        &self,
        dataset: &Dataset,
        field: &str,
        method: &str,
    ) -> Result<Option<OutlierReport>, EvalError> {
        let method = method.parse()?;
        Ok(self.detect_outliers(dataset, field, method))
    }

    pub fn test_normality(&self, dataset: &Dataset, field: &str) -> Option<NormalityResult> {
        let data = self.numeric_sample(dataset, field)?;
        let Some((statistic, p_value)) = stats::normal_test(&data) else {
            debug!(field, samples = data.len(), "normality undetermined");
            return None;
        };
        Some(NormalityResult {
            statistic,
            p_value,
            is_normal: p_value > self.options.significance,
            sample_size: data.len(),
        })
    }

    /// Two-sample Kolmogorov-Smirnov comparison of one field across datasets.
    pub fn compare_distributions(
        &self,
        first: &Dataset,
        second: &Dataset,
        field: &str,
    ) -> Option<ComparisonResult> {
        let data1 = self.numeric_sample(first, field)?;
        let data2 = self.numeric_sample(second, field)?;
        let (statistic, p_value) = stats::ks_two_sample(&data1, &data2)?;
        Some(ComparisonResult {
            ks_statistic: statistic,
            p_value,
            similar_distributions: p_value > self.options.significance,
            sample_size_1: data1.len(),
            sample_size_2: data2.len(),
        })
    }

    /// Re-check every row against the shared consistency rules.
    pub fn validate_cross_field_consistency(&self, dataset: &Dataset) -> Vec<FieldIssue> {
        let issues: Vec<FieldIssue> = dataset
            .rows()
            .enumerate()
            .flat_map(|(index, row)| check_row_detailed(index, &row))
            .collect();
        if !issues.is_empty() {
            warn!(issues = issues.len(), "cross-field consistency issues");
        }
        issues
    }

    pub fn generate_summary_report(&self, analysis: &DistributionAnalysis) -> String {
        render_summary_report(analysis)
    }

    /// Equal-width histogram of a numeric field.
    pub fn histogram(&self, dataset: &Dataset, field: &str) -> Option<Histogram> {
        let data = self.numeric_sample(dataset, field)?;
        let (edges, counts) = stats::histogram(&data, self.options.histogram_bins)?;
        Some(Histogram {
            field: field.to_string(),
            edges,
            counts,
        })
    }

    /// Non-missing values of a numeric column with at least `min_samples`.
    fn numeric_sample(&self, dataset: &Dataset, field: &str) -> Option<Vec<f64>> {
        let Some(column) = dataset.column(field) else {
            debug!(field, "field not in dataset");
            return None;
        };
        if classify(column) != FieldClass::Numeric {
            debug!(field, "field is not numeric");
            return None;
        }
        let data = column.numeric_values();
        if data.len() < self.options.min_samples {
            debug!(
                field,
                samples = data.len(),
                min_samples = self.options.min_samples,
                "not enough samples"
            );
            return None;
        }
        Some(data)
    }
}

/// Classify a column by the runtime type of its non-missing cells.
pub fn classify(column: &Column) -> FieldClass {
    let mut present = column.values.iter().filter(|value| !value.is_null());
    let Some(first) = present.next() else {
        return FieldClass::Categorical;
    };
    let class = match first {
        Value::Int(_) | Value::Float(_) => FieldClass::Numeric,
        Value::Date(_) => FieldClass::Date,
        _ => return FieldClass::Categorical,
    };
    let uniform = present.all(|value| match class {
        FieldClass::Numeric => value.is_numeric(),
        FieldClass::Date => matches!(value, Value::Date(_)),
        FieldClass::Categorical => true,
    });
    if uniform {
        class
    } else {
        FieldClass::Categorical
    }
}

fn numeric_summary(column: &Column) -> NumericSummary {
    let data = column.numeric_values();
    let sorted = stats::sorted(&data);
    NumericSummary {
        count: column.len(),
        mean: stats::mean(&data),
        std: stats::sample_std(&data),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        median: stats::median(&sorted),
        q25: stats::quantile(&sorted, 0.25),
        q75: stats::quantile(&sorted, 0.75),
        skewness: stats::skewness(&data),
        kurtosis: stats::kurtosis(&data),
    }
}

fn categorical_summary(column: &Column, top: usize) -> CategoricalSummary {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for value in column.values.iter().filter(|value| !value.is_null()) {
        let label = value.to_string();
        match counts.iter_mut().find(|entry| entry.value == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                value: label,
                count: 1,
            }),
        }
    }
    let unique_values = counts.len();
    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top);
    CategoricalSummary {
        count: column.len(),
        unique_values,
        most_common: counts,
        null_count: column.null_count(),
    }
}

fn date_summary(column: &Column) -> DateSummary {
    let dates = column.values.iter().filter_map(Value::as_date);
    let (min_date, max_date) = dates.fold((None, None), |(min, max), date| {
        (
            Some(min.map_or(date, |min: chrono::NaiveDate| min.min(date))),
            Some(max.map_or(date, |max: chrono::NaiveDate| max.max(date))),
        )
    });
    let date_range_days = min_date
        .zip(max_date)
        .map(|(min, max)| (max - min).num_days());
    DateSummary {
        count: column.len(),
        min_date,
        max_date,
        date_range_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_uses_present_values() {
        let numeric = Column::new("n", vec![Value::Int(1), Value::Null, Value::Float(2.5)]);
        let flags = Column::new("b", vec![Value::Bool(true), Value::Bool(false)]);
        let mixed = Column::new("m", vec![Value::Int(1), Value::from("x")]);
        let empty = Column::new("e", vec![Value::Null, Value::Null]);
        assert_eq!(classify(&numeric), FieldClass::Numeric);
        assert_eq!(classify(&flags), FieldClass::Categorical);
        assert_eq!(classify(&mixed), FieldClass::Categorical);
        assert_eq!(classify(&empty), FieldClass::Categorical);
    }

    #[test]
    fn categorical_ties_keep_first_seen_order() {
        let column = Column::new(
            "c",
            ["b", "a", "a", "b", "c", "d", "e", "f"]
                .into_iter()
                .map(Value::from)
                .chain([Value::Null])
                .collect(),
        );
        let summary = categorical_summary(&column, 5);
        assert_eq!(summary.count, 9);
        assert_eq!(summary.unique_values, 6);
        assert_eq!(summary.null_count, 1);
        let labels: Vec<&str> = summary
            .most_common
            .iter()
            .map(|entry| entry.value.as_str())
            .collect();
        assert_eq!(labels, vec!["b", "a", "c", "d", "e"]);
    }
}
