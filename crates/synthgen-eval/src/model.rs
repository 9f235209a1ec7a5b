use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::EvalError;

/// Options for dataset validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Fence width in IQRs beyond Q1/Q3.
    pub iqr_multiplier: f64,
    /// Absolute z-score above which a value is an outlier.
    pub zscore_threshold: f64,
    /// p-value cutoff for normality and similarity verdicts.
    pub significance: f64,
    /// Minimum non-missing values for numeric analyses.
    pub min_samples: usize,
    /// Number of most common categories kept per categorical field.
    pub top_categories: usize,
    pub histogram_bins: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            zscore_threshold: 3.0,
            significance: 0.05,
            min_samples: 3,
            top_categories: 5,
            histogram_bins: 30,
        }
    }
}

impl ValidatorOptions {
    pub fn from_json(raw: &str) -> Result<Self, EvalError> {
        let options: Self = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(EvalError::InvalidOptions(
                "iqr_multiplier must be a non-negative number".to_string(),
            ));
        }
        if !self.zscore_threshold.is_finite() || self.zscore_threshold <= 0.0 {
            return Err(EvalError::InvalidOptions(
                "zscore_threshold must be positive".to_string(),
            ));
        }
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(EvalError::InvalidOptions(
                "significance must be in (0, 1)".to_string(),
            ));
        }
        if self.min_samples == 0 || self.histogram_bins == 0 {
            return Err(EvalError::InvalidOptions(
                "min_samples and histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analysis bucket a column falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
    Numeric,
    Categorical,
    Date,
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldClass::Numeric => "numeric",
            FieldClass::Categorical => "categorical",
            FieldClass::Date => "date",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldClassification {
    pub name: String,
    pub class: FieldClass,
}

/// Descriptive statistics of a numeric column.
///
/// `count` is the column length, missing cells included. Statistics that are
/// undefined for the sample size are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub q25: Option<f64>,
    pub q75: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique_values: usize,
    /// Most frequent values, count descending, ties in first-seen order.
    pub most_common: Vec<CategoryCount>,
    pub null_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    pub count: usize,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub date_range_days: Option<i64>,
}

/// Result of [`crate::DataValidator::analyze_distributions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionAnalysis {
    pub row_count: usize,
    pub column_count: usize,
    /// Classification of every column, in dataset order.
    pub fields: Vec<FieldClassification>,
    pub numeric_summary: BTreeMap<String, NumericSummary>,
    pub categorical_summary: BTreeMap<String, CategoricalSummary>,
    pub date_summary: BTreeMap<String, DateSummary>,
}

impl DistributionAnalysis {
    pub fn field_class(&self, name: &str) -> Option<FieldClass> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.class)
    }

    pub fn fields_of(&self, class: FieldClass) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.class == class)
            .map(|field| field.name.as_str())
            .collect()
    }

    pub fn numeric_fields(&self) -> Vec<&str> {
        self.fields_of(FieldClass::Numeric)
    }

    pub fn categorical_fields(&self) -> Vec<&str> {
        self.fields_of(FieldClass::Categorical)
    }

    pub fn date_fields(&self) -> Vec<&str> {
        self.fields_of(FieldClass::Date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    #[default]
    Iqr,
    #[serde(rename = "zscore")]
    ZScore,
}

impl OutlierMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::ZScore => "zscore",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = EvalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iqr" => Ok(OutlierMethod::Iqr),
            "zscore" | "z_score" | "z-score" => Ok(OutlierMethod::ZScore),
            _ => Err(EvalError::UnknownOutlierMethod(value.to_string())),
        }
    }
}

/// Outliers of one numeric field.
///
/// IQR reports carry the fences, z-score reports carry the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub method: OutlierMethod,
    pub outlier_count: usize,
    /// Share of non-missing values flagged, in percent.
    pub outlier_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score_threshold: Option<f64>,
    /// Flagged values in dataset order.
    pub outlier_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub statistic: f64,
    pub p_value: f64,
    pub is_normal: bool,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub ks_statistic: f64,
    pub p_value: f64,
    pub similar_distributions: bool,
    pub sample_size_1: usize,
    pub sample_size_2: usize,
}

/// Equal-width histogram; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub field: String,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}
