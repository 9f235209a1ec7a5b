//! Statistical validation of synthetic datasets.
//!
//! [`DataValidator`] classifies columns, computes descriptive statistics,
//! detects outliers, tests normality, compares distributions across datasets,
//! and re-checks the cross-field consistency rules from `synthgen-core`.

pub mod errors;
pub mod model;
pub mod report;
pub mod stats;
pub mod validator;

pub use errors::EvalError;
pub use model::{
    CategoricalSummary, CategoryCount, ComparisonResult, DateSummary, DistributionAnalysis,
    FieldClass, FieldClassification, Histogram, NormalityResult, NumericSummary, OutlierMethod,
    OutlierReport, ValidatorOptions,
};
pub use report::render_summary_report;
pub use validator::{DataValidator, classify};
