use thiserror::Error;

/// Errors emitted by the validator.
///
/// Unmet analysis preconditions are reported as `None`, not as errors.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unknown outlier method '{0}' (expected 'iqr' or 'zscore')")]
    UnknownOutlierMethod(String),
    #[error("invalid validator options: {0}")]
    InvalidOptions(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
