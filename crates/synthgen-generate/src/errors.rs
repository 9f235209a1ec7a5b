use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),
    #[error("invalid field configuration: {0}")]
    InvalidField(String),
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
    #[error("error generating field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<GenerationError>,
    },
    #[error("schema error: {0}")]
    Core(#[from] synthgen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub(crate) fn in_field(self, field: &str) -> Self {
        GenerationError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}
