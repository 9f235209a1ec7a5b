//! Schema-driven synthetic data generation.
//!
//! A [`SyntheticGenerator`] walks a [`synthgen_core::Schema`], draws one value
//! per field from the kind's registered generator, optionally perturbs it with
//! noise or edge cases, and collects cross-field consistency issues into a
//! [`GenerationReport`]. Datasets can be exported with [`write_dataset_csv`].

pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod model;
pub mod output;

pub use engine::SyntheticGenerator;
pub use errors::GenerationError;
pub use generators::{FieldGenerator, GeneratorRegistry};
pub use model::{GenerationOutcome, GenerationReport, GeneratorConfig};
pub use output::{write_dataset_csv, write_dataset_csv_path};
