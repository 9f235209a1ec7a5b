use std::fmt;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use synthgen_core::{Dataset, FieldSpec, Row, Schema, Value, check_row, parse_schema};

use crate::errors::GenerationError;
use crate::generators::perturb;
use crate::generators::{
    EdgeCaseInjector, GeneratorRegistry, NoiseInjector, PerturbContext, Perturbation,
};
use crate::model::{GenerationOutcome, GenerationReport, GeneratorConfig};

/// Schema-driven row generator.
///
/// Owns its RNG so a seeded generator replays the same values for the same
/// sequence of calls.
pub struct SyntheticGenerator {
    config: GeneratorConfig,
    registry: GeneratorRegistry,
    perturbations: Vec<Box<dyn Perturbation>>,
    rng: ChaCha8Rng,
}

impl SyntheticGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_registry(config, GeneratorRegistry::new())
    }

    pub fn with_registry(config: GeneratorConfig, registry: GeneratorRegistry) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let mut perturbations: Vec<Box<dyn Perturbation>> = Vec::new();
        if config.inject_noise {
            perturbations.push(Box::new(NoiseInjector {
                range: config.noise_range,
            }));
        }
        if config.inject_edge_cases {
            perturbations.push(Box::new(EdgeCaseInjector {
                probability: config.edge_case_probability,
            }));
        }
        Self {
            config,
            registry,
            perturbations,
            rng,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Structural check of a raw schema document.
    pub fn validate_schema(&self, raw: &JsonValue) -> bool {
        synthgen_core::validate_schema(raw)
    }

    pub fn load_schema(&self, raw: &JsonValue) -> Result<Schema, GenerationError> {
        Ok(parse_schema(raw)?)
    }

    /// Generate `num_rows` rows as a column-oriented dataset.
    pub fn generate_data(
        &mut self,
        schema: &Schema,
        num_rows: usize,
    ) -> Result<Dataset, GenerationError> {
        Ok(self.generate(schema, num_rows)?.dataset)
    }

    /// Generate `num_rows` rows along with a run report.
    ///
    /// Consistency violations are collected in the report and never stop
    /// generation.
    pub fn generate(
        &mut self,
        schema: &Schema,
        num_rows: usize,
    ) -> Result<GenerationOutcome, GenerationError> {
        self.config.validate()?;
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(run_id.clone(), num_rows as u64);
        let mut dataset = Dataset::with_columns(schema.field_names());

        info!(
            run_id = %run_id,
            rows = num_rows,
            fields = schema.len(),
            seed = ?self.config.seed,
            edge_cases = self.config.inject_edge_cases,
            noise = self.config.inject_noise,
            "generation started"
        );

        for index in 0..num_rows {
            let mut row = Row::new();
            for field in &schema.fields {
                let value = self
                    .generate_value(&field.spec, Some(&mut report))
                    .map_err(|err| err.in_field(&field.name))?;
                row.insert(field.name.clone(), value);
            }
            let issues = self.validate_cross_field_consistency(&row);
            if !issues.is_empty() {
                debug!(row = index, issues = ?issues, "consistency issues");
            }
            report.record_issues(index, issues);
            dataset.push_row(&row);
            report.rows_generated += 1;
        }

        if !report.consistency_issues.is_empty() {
            warn!(
                run_id = %run_id,
                rows_with_issues = report.consistency_issues.len(),
                "consistency issues found"
            );
        }

        info!(
            run_id = %run_id,
            rows = report.rows_generated,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation finished"
        );

        Ok(GenerationOutcome { dataset, report })
    }

    /// Produce one value for a field, perturbations included.
    pub fn generate_field_value(&mut self, spec: &FieldSpec) -> Result<Value, GenerationError> {
        self.generate_value(spec, None)
    }

    /// Apply configured noise to a numeric value; other values pass through.
    pub fn apply_noise(&mut self, value: &Value, spec: &FieldSpec) -> Value {
        if !self.config.inject_noise {
            return value.clone();
        }
        perturb::apply_noise(value, spec, self.config.noise_range, &mut self.rng)
            .unwrap_or_else(|| value.clone())
    }

    /// Messages of every consistency rule the row violates.
    pub fn validate_cross_field_consistency(&self, row: &Row) -> Vec<String> {
        check_row(row)
    }

    fn generate_value(
        &mut self,
        spec: &FieldSpec,
        mut report: Option<&mut GenerationReport>,
    ) -> Result<Value, GenerationError> {
        let generator = self.registry.resolve(&spec.field_type)?;
        let kind = generator.kind();
        let mut value = generator.generate(spec, &mut self.rng)?;
        if let Some(report) = report.as_deref_mut() {
            report.record_generator_usage(kind.as_str());
        }

        let ctx = PerturbContext { kind, spec };
        for perturbation in &self.perturbations {
            if let Some(next) = perturbation.apply(&value, &ctx, &mut self.rng) {
                value = next;
                if let Some(report) = report.as_deref_mut() {
                    report.record_perturbation(perturbation.id());
                }
            }
        }
        Ok(value)
    }
}

impl fmt::Debug for SyntheticGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.perturbations.iter().map(|p| p.id()).collect();
        f.debug_struct("SyntheticGenerator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("perturbations", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use synthgen_core::FieldKind;

    use super::*;

    #[test]
    fn noise_is_noop_when_disabled() {
        let mut generator = SyntheticGenerator::new(GeneratorConfig::seeded(1));
        let spec = FieldSpec::new("float").with_range(0.0, 10.0);
        assert_eq!(
            generator.apply_noise(&Value::Float(5.0), &spec),
            Value::Float(5.0)
        );
    }

    #[test]
    fn noise_rounds_to_default_precision() {
        let config = GeneratorConfig {
            inject_noise: true,
            noise_range: 0.2,
            ..GeneratorConfig::seeded(3)
        };
        let mut generator = SyntheticGenerator::new(config);
        let spec = FieldSpec::new("integer").with_range(1.0, 100.0);
        for _ in 0..50 {
            let value = generator
                .apply_noise(&Value::Int(50), &spec)
                .as_f64()
                .expect("numeric");
            assert!((40.0..=60.0).contains(&value));
            assert_eq!((value * 100.0).round() / 100.0, value);
        }
    }

    #[test]
    fn field_value_uses_registry_kind() {
        let mut generator = SyntheticGenerator::new(GeneratorConfig::seeded(9));
        let value = generator
            .generate_field_value(&FieldSpec::new("boolean"))
            .expect("boolean");
        assert!(value.as_bool().is_some());
        assert!(generator.registry().generator(FieldKind::Boolean).is_some());
    }
}
