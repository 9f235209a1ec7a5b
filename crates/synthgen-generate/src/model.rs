use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use synthgen_core::{ConsistencyIssue, Dataset};

use crate::errors::GenerationError;

/// Options for the synthetic data generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Replace some values with boundary or adversarial edge cases.
    pub inject_edge_cases: bool,
    /// Perturb numeric values with multiplicative noise.
    pub inject_noise: bool,
    /// Half-width of the uniform noise factor (0.05 means ±5%).
    pub noise_range: f64,
    /// Probability that a value is replaced by an edge case.
    pub edge_case_probability: f64,
    /// Seed for reproducible runs; drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            inject_edge_cases: false,
            inject_noise: false,
            noise_range: 0.05,
            edge_case_probability: 0.05,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(self.noise_range.is_finite() && self.noise_range >= 0.0)
            || !(2.0 * self.noise_range).is_finite()
        {
            return Err(GenerationError::InvalidConfig(format!(
                "noise_range must be a finite non-negative number, got {}",
                self.noise_range
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_case_probability) {
            return Err(GenerationError::InvalidConfig(format!(
                "edge_case_probability must be in [0, 1], got {}",
                self.edge_case_probability
            )));
        }
        Ok(())
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub generator_usage: BTreeMap<String, u64>,
    pub perturbation_usage: BTreeMap<String, u64>,
    pub consistency_issues: Vec<ConsistencyIssue>,
}

impl GenerationReport {
    pub fn new(run_id: String, rows_requested: u64) -> Self {
        Self {
            run_id,
            rows_requested,
            rows_generated: 0,
            generator_usage: BTreeMap::new(),
            perturbation_usage: BTreeMap::new(),
            consistency_issues: Vec::new(),
        }
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_perturbation(&mut self, id: &str) {
        *self.perturbation_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_issues(&mut self, row: usize, issues: Vec<String>) {
        if !issues.is_empty() {
            self.consistency_issues.push(ConsistencyIssue { row, issues });
        }
    }

    pub fn perturbation_count(&self, id: &str) -> u64 {
        self.perturbation_usage.get(id).copied().unwrap_or(0)
    }
}

/// Dataset plus the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub dataset: Dataset,
    pub report: GenerationReport,
}
