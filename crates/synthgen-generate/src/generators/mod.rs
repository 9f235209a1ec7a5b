use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rand::RngCore;

use synthgen_core::{FieldKind, FieldSpec, Value};

use crate::errors::GenerationError;

pub mod catalog;
pub mod faker_rs;
pub mod perturb;
pub mod primitives;

pub use perturb::{EdgeCaseInjector, NoiseInjector, PerturbContext, Perturbation};

const DEFAULT_DATE_START: &str = "2020-01-01";
const DEFAULT_DATE_END: &str = "2025-01-01";

/// Produces base values for one field kind.
pub trait FieldGenerator: Send + Sync {
    fn kind(&self) -> FieldKind;

    fn generate(
        &self,
        spec: &FieldSpec,
        rng: &mut dyn RngCore,
    ) -> Result<Value, GenerationError>;
}

/// Kind → generator table.
pub struct GeneratorRegistry {
    generators: BTreeMap<FieldKind, Box<dyn FieldGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        primitives::register(&mut registry);
        faker_rs::register(&mut registry);
        catalog::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    pub fn register_generator(&mut self, generator: Box<dyn FieldGenerator>) {
        self.generators.insert(generator.kind(), generator);
    }

    pub fn generator(&self, kind: FieldKind) -> Option<&dyn FieldGenerator> {
        self.generators.get(&kind).map(|generator| generator.as_ref())
    }

    /// Resolve the generator for a declared type name.
    pub fn resolve(&self, field_type: &str) -> Result<&dyn FieldGenerator, GenerationError> {
        field_type
            .parse::<FieldKind>()
            .ok()
            .and_then(|kind| self.generator(kind))
            .ok_or_else(|| GenerationError::UnknownFieldType(field_type.to_string()))
    }

    pub fn kinds(&self) -> Vec<FieldKind> {
        self.generators.keys().copied().collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Declared bounds, falling back to the kind's defaults.
pub fn numeric_bounds(kind: FieldKind, spec: &FieldSpec) -> Result<(f64, f64), GenerationError> {
    let (default_min, default_max) = kind.default_range().unwrap_or((0.0, 100.0));
    let min = spec.min.unwrap_or(default_min);
    let max = spec.max.unwrap_or(default_max);
    if !min.is_finite() || !max.is_finite() {
        return Err(GenerationError::InvalidField(format!(
            "{kind} bounds must be finite"
        )));
    }
    if min > max {
        return Err(GenerationError::InvalidField(format!(
            "{kind} min must be <= max"
        )));
    }
    if !(max - min).is_finite() {
        return Err(GenerationError::InvalidField(format!(
            "{kind} range [{min}, {max}] is too wide"
        )));
    }
    Ok((min, max))
}

/// Integer bounds, shrunk inward to whole numbers.
pub fn integer_bounds(kind: FieldKind, spec: &FieldSpec) -> Result<(i64, i64), GenerationError> {
    let (min, max) = numeric_bounds(kind, spec)?;
    let (min, max) = (min.ceil() as i64, max.floor() as i64);
    if min > max {
        return Err(GenerationError::InvalidField(format!(
            "{kind} range contains no integers"
        )));
    }
    Ok((min, max))
}

pub fn date_bounds(spec: &FieldSpec) -> Result<(NaiveDate, NaiveDate), GenerationError> {
    let start = parse_date_param("start", spec.start.as_deref().unwrap_or(DEFAULT_DATE_START))?;
    let end = parse_date_param("end", spec.end.as_deref().unwrap_or(DEFAULT_DATE_END))?;
    if start > end {
        return Err(GenerationError::InvalidField(
            "date start must be <= end".to_string(),
        ));
    }
    Ok((start, end))
}

pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_date_param(key: &str, value: &str) -> Result<NaiveDate, GenerationError> {
    parse_date_value(value).ok_or_else(|| {
        GenerationError::InvalidField(format!("date {key} '{value}' is not YYYY-MM-DD"))
    })
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bounds_shrink_to_whole_numbers() {
        let spec = FieldSpec::new("integer").with_range(1.5, 4.5);
        assert_eq!(integer_bounds(FieldKind::Integer, &spec).ok(), Some((2, 4)));

        let empty = FieldSpec::new("integer").with_range(1.2, 1.8);
        assert!(integer_bounds(FieldKind::Integer, &empty).is_err());
    }

    #[test]
    fn bounds_fall_back_to_kind_defaults() {
        let spec = FieldSpec::new("salary");
        assert_eq!(
            numeric_bounds(FieldKind::Salary, &spec).ok(),
            Some((30_000.0, 150_000.0))
        );
    }

    #[test]
    fn overflowing_ranges_are_rejected() {
        let spec = FieldSpec::new("float").with_range(-1e308, 1e308);
        assert!(matches!(
            numeric_bounds(FieldKind::Float, &spec),
            Err(GenerationError::InvalidField(_))
        ));
    }

    #[test]
    fn rounds_to_precision() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
