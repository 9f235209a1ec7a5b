use rand::Rng;
use rand::distr::Uniform;

use synthgen_core::{FieldKind, FieldSpec, Value};

use crate::errors::GenerationError;
use crate::generators::{
    FieldGenerator, GeneratorRegistry, date_bounds, integer_bounds, numeric_bounds, round_to,
};

pub fn register(registry: &mut GeneratorRegistry) {
    for &kind in FieldKind::ALL {
        if kind.is_bounded_integer() {
            registry.register_generator(Box::new(IntRangeGenerator { kind }));
        } else if kind.is_bounded_float() {
            registry.register_generator(Box::new(FloatRangeGenerator { kind }));
        }
    }
    registry.register_generator(Box::new(ChoiceGenerator));
    registry.register_generator(Box::new(DateRangeGenerator));
    registry.register_generator(Box::new(BoolGenerator));
}

struct IntRangeGenerator {
    kind: FieldKind,
}

impl FieldGenerator for IntRangeGenerator {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn generate(
        &self,
        spec: &FieldSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Value, GenerationError> {
        let (min, max) = integer_bounds(self.kind, spec)?;
        Ok(Value::Int(rng.random_range(min..=max)))
    }
}

struct FloatRangeGenerator {
    kind: FieldKind,
}

impl FieldGenerator for FloatRangeGenerator {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn generate(
        &self,
        spec: &FieldSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Value, GenerationError> {
        let (min, max) = numeric_bounds(self.kind, spec)?;
        let precision = spec
            .precision
            .unwrap_or_else(|| self.kind.default_precision());
        let uniform = Uniform::new_inclusive(min, max).map_err(|err| {
            GenerationError::InvalidField(format!("{} range [{min}, {max}]: {err}", self.kind))
        })?;
        let value = round_to(rng.sample(uniform), precision);
        Ok(Value::Float(value.clamp(min, max)))
    }
}

struct ChoiceGenerator;

impl FieldGenerator for ChoiceGenerator {
    fn kind(&self) -> FieldKind {
        FieldKind::Choice
    }

    fn generate(
        &self,
        spec: &FieldSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Value, GenerationError> {
        let options = spec
            .options
            .as_deref()
            .filter(|options| !options.is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidField("choice field must have 'options' list".to_string())
            })?;
        let idx = rng.random_range(0..options.len());
        Ok(Value::from_json(&options[idx]))
    }
}

struct DateRangeGenerator;

impl FieldGenerator for DateRangeGenerator {
    fn kind(&self) -> FieldKind {
        FieldKind::Date
    }

    fn generate(
        &self,
        spec: &FieldSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Value, GenerationError> {
        let (start, end) = date_bounds(spec)?;
        let span = (end - start).num_days();
        let offset = rng.random_range(0..=span);
        Ok(Value::Date(start + chrono::Duration::days(offset)))
    }
}

struct BoolGenerator;

impl FieldGenerator for BoolGenerator {
    fn kind(&self) -> FieldKind {
        FieldKind::Boolean
    }

    fn generate(
        &self,
        _spec: &FieldSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Value, GenerationError> {
        Ok(Value::Bool(rng.random_bool(0.5)))
    }
}
