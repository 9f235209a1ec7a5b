//! Post-generation perturbations: numeric noise and edge-case injection.
//!
//! Perturbations wrap every base value uniformly. Each returns `Some` with a
//! replacement when it fires and `None` when the value is left untouched.

use chrono::{Duration, NaiveDate};
use rand::distr::Uniform;
use rand::{Rng, RngCore};

use synthgen_core::{FieldKind, FieldSpec, Value};

use crate::generators::{date_bounds, numeric_bounds, round_to};

pub const NOISE_ID: &str = "perturb.noise";
pub const EDGE_CASE_ID: &str = "perturb.edge_case";

const DEFAULT_NOISE_PRECISION: u32 = 2;

const NAME_EDGE_CASES: &[&str] = &[
    "",
    "N/A",
    "Test User",
    "Anonymous",
    "Unknown",
    "John Doe",
    "Jane Smith",
];
const EMAIL_EDGE_CASES: &[&str] = &[
    "",
    "test@test.com",
    "admin@company.com",
    "no-reply@example.com",
    "invalid-email",
];
const CHOICE_EDGE_CASES: &[&str] = &["", "N/A", "Other", "Unknown", "Test"];

/// Field being perturbed.
#[derive(Debug, Clone, Copy)]
pub struct PerturbContext<'a> {
    pub kind: FieldKind,
    pub spec: &'a FieldSpec,
}

pub trait Perturbation: Send + Sync {
    fn id(&self) -> &'static str;

    fn apply(
        &self,
        input: &Value,
        ctx: &PerturbContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Value>;
}

/// Multiplies numeric values by `1 + u`, `u ~ U[-range, +range]`.
#[derive(Debug, Clone, Copy)]
pub struct NoiseInjector {
    pub range: f64,
}

impl Perturbation for NoiseInjector {
    fn id(&self) -> &'static str {
        NOISE_ID
    }

    fn apply(
        &self,
        input: &Value,
        ctx: &PerturbContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Value> {
        if !ctx.kind.is_numeric() {
            return None;
        }
        apply_noise(input, ctx.spec, self.range, rng)
    }
}

/// Noise for any numeric value, rounded to the field precision (default 2).
///
/// Non-numeric values yield `None`. A range that cannot be sampled leaves
/// the value unscaled.
pub fn apply_noise(
    input: &Value,
    spec: &FieldSpec,
    range: f64,
    rng: &mut dyn RngCore,
) -> Option<Value> {
    let value = input.as_f64()?;
    let range = range.abs();
    let factor = match Uniform::new_inclusive(-range, range) {
        Ok(uniform) if range > 0.0 => rng.sample(uniform),
        _ => 0.0,
    };
    let precision = spec.precision.unwrap_or(DEFAULT_NOISE_PRECISION);
    Some(Value::Float(round_to(value * (1.0 + factor), precision)))
}

/// Replaces values with a kind-specific edge case at a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct EdgeCaseInjector {
    pub probability: f64,
}

impl Perturbation for EdgeCaseInjector {
    fn id(&self) -> &'static str {
        EDGE_CASE_ID
    }

    fn apply(
        &self,
        _input: &Value,
        ctx: &PerturbContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Value> {
        if rng.random::<f64>() >= self.probability {
            return None;
        }
        let pool = edge_cases(ctx.kind, ctx.spec);
        if pool.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..pool.len());
        pool.into_iter().nth(idx)
    }
}

/// Edge-case pool for a field; empty for kinds without one.
pub fn edge_cases(kind: FieldKind, spec: &FieldSpec) -> Vec<Value> {
    match kind {
        FieldKind::Name => text_pool(NAME_EDGE_CASES),
        FieldKind::Email => text_pool(EMAIL_EDGE_CASES),
        FieldKind::Choice => text_pool(CHOICE_EDGE_CASES),
        kind if kind.is_bounded_integer() => {
            let Ok((min, max)) = numeric_bounds(kind, spec) else {
                return Vec::new();
            };
            let (min, max) = (min.ceil() as i64, max.floor() as i64);
            vec![
                Value::Int(min.saturating_sub(1)),
                Value::Int(max.saturating_add(1)),
                Value::Int(0),
                Value::Int(-1),
                Value::Int(999_999),
            ]
        }
        kind if kind.is_bounded_float() => {
            let Ok((min, max)) = numeric_bounds(kind, spec) else {
                return Vec::new();
            };
            vec![
                Value::Float(min - 0.01),
                Value::Float(max + 0.01),
                Value::Float(0.0),
                Value::Float(-0.01),
                Value::Float(999_999.99),
            ]
        }
        FieldKind::Date => {
            let mut pool = Vec::with_capacity(4);
            if let Ok((start, end)) = date_bounds(spec) {
                pool.extend(start.checked_sub_signed(Duration::days(1)).map(Value::Date));
                pool.extend(end.checked_add_signed(Duration::days(1)).map(Value::Date));
            }
            pool.extend(NaiveDate::from_ymd_opt(1900, 1, 1).map(Value::Date));
            pool.extend(NaiveDate::from_ymd_opt(2100, 12, 31).map(Value::Date));
            pool
        }
        _ => Vec::new(),
    }
}

fn text_pool(values: &[&str]) -> Vec<Value> {
    values.iter().map(|value| Value::from(*value)).collect()
}
