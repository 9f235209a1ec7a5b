//! Built-in vocabularies for categorical field kinds.

use rand::{Rng, RngCore};

use synthgen_core::{FieldKind, FieldSpec, Value};

use crate::errors::GenerationError;
use crate::generators::{FieldGenerator, GeneratorRegistry};

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const TRANSACTION_TYPES: &[&str] = &[
    "Purchase",
    "Sale",
    "Refund",
    "Transfer",
    "Deposit",
    "Withdrawal",
    "Payment",
    "Fee",
    "Interest",
    "Dividend",
];
pub const PRODUCT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Books",
    "Home & Garden",
    "Sports",
    "Beauty",
    "Automotive",
    "Toys",
    "Food",
    "Health",
];
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY"];
pub const EMPLOYMENT_STATUSES: &[&str] = &[
    "Full-time",
    "Part-time",
    "Contract",
    "Freelance",
    "Unemployed",
    "Retired",
    "Student",
];
pub const EDUCATION_LEVELS: &[&str] = &[
    "High School",
    "Bachelor",
    "Master",
    "PhD",
    "Associate",
    "Certificate",
    "Diploma",
];

/// Vocabulary for a catalog kind.
pub fn vocabulary(kind: FieldKind) -> Option<&'static [&'static str]> {
    match kind {
        FieldKind::Gender => Some(GENDERS),
        FieldKind::TransactionType => Some(TRANSACTION_TYPES),
        FieldKind::ProductCategory => Some(PRODUCT_CATEGORIES),
        FieldKind::Currency => Some(CURRENCIES),
        FieldKind::EmploymentStatus => Some(EMPLOYMENT_STATUSES),
        FieldKind::Education => Some(EDUCATION_LEVELS),
        _ => None,
    }
}

pub fn register(registry: &mut GeneratorRegistry) {
    for &kind in FieldKind::ALL {
        if let Some(values) = vocabulary(kind) {
            registry.register_generator(Box::new(CatalogGenerator { kind, values }));
        }
    }
}

struct CatalogGenerator {
    kind: FieldKind,
    values: &'static [&'static str],
}

impl FieldGenerator for CatalogGenerator {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn generate(&self, _spec: &FieldSpec, rng: &mut dyn RngCore) -> Result<Value, GenerationError> {
        Ok(Value::Text(pick(self.values, rng)))
    }
}

fn pick(values: &[&str], rng: &mut dyn RngCore) -> String {
    let idx = rng.random_range(0..values.len());
    values[idx].to_string()
}
