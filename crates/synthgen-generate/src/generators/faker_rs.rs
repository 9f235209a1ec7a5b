use rand::RngCore;

use synthgen_core::{FieldKind, FieldSpec, Value};

use crate::errors::GenerationError;
use crate::faker_rs::FakeRsAdapter;
use crate::generators::{FieldGenerator, GeneratorRegistry};

const DEFAULT_TEXT_MAX_CHARS: usize = 200;

pub fn register(registry: &mut GeneratorRegistry) {
    for &kind in FakeRsAdapter::list_kinds() {
        registry.register_generator(Box::new(FakerAdapterGenerator { kind }));
    }
}

struct FakerAdapterGenerator {
    kind: FieldKind,
}

impl FieldGenerator for FakerAdapterGenerator {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn generate(&self, spec: &FieldSpec, rng: &mut dyn RngCore) -> Result<Value, GenerationError> {
        let max_chars = spec.max_chars.unwrap_or(DEFAULT_TEXT_MAX_CHARS);
        FakeRsAdapter::generate_value(self.kind, max_chars, rng)
            .map(Value::Text)
            .ok_or_else(|| {
                GenerationError::InvalidField(format!("no faker available for '{}'", self.kind))
            })
    }
}
