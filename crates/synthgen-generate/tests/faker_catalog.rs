use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use synthgen_core::{FieldKind, FieldSpec};
use synthgen_generate::GeneratorRegistry;
use synthgen_generate::errors::GenerationError;
use synthgen_generate::faker_rs::FakeRsAdapter;
use synthgen_generate::generators::catalog::{GENDERS, vocabulary};

#[test]
fn registry_covers_every_kind() {
    let registry = GeneratorRegistry::new();
    assert_eq!(registry.kinds().len(), FieldKind::ALL.len());
    for &kind in FieldKind::ALL {
        let generator = registry.generator(kind).expect("generator registered");
        assert_eq!(generator.kind(), kind);
    }
}

#[test]
fn unknown_type_is_rejected() {
    let registry = GeneratorRegistry::new();
    let result = registry.resolve("blood_type");
    assert!(matches!(result, Err(GenerationError::UnknownFieldType(name)) if name == "blood_type"));
}

#[test]
fn faker_kinds_produce_text() {
    let registry = GeneratorRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for &kind in FakeRsAdapter::list_kinds() {
        let spec = FieldSpec::new(kind.as_str());
        let generator = registry.generator(kind).expect("faker generator");
        let value = generator.generate(&spec, &mut rng).expect("faker value");
        let text = value.as_str().expect("text value");
        assert!(!text.is_empty(), "{kind} produced an empty string");
    }
}

#[test]
fn email_contains_at_sign() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..20 {
        let email =
            FakeRsAdapter::generate_value(FieldKind::Email, 0, &mut rng).expect("email value");
        assert!(email.contains('@'));
    }
}

#[test]
fn text_respects_max_chars() {
    let registry = GeneratorRegistry::new();
    let mut spec = FieldSpec::new("text");
    spec.max_chars = Some(60);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let generator = registry.generator(FieldKind::Text).expect("text generator");
    for _ in 0..20 {
        let value = generator.generate(&spec, &mut rng).expect("text value");
        assert!(value.as_str().map(str::len).unwrap_or_default() <= 60);
    }
}

#[test]
fn catalog_values_come_from_vocabulary() {
    let registry = GeneratorRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for kind in [
        FieldKind::Gender,
        FieldKind::TransactionType,
        FieldKind::ProductCategory,
        FieldKind::Currency,
        FieldKind::EmploymentStatus,
        FieldKind::Education,
    ] {
        let vocab = vocabulary(kind).expect("catalog kind");
        let generator = registry.generator(kind).expect("catalog generator");
        let spec = FieldSpec::new(kind.as_str());
        for _ in 0..30 {
            let value = generator.generate(&spec, &mut rng).expect("catalog value");
            assert!(vocab.contains(&value.as_str().unwrap_or_default()));
        }
    }
    assert_eq!(vocabulary(FieldKind::Gender), Some(GENDERS));
}
