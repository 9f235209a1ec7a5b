//! Adapter over the `fake` crate for identity-like field kinds.

use fake::Fake;
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, StateAbbr, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::RngCore;

use synthgen_core::FieldKind;

/// Kinds whose values come from the faker adapter.
pub const FAKER_KINDS: &[FieldKind] = &[
    FieldKind::Uuid,
    FieldKind::Name,
    FieldKind::Email,
    FieldKind::Phone,
    FieldKind::Address,
    FieldKind::Company,
    FieldKind::Text,
    FieldKind::City,
    FieldKind::State,
    FieldKind::Country,
    FieldKind::Zipcode,
];

pub struct FakeRsAdapter;

impl FakeRsAdapter {
    pub fn list_kinds() -> &'static [FieldKind] {
        FAKER_KINDS
    }

    /// Generate a raw faker string for `kind`; `None` for non-faker kinds.
    ///
    /// `max_chars` only applies to [`FieldKind::Text`].
    pub fn generate_value(
        kind: FieldKind,
        max_chars: usize,
        rng: &mut dyn RngCore,
    ) -> Option<String> {
        let value = match kind {
            FieldKind::Uuid => random_uuid(rng),
            FieldKind::Name => Name().fake_with_rng(rng),
            FieldKind::Email => SafeEmail().fake_with_rng(rng),
            FieldKind::Phone => PhoneNumber().fake_with_rng(rng),
            FieldKind::Address => street_address(rng),
            FieldKind::Company => CompanyName().fake_with_rng(rng),
            FieldKind::Text => paragraph(max_chars, rng),
            FieldKind::City => CityName().fake_with_rng(rng),
            FieldKind::State => StateName().fake_with_rng(rng),
            FieldKind::Country => CountryName().fake_with_rng(rng),
            FieldKind::Zipcode => ZipCode().fake_with_rng(rng),
            _ => return None,
        };
        Some(value)
    }
}

fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

fn street_address(rng: &mut dyn RngCore) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let state: String = StateAbbr().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{number} {street}, {city}, {state} {zip}")
}

/// Sentences joined until the next one would exceed `max_chars`.
fn paragraph(max_chars: usize, rng: &mut dyn RngCore) -> String {
    let mut text = String::new();
    for _ in 0..16 {
        let sentence: String = Sentence(4..10).fake_with_rng(rng);
        let extra = if text.is_empty() { 0 } else { 1 };
        if text.chars().count() + extra + sentence.chars().count() > max_chars {
            if text.is_empty() {
                text = sentence.chars().take(max_chars).collect();
                text.truncate(text.trim_end().len());
            }
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&sentence);
    }
    text
}
