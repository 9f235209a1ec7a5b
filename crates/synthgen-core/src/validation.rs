use serde_json::Value as JsonValue;
use tracing::warn;

use crate::error::{Error, Result};
use crate::schema::{FieldKind, Schema};

/// Structural check of a raw schema document.
///
/// Malformed schemas are reported as `false` and the reason is logged; use
/// [`parse_schema`] to get the reason as an error.
pub fn validate_schema(raw: &JsonValue) -> bool {
    match parse_schema(raw) {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "schema rejected");
            false
        }
    }
}

/// Parse a raw schema document and check its structure.
///
/// This checks:
/// - the document is an object with a `fields` object
/// - every field is an object declaring `type`
/// - `integer`/`float` fields declare `min` and `max`
/// - numeric fields declaring both bounds have `min < max`
/// - `choice` fields declare a non-empty `options` array
/// - `date` fields declare `start` and `end`
///
/// Unknown type names and date formats are left to generation.
pub fn parse_schema(raw: &JsonValue) -> Result<Schema> {
    let document = raw
        .as_object()
        .ok_or_else(|| Error::InvalidSchema("schema must be a JSON object".to_string()))?;
    let fields = document
        .get("fields")
        .ok_or_else(|| Error::InvalidSchema("missing 'fields'".to_string()))?
        .as_object()
        .ok_or_else(|| Error::InvalidSchema("'fields' must be an object".to_string()))?;

    for (name, metadata) in fields {
        let metadata = metadata.as_object().ok_or_else(|| {
            Error::InvalidSchema(format!("field '{name}' metadata must be an object"))
        })?;
        if !metadata.get("type").is_some_and(JsonValue::is_string) {
            return Err(Error::InvalidSchema(format!(
                "field '{name}' must declare a string 'type'"
            )));
        }
    }

    let schema: Schema = serde_json::from_value(raw.clone())?;
    check_schema(&schema)?;
    Ok(schema)
}

/// Check the structural invariants of a typed schema.
pub fn check_schema(schema: &Schema) -> Result<()> {
    for field in &schema.fields {
        let name = &field.name;
        let spec = &field.spec;
        if spec.field_type.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "field '{name}' must declare 'type'"
            )));
        }

        let kind = spec.kind();
        if matches!(kind, Some(FieldKind::Integer | FieldKind::Float))
            && (spec.min.is_none() || spec.max.is_none())
        {
            return Err(Error::InvalidSchema(format!(
                "field '{name}' must declare 'min' and 'max'"
            )));
        }

        if kind.is_some_and(FieldKind::is_numeric)
            && let (Some(min), Some(max)) = (spec.min, spec.max)
            && min >= max
        {
            return Err(Error::InvalidSchema(format!(
                "field '{name}' min must be < max"
            )));
        }

        match kind {
            Some(FieldKind::Choice) => {
                if spec.options.as_ref().is_none_or(Vec::is_empty) {
                    return Err(Error::InvalidSchema(format!(
                        "field '{name}' must declare non-empty 'options'"
                    )));
                }
            }
            Some(FieldKind::Date) => {
                if spec.start.is_none() || spec.end.is_none() {
                    return Err(Error::InvalidSchema(format!(
                        "field '{name}' must declare 'start' and 'end'"
                    )));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_unknown_types_structurally() {
        let raw = json!({"fields": {"blob": {"type": "hologram"}}});
        assert!(validate_schema(&raw));
    }

    #[test]
    fn rejects_missing_fields_object() {
        assert!(!validate_schema(&json!({"columns": {}})));
        assert!(!validate_schema(&json!({"fields": []})));
        assert!(!validate_schema(&json!("fields")));
    }

    #[test]
    fn rejects_non_object_metadata() {
        let raw = json!({"fields": {"test_field": "invalid_type"}});
        assert!(!validate_schema(&raw));
    }
}
