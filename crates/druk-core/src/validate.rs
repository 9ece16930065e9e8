use crate::{EntitySchema, Error, FieldError, FieldKind, FieldMap, Result};

/// Whether a submission creates a new record or amends an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field must be present; missing optional fields are
    /// filled with their initial values so no record is stored partial.
    Create,

    /// Only the fields present in the payload are validated; absent fields
    /// keep their stored values.
    Update,
}

/// Validate an inbound payload against an entity schema and return the
/// normalized field map that may be handed to the store.
///
/// Unknown fields are stripped. All violations are collected so the client
/// can surface every field error at once.
pub fn validate_submission(schema: &EntitySchema, payload: &FieldMap, mode: Mode) -> Result<FieldMap> {
    let mut errors = Vec::new();
    let mut normalized = FieldMap::new();

    for field in &schema.fields {
        match payload.get(&field.name) {
            Some(value) => {
                if !field.kind.accepts(value) {
                    errors.push(FieldError::new(&field.name, kind_message(&field.kind)));
                } else if field.required && value.is_empty() {
                    errors.push(FieldError::new(&field.name, "is required"));
                } else {
                    normalized.insert(field.name.clone(), value.clone());
                }
            }
            None => match mode {
                Mode::Create if field.required => {
                    errors.push(FieldError::new(&field.name, "is required"));
                }
                Mode::Create => {
                    normalized.insert(field.name.clone(), field.initial_value());
                }
                Mode::Update => {}
            },
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(Error::SchemaValidation {
            entity: schema.entity.clone(),
            errors,
        })
    }
}

fn kind_message(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text | FieldKind::LongText => "must be a string".to_string(),
        FieldKind::Number => "must be a number".to_string(),
        FieldKind::Bool => "must be a boolean".to_string(),
        FieldKind::Select { options } => format!("must be one of: {}", options.join(", ")),
    }
}
