use crate::{EntitySchema, Error, FieldMap, Record, Result, Value};

use serde::{Deserialize, Serialize};

/// A client-local, not-yet-submitted copy of a record's fields.
///
/// Drafts follow an immutable-update discipline: [`with`](Self::with)
/// returns a new draft with exactly one field replaced, so a caller holding
/// the previous draft never observes the edit. Discarded on cancel,
/// promoted to a submission on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    fields: FieldMap,
}

impl Draft {
    /// An empty skeleton for a create flow: every schema field at its
    /// initial value.
    pub fn empty(schema: &EntitySchema) -> Self {
        Self {
            fields: schema.empty_draft(),
        }
    }

    /// A draft pre-populated from an existing record, for an update flow.
    pub fn from_record(record: &Record) -> Self {
        Self {
            fields: record.fields.clone(),
        }
    }

    /// Returns a new draft with `field` set to `value` and every other
    /// field unchanged.
    #[must_use]
    pub fn with(&self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(field.into(), value.into());
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// The first required field that is missing or empty, if any. This is
    /// the client-side gate: submission must not reach the network while
    /// this returns an error.
    pub fn check_required(&self, schema: &EntitySchema) -> Result<()> {
        for field in schema.required_fields() {
            let missing = self
                .fields
                .get(&field.name)
                .map_or(true, Value::is_empty);
            if missing {
                return Err(Error::Validation {
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<FieldMap> for Draft {
    fn from(fields: FieldMap) -> Self {
        Self { fields }
    }
}
