use crate::Value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered field-name → value mapping. Field order follows the entity
/// schema's declaration order.
pub type FieldMap = IndexMap<String, Value>;

/// A stored record: an opaque id assigned by the store at creation, plus
/// the record's field values.
///
/// Ids are never reassigned and never reused after deletion. On the wire
/// the fields flatten next to the id: `{"id": 3, "name": "Druk Trek", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,

    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: i64, fields: FieldMap) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Like [`get`](Self::get), but absent fields read as null.
    pub fn value(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }
}
