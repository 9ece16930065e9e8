use crate::{async_trait, FieldMap, Record, Result, Value};

use std::fmt::Debug;

/// The persistence seam: one method per entity per CRUD verb, plus the
/// bulk operations the seed/clear administration endpoints use.
///
/// Stores are thin pass-throughs — payloads reaching them have already been
/// validated against the entity schema. The single piece of invariant
/// preservation a store owns is reference cleanup: deleting a record nulls
/// out any field in another entity that the registry declares as
/// referencing the deleted record's entity.
///
/// Writes are whole-record and last-write-wins; there is no version check.
#[async_trait]
pub trait Store: Debug + Send + Sync + 'static {
    /// All records of an entity, optionally narrowed by one equality filter,
    /// in insertion order.
    async fn list(&self, entity: &str, filter: Option<&Filter>) -> Result<Vec<Record>>;

    /// A single record by id. Fails with `NotFound` if the id is unknown.
    async fn get(&self, entity: &str, id: i64) -> Result<Record>;

    /// Store a new record, assigning it a fresh id. Ids are monotonic and
    /// never reused, even after deletion.
    async fn insert(&self, entity: &str, fields: FieldMap) -> Result<Record>;

    /// Bulk insert, used by seeding. Returns the number of records stored.
    async fn insert_many(&self, entity: &str, rows: Vec<FieldMap>) -> Result<usize>;

    /// Merge `fields` into the record with the given id.
    async fn update(&self, entity: &str, id: i64, fields: FieldMap) -> Result<Record>;

    /// Remove a record and null out references to it. Fails with `NotFound`
    /// if the id is unknown; the collection is unchanged in that case.
    async fn delete(&self, entity: &str, id: i64) -> Result<()>;

    /// Number of records currently stored for an entity.
    async fn count(&self, entity: &str) -> Result<usize>;

    /// Remove every record of every entity. Id counters are not reset.
    async fn clear_all(&self) -> Result<()>;
}

/// A single equality filter on a field, e.g. `?category=cultural`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, fields: &FieldMap) -> bool {
        match (fields.get(&self.field), &self.value) {
            (Some(stored), wanted) => {
                if stored == wanted {
                    return true;
                }
                // Query parameters arrive as strings; compare numbers by
                // their text form so `?price=100` matches `I64(100)`.
                match (stored.as_f64(), wanted.as_str()) {
                    (Some(n), Some(s)) => s.parse::<f64>().map_or(false, |q| q == n),
                    _ => false,
                }
            }
            (None, _) => false,
        }
    }
}
