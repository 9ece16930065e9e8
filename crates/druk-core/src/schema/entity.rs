use super::{ColumnDescriptor, FieldDescriptor, FieldKind};
use crate::FieldMap;

/// The full schema of one manageable entity type: its editable fields and
/// the subset shown as table columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    /// URL path segment and registry key, e.g. `tours`.
    pub entity: String,

    /// Singular display name, e.g. `Tour`. Used in user-facing messages
    /// ("Tour not found").
    pub title: String,

    /// Ordered field descriptors.
    pub fields: Vec<FieldDescriptor>,

    /// Columns shown by the table renderer. Every column references a
    /// field present in `fields`.
    pub columns: Vec<ColumnDescriptor>,
}

impl EntitySchema {
    pub fn new(entity: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            title: title.into(),
            fields: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that must carry a non-empty value at submit time.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// A fresh draft with every field at its initial value.
    pub fn empty_draft(&self) -> FieldMap {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect()
    }

    /// The enumerated status set, if this entity carries a `status` field.
    /// Entities without one do not support the status-transition endpoint.
    pub fn status_options(&self) -> Option<&[String]> {
        match self.field_by_name("status").map(|f| &f.kind) {
            Some(FieldKind::Select { options }) => Some(options),
            _ => None,
        }
    }
}
