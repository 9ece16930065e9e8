use crate::FormController;

use druk_core::{ColumnDescriptor, EntitySchema, Record};

/// View model behind the CRUD listing table.
///
/// Holds the records as supplied — the table imposes no sort order of its
/// own — and projects them through the column descriptors into display
/// cells. The presentation shell renders [`TableState`] and routes the
/// add/edit/delete affordances back through this model.
#[derive(Debug)]
pub struct TableModel {
    schema: EntitySchema,
    records: Vec<Record>,
    loading: bool,
}

/// What the table shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    /// A fetch is pending; render a placeholder instead of rows.
    Loading,

    /// No records and not loading; render an explicit empty-state message.
    Empty,

    Rows(Vec<Row>),
}

/// One rendered record: its id plus one display cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub cells: Vec<String>,
}

impl TableModel {
    pub fn new(schema: &EntitySchema) -> Self {
        Self {
            schema: schema.clone(),
            records: Vec::new(),
            loading: true,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.schema.columns
    }

    pub fn headings(&self) -> Vec<&str> {
        self.schema
            .columns
            .iter()
            .map(|c| c.heading.as_str())
            .collect()
    }

    /// Replace the displayed records (e.g. after a gateway re-fetch).
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.loading = false;
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn state(&self) -> TableState {
        if self.loading {
            return TableState::Loading;
        }
        if self.records.is_empty() {
            return TableState::Empty;
        }
        TableState::Rows(
            self.records
                .iter()
                .map(|record| Row {
                    id: record.id,
                    cells: self
                        .schema
                        .columns
                        .iter()
                        .map(|column| column.render(record.value(&column.field)))
                        .collect(),
                })
                .collect(),
        )
    }

    /// "Add" affordance: a fresh create-flow form.
    pub fn add(&self) -> FormController {
        FormController::create(&self.schema)
    }

    /// "Edit" affordance: an update-flow form for the selected row, if it
    /// is still displayed.
    pub fn edit(&self, id: i64) -> Option<FormController> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(|record| FormController::edit(&self.schema, record))
    }

    /// "Delete" affordance: the id to delete, if the row is still
    /// displayed. Deletion itself goes straight to the gateway — no undo.
    pub fn delete(&self, id: i64) -> Option<i64> {
        self.records.iter().any(|r| r.id == id).then_some(id)
    }

    /// Drop a row locally, e.g. after the server reported it gone (404).
    pub fn remove_row(&mut self, id: i64) {
        self.records.retain(|r| r.id != id);
    }
}
