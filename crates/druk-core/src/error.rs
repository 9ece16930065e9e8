use serde::{Deserialize, Serialize};

/// A single field-level validation failure, as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// An error that can occur in the Druk CRUD layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entity type was never registered with the schema registry.
    #[error("unknown entity type `{0}`")]
    UnknownEntityType(String),

    /// A required field was missing or empty at submit time. Raised
    /// client-side, before any network call is made.
    #[error("required field `{field}` is empty")]
    Validation { field: String },

    /// The submitted payload failed schema validation. Raised server-side
    /// and surfaced as HTTP 400 with field-level detail.
    #[error("invalid {entity} payload")]
    SchemaValidation {
        entity: String,
        errors: Vec<FieldError>,
    },

    /// An id-addressed operation targeted a record that does not exist.
    /// `title` is the entity's display name, e.g. "Tour".
    #[error("{title} not found")]
    NotFound { title: String },

    /// A status transition named a value outside the entity's enumerated
    /// status set.
    #[error("`{status}` is not a recognized status for {entity}")]
    InvalidStatus { entity: String, status: String },

    /// A submit was attempted while a previous one for the same draft was
    /// still in flight.
    #[error("a submission is already in flight")]
    SubmitInFlight,

    /// Any failure inside a store driver.
    #[error("store error")]
    Store(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
