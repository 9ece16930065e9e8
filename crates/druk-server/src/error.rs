use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use druk_core::FieldError;
use serde_json::json;

/// HTTP-facing error. Every variant maps to a status code and a JSON body;
/// store failures are logged server-side and surfaced as a generic 500 so
/// no internal detail leaks to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with a plain message (e.g. malformed id, unrecognized status).
    BadRequest(String),

    /// 400 with field-level validation detail.
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// 401, missing or invalid session credential.
    Unauthorized,

    /// 404 with the entity's display name, e.g. "Tour not found".
    NotFound(String),

    /// 500, generic message only.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            Self::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "errors": errors }),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Unauthorized" }),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<druk_core::Error> for ApiError {
    fn from(err: druk_core::Error) -> Self {
        use druk_core::Error;
        match err {
            Error::UnknownEntityType(entity) => {
                Self::NotFound(format!("Unknown entity type `{entity}`"))
            }
            Error::NotFound { title } => Self::NotFound(format!("{title} not found")),
            Error::SchemaValidation { entity, errors } => Self::Validation {
                message: format!("Invalid {entity} payload"),
                errors,
            },
            Error::Validation { field } => Self::Validation {
                message: "Validation failed".to_string(),
                errors: vec![FieldError::new(field, "is required")],
            },
            Error::InvalidStatus { entity, status } => Self::BadRequest(format!(
                "`{status}` is not a recognized status for {entity}"
            )),
            Error::SubmitInFlight => {
                Self::BadRequest("A submission is already in flight".to_string())
            }
            Error::Store(cause) => {
                tracing::error!(error = %cause, "store failure");
                Self::Internal
            }
        }
    }
}
