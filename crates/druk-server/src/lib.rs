pub mod auth;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

pub use error::ApiError;
pub use routes::app;
pub use state::{AppState, SharedState};
