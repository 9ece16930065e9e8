mod draft;
pub use draft::Draft;

mod error;
pub use error::{Error, FieldError};

mod record;
pub use record::{FieldMap, Record};

pub mod schema;
pub use schema::{ColumnDescriptor, EntitySchema, FieldDescriptor, FieldKind, Registry};

pub mod store;
pub use store::{Filter, Store};

mod validate;
pub use validate::{validate_submission, Mode};

mod value;
pub use value::Value;

/// A Result type alias that uses Druk's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
