mod form;
pub use form::{Flow, FormController, Submission};

mod gateway;
pub use gateway::{Gateway, MutationCause, MutationError, Operation, SeedCounts};

mod table;
pub use table::{Row, TableModel, TableState};
