mod column;
pub use column::{ColumnDescriptor, DisplayTransform};

mod entity;
pub use entity::EntitySchema;

mod field;
pub use field::{FieldDescriptor, FieldKind};

mod registry;
pub use registry::Registry;
