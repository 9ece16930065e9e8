use crate::Value;

/// Describes one editable field of an entity schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Unique key within the containing schema.
    pub name: String,

    /// Display text for form labels and default column headings.
    pub label: String,

    /// Which values the field accepts.
    pub kind: FieldKind,

    /// True if a submission must carry a non-empty value for this field.
    pub required: bool,

    /// Explicit default used when building an empty draft and when
    /// normalizing a create payload. Falls back to the kind's default.
    pub default: Option<Value>,

    /// Entity type this field references, if it holds another record's id.
    /// Deleting the referenced record nulls this field out.
    pub references: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
            references: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn references(mut self, entity: impl Into<String>) -> Self {
        self.references = Some(entity.into());
        self
    }

    /// The value a fresh draft starts with for this field.
    pub fn initial_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.default_value())
    }
}

/// The set of input kinds the form renderer knows how to present.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input
    Text,

    /// Multi-line text area
    LongText,

    /// Integer or float input
    Number,

    /// Single choice from an enumerated set
    Select { options: Vec<String> },

    /// Checkbox
    Bool,
}

impl FieldKind {
    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Select {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Type-appropriate default for an empty draft.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Text | Self::LongText => Value::String(String::new()),
            Self::Number | Self::Select { .. } => Value::Null,
            Self::Bool => Value::Bool(false),
        }
    }

    /// True if `value` type-conforms to this kind. Null always conforms;
    /// required-ness is checked separately.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Text | Self::LongText, Value::String(_)) => true,
            (Self::Number, v) => v.is_number(),
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Select { options }, Value::String(s)) => options.iter().any(|o| o == s),
            _ => false,
        }
    }
}
