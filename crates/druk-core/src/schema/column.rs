use crate::Value;

/// Describes one table column: which schema field it shows and how the raw
/// value is turned into display text.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Name of the schema field this column displays.
    pub field: String,

    /// Column heading.
    pub heading: String,

    pub transform: Option<DisplayTransform>,
}

impl ColumnDescriptor {
    pub fn new(field: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            heading: heading.into(),
            transform: None,
        }
    }

    pub fn transform(mut self, transform: DisplayTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Render a raw field value as cell text.
    pub fn render(&self, value: &Value) -> String {
        match &self.transform {
            Some(t) => t.apply(value),
            None => value.to_string(),
        }
    }
}

/// Display transforms applied to raw values before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayTransform {
    /// Prefix with a dollar sign, e.g. `1200` → `"$1200"`.
    Currency,

    /// Render booleans as `Yes`/`No`.
    YesNo,

    /// Truncate long text to `max` characters with an ellipsis.
    Truncate(usize),
}

impl DisplayTransform {
    pub fn apply(&self, value: &Value) -> String {
        match self {
            Self::Currency => {
                if value.is_null() {
                    String::new()
                } else {
                    format!("${value}")
                }
            }
            Self::YesNo => match value.as_bool() {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => value.to_string(),
            },
            Self::Truncate(max) => {
                let text = value.to_string();
                if text.chars().count() > *max {
                    let truncated: String = text.chars().take(*max).collect();
                    format!("{truncated}…")
                } else {
                    text
                }
            }
        }
    }
}
