//! Form field types and input configuration

use crate::scaffold::{GeneratedField, SqlType};
use std::collections::HashMap;

/// HTML input types used by generated forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Email input
    Email,
    /// Whole number input
    Number,
    /// Decimal number input (`step="any"`)
    Decimal,
    /// Date input
    Date,
    /// Time input
    Time,
    /// Date and time input
    DateTimeLocal,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number | Self::Decimal => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTimeLocal => "datetime-local",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line input
    Input(InputType),
    /// Multi-line text
    Textarea,
    /// Checkbox
    Checkbox {
        /// Whether the box is ticked
        checked: bool,
    },
    /// Drop-down of fixed options
    Select,
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Input(InputType::default())
    }
}

impl FieldKind {
    /// Widget for a configured widget name
    ///
    /// ```
    /// use dbwebform::forms::{FieldKind, InputType};
    ///
    /// assert_eq!(FieldKind::from_name("datetime-local"), Some(FieldKind::Input(InputType::DateTimeLocal)));
    /// assert_eq!(FieldKind::from_name("select"), Some(FieldKind::Select));
    /// assert_eq!(FieldKind::from_name("slider"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Input(InputType::Text),
            "email" => Self::Input(InputType::Email),
            "number" => Self::Input(InputType::Number),
            "decimal" => Self::Input(InputType::Decimal),
            "date" => Self::Input(InputType::Date),
            "time" => Self::Input(InputType::Time),
            "datetime-local" | "datetime" => Self::Input(InputType::DateTimeLocal),
            "textarea" => Self::Textarea,
            "checkbox" => Self::Checkbox { checked: false },
            "select" => Self::Select,
            _ => return None,
        };
        Some(kind)
    }

    fn for_type(sql_type: SqlType, email: bool) -> Self {
        match sql_type {
            SqlType::Boolean => Self::Checkbox { checked: false },
            t if t.is_integer_family() => Self::Input(InputType::Number),
            SqlType::Float | SqlType::Numeric => Self::Input(InputType::Decimal),
            SqlType::Date => Self::Input(InputType::Date),
            SqlType::DateTime => Self::Input(InputType::DateTimeLocal),
            SqlType::Time => Self::Input(InputType::Time),
            _ if email => Self::Input(InputType::Email),
            SqlType::Text => Self::Textarea,
            _ => Self::Input(InputType::Text),
        }
    }
}

/// A form field with its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name (used for form submission)
    pub name: String,
    /// Field kind
    pub kind: FieldKind,
    /// Label text
    pub label: String,
    /// Current value
    pub value: Option<String>,
    /// Whether a value must be supplied
    pub required: bool,
    /// Maximum character count
    pub max_length: Option<u32>,
    /// Whether the value must be an email address
    pub email: bool,
    /// `(value, label)` pairs of a select
    pub options: Vec<(String, String)>,
}

impl FormField {
    /// Create an input field
    #[must_use]
    pub fn input(name: impl Into<String>, input_type: InputType) -> Self {
        Self::new(name, FieldKind::Input(input_type))
    }

    /// Create a textarea field
    #[must_use]
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    /// Create an unticked checkbox
    #[must_use]
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox { checked: false })
    }

    /// Create a select with `(value, label)` options
    #[must_use]
    pub fn select(name: impl Into<String>, options: Vec<(String, String)>) -> Self {
        Self {
            options,
            ..Self::new(name, FieldKind::Select)
        }
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            value: None,
            required: false,
            max_length: None,
            email: false,
            options: Vec::new(),
        }
    }

    /// HTML field for a generated form field
    ///
    /// A widget configured for the column wins. Otherwise the column type
    /// picks it, and email-named columns that are not otherwise typed get an
    /// email input. Email-named columns are checked as addresses whatever
    /// their widget, like the generated form class. Checkboxes are never
    /// required, since an unticked box submits nothing.
    #[must_use]
    pub fn from_generated(field: &GeneratedField) -> Self {
        let configured = field.input_type.as_deref().and_then(|name| {
            let kind = FieldKind::from_name(name);
            if kind.is_none() {
                tracing::warn!(field = %field.name, widget = name, "Unknown widget, using column type");
            }
            kind
        });
        let kind = configured.unwrap_or_else(|| FieldKind::for_type(field.sql_type, field.is_email()));

        Self {
            name: field.name.clone(),
            kind,
            label: field.label.clone(),
            value: None,
            required: field.is_required() && !matches!(kind, FieldKind::Checkbox { .. }),
            max_length: field.max_length,
            email: field.is_email(),
            options: field.choices.clone(),
        }
    }

    /// Fill the field from submitted form values
    #[must_use]
    pub fn with_submitted(mut self, values: &HashMap<String, String>) -> Self {
        let submitted = values.get(&self.name);
        match &mut self.kind {
            FieldKind::Checkbox { checked } => *checked = submitted.is_some(),
            FieldKind::Input(_) | FieldKind::Textarea | FieldKind::Select => {
                self.value = submitted.cloned();
            }
        }
        self
    }

    /// Submitted value, trimmed; `None` when blank
    #[must_use]
    pub fn trimmed_value(&self) -> Option<&str> {
        self.value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Check if this field is a checkbox
    #[must_use]
    pub const fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, MappingStyle};
    use crate::schema::Column;

    fn field_for(column: Column) -> FormField {
        FormField::from_generated(&GeneratedField::from_column(&column, &GeneratorConfig::default()))
    }

    #[test]
    fn test_input_type_as_str() {
        assert_eq!(InputType::Email.as_str(), "email");
        assert_eq!(InputType::Decimal.as_str(), "number");
        assert_eq!(InputType::DateTimeLocal.as_str(), "datetime-local");
    }

    #[test]
    fn test_widget_selection() {
        assert_eq!(field_for(Column::new("age", "INTEGER")).kind, FieldKind::Input(InputType::Number));
        assert_eq!(field_for(Column::new("price", "NUMERIC(10,2)")).kind, FieldKind::Input(InputType::Decimal));
        assert_eq!(field_for(Column::new("bio", "TEXT")).kind, FieldKind::Textarea);
        assert_eq!(field_for(Column::new("born", "DATE")).kind, FieldKind::Input(InputType::Date));
        assert_eq!(field_for(Column::new("seen_at", "TIMESTAMP")).kind, FieldKind::Input(InputType::DateTimeLocal));
        assert_eq!(field_for(Column::new("opens", "TIME")).kind, FieldKind::Input(InputType::Time));
        assert_eq!(field_for(Column::new("photo", "BLOB")).kind, FieldKind::Input(InputType::Text));
    }

    #[test]
    fn test_email_columns() {
        assert_eq!(field_for(Column::new("user_email", "TEXT")).kind, FieldKind::Input(InputType::Email));
        assert!(field_for(Column::new("email_verified", "BOOLEAN")).is_checkbox());
    }

    #[test]
    fn test_email_named_typed_column_keeps_email_check() {
        let field = field_for(Column::new("backup_email", "INTEGER"));
        assert_eq!(field.kind, FieldKind::Input(InputType::Number));
        assert!(field.email);
    }

    #[test]
    fn test_configured_widget_label_and_options() {
        let json = r#"{
            "form": {
                "labels": { "status": "Post status" },
                "input_types": { "status": "select", "summary": "textarea", "age": "slider" },
                "choices": { "status": [["draft", "Draft"], ["live", "Published"]] }
            }
        }"#;
        let config = GeneratorConfig::from_json_str(json, MappingStyle::Flask).unwrap();
        let build = |column: Column| FormField::from_generated(&GeneratedField::from_column(&column, &config));

        let status = build(Column::new("status", "VARCHAR(10)").not_null());
        assert_eq!(status.kind, FieldKind::Select);
        assert_eq!(status.label, "Post status");
        assert_eq!(status.options.len(), 2);
        assert!(status.required);

        assert_eq!(build(Column::new("summary", "VARCHAR(200)")).kind, FieldKind::Textarea);
        assert_eq!(build(Column::new("age", "INTEGER")).kind, FieldKind::Input(InputType::Number));
    }

    #[test]
    fn test_checkbox_never_required() {
        let field = field_for(Column::new("active", "BOOLEAN").not_null());
        assert!(field.is_checkbox());
        assert!(!field.required);
    }

    #[test]
    fn test_required_and_length() {
        let field = field_for(Column::new("name", "VARCHAR(100)").not_null());
        assert!(field.required);
        assert_eq!(field.max_length, Some(100));
        assert_eq!(field.label, "Name");
    }

    #[test]
    fn test_with_submitted() {
        let values = HashMap::from([
            ("name".to_string(), "  Ada ".to_string()),
            ("active".to_string(), "y".to_string()),
        ]);

        let name = FormField::input("name", InputType::Text).with_submitted(&values);
        assert_eq!(name.trimmed_value(), Some("Ada"));

        let active = FormField::checkbox("active").with_submitted(&values);
        assert_eq!(active.kind, FieldKind::Checkbox { checked: true });

        let missing = FormField::checkbox("other").with_submitted(&values);
        assert_eq!(missing.kind, FieldKind::Checkbox { checked: false });
    }
}
