//! Form builder API with fluent interface

use super::error::ValidationErrors;
use super::field::FormField;
use super::render::FormRenderer;
use crate::scaffold::GeneratedField;
use std::collections::HashMap;

/// Builder for constructing HTML forms
///
/// # Examples
///
/// ```rust
/// use dbwebform::forms::{FormBuilder, FormField, InputType};
///
/// let html = FormBuilder::new("/", "POST")
///     .add_field(FormField::input("name", InputType::Text))
///     .submit("Submit")
///     .build();
///
/// assert!(html.contains(r#"name="name""#));
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder<'a> {
    pub(crate) action: String,
    pub(crate) method: String,
    pub(crate) fields: Vec<FormField>,
    pub(crate) submit_text: Option<String>,
    pub(crate) errors: Option<&'a ValidationErrors>,
    pub(crate) novalidate: bool,
}

impl<'a> FormBuilder<'a> {
    /// Create a new form builder with action and method
    #[must_use]
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            fields: Vec::new(),
            submit_text: None,
            errors: None,
            novalidate: false,
        }
    }

    /// Add one field per generated form field, filled from `values`
    #[must_use]
    pub fn schema_fields(mut self, fields: &[GeneratedField], values: &HashMap<String, String>) -> Self {
        self.fields.extend(
            fields
                .iter()
                .map(|f| FormField::from_generated(f).with_submitted(values)),
        );
        self
    }

    /// Add a pre-built field
    #[must_use]
    pub fn add_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the submit button text
    #[must_use]
    pub fn submit(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    /// Attach validation errors to render next to their fields
    #[must_use]
    pub const fn errors(mut self, errors: &'a ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Disable browser-side validation so the server reports every error
    #[must_use]
    pub const fn novalidate(mut self) -> Self {
        self.novalidate = true;
        self
    }

    /// Fields added so far
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Build the form HTML
    #[must_use]
    pub fn build(self) -> String {
        FormRenderer::render(&self)
    }
}
