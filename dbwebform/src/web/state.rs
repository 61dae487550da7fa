//! Shared state for the demo form server

use crate::config::GeneratorConfig;
use crate::scaffold::{form_fields, GeneratedField, NamingHelpers};
use crate::schema::TableInfo;
use std::sync::Arc;

/// Immutable form schema shared by every request
///
/// Built once from the reflected table at startup.
///
/// ```rust
/// use dbwebform::config::GeneratorConfig;
/// use dbwebform::schema::{Column, TableInfo};
/// use dbwebform::web::FormState;
///
/// let table = TableInfo::new(
///     "blog_posts",
///     vec![Column::new("id", "INTEGER").primary_key(), Column::new("title", "TEXT")],
///     Vec::new(),
/// );
/// let state = FormState::from_table(&table, &GeneratorConfig::default());
///
/// assert_eq!(state.title(), "Blog Posts");
/// assert_eq!(state.fields().len(), 1);
/// ```
#[derive(Clone)]
pub struct FormState {
    table: Arc<str>,
    title: Arc<str>,
    fields: Arc<[GeneratedField]>,
    submit_label: Arc<str>,
}

impl FormState {
    /// State for a reflected table
    #[must_use]
    pub fn from_table(table: &TableInfo, config: &GeneratorConfig) -> Self {
        Self {
            table: table.name().into(),
            title: NamingHelpers::field_label(table.name()).into(),
            fields: form_fields(table, config).into(),
            submit_label: config.form.submit_label.as_str().into(),
        }
    }

    /// Name of the table behind the form
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Page heading
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Form fields in column order
    #[must_use]
    pub fn fields(&self) -> &[GeneratedField] {
        &self.fields
    }

    /// Submit button text
    #[must_use]
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }
}

impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("table", &self.table)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
