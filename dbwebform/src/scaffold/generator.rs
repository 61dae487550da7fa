//! Mapping and form class emitter
//!
//! Emission is a pure function of a [`TableInfo`] and a [`GeneratorConfig`]:
//! nothing here touches the database or the filesystem.
//!
//! ```rust
//! use dbwebform::config::GeneratorConfig;
//! use dbwebform::schema::{Column, TableInfo};
//! use dbwebform::scaffold::CodeGenerator;
//!
//! # fn example() -> dbwebform::Result<()> {
//! let table = TableInfo::new(
//!     "users",
//!     vec![
//!         Column::new("id", "INTEGER").not_null().primary_key(),
//!         Column::new("name", "VARCHAR(100)").not_null(),
//!     ],
//!     Vec::new(),
//! );
//! let config = GeneratorConfig::default();
//! let generator = CodeGenerator::new(&table, &config)?;
//!
//! assert!(generator.generate_model()?.contains("class Users(db.Model):"));
//! assert!(generator.generate_form()?.contains("class UsersForm(FlaskForm):"));
//! # Ok(())
//! # }
//! ```

use super::field_type::SqlType;
use super::helpers::NamingHelpers;
use super::templates::TemplateRegistry;
use crate::config::{GeneratorConfig, ValidatorSettings};
use crate::error::{DbWebFormError, Result};
use crate::schema::{Column, TableInfo};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Class name used with `--default-rename`
pub const DEFAULT_CLASS_NAME: &str = "Model";

/// A validation rule attached to a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Value must be present
    Required,
    /// Value must not exceed `max` characters
    Length {
        /// Maximum character count
        max: u32,
    },
    /// Value must be an email address
    Email,
}

impl Validator {
    /// Source expression for this validator
    #[must_use]
    pub fn expression(self, settings: &ValidatorSettings) -> String {
        match self {
            Self::Required => settings.required.clone(),
            Self::Length { max } => settings.length.replace("{max}", &max.to_string()),
            Self::Email => settings.email.clone(),
        }
    }
}

/// One form field derived from a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedField {
    /// Column name
    pub name: String,
    /// Recognized column type
    pub sql_type: SqlType,
    /// Form field class name
    pub field_type: String,
    /// Human-readable label
    pub label: String,
    /// Validators in emission order
    pub validators: Vec<Validator>,
    /// Character limit, for string-family columns
    pub max_length: Option<u32>,
    /// Demo form widget name from `form.input_types`
    pub input_type: Option<String>,
    /// `[value, label]` options for a `select` widget
    pub choices: Vec<(String, String)>,
}

impl GeneratedField {
    /// Build the field for a column
    ///
    /// Validators are added in a fixed order: required, length, email.
    /// Labels, widgets and options configured for the column replace the
    /// derived ones.
    #[must_use]
    pub fn from_column(column: &Column, config: &GeneratorConfig) -> Self {
        let form = &config.form;
        let sql_type = column.sql_type();
        let max_length = column.max_length.filter(|_| sql_type.is_string_family());

        let mut validators = Vec::new();
        if column.is_required() {
            validators.push(Validator::Required);
        }
        if let Some(max) = max_length {
            validators.push(Validator::Length { max });
        }
        if column.name.to_lowercase().contains("email") {
            validators.push(Validator::Email);
        }

        Self {
            name: column.name.clone(),
            sql_type,
            field_type: sql_type.form_field(&form.field_mapping),
            label: form
                .labels
                .get(&column.name)
                .cloned()
                .unwrap_or_else(|| NamingHelpers::field_label(&column.name)),
            validators,
            max_length,
            input_type: form.input_types.get(&column.name).cloned(),
            choices: form.choices.get(&column.name).cloned().unwrap_or_default(),
        }
    }

    /// Whether the field carries the required validator
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }

    /// Whether the field carries the email validator
    #[must_use]
    pub fn is_email(&self) -> bool {
        self.validators.contains(&Validator::Email)
    }
}

/// Form fields of a table, in column order
///
/// Excluded columns and primary-key columns are skipped.
#[must_use]
pub fn form_fields(table: &TableInfo, config: &GeneratorConfig) -> Vec<GeneratedField> {
    table
        .columns()
        .iter()
        .filter(|c| !c.primary_key && !config.excludes_from_form(&c.name))
        .map(|c| GeneratedField::from_column(c, config))
        .collect()
}

/// One mapping-class column declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelColumn {
    /// Column name
    pub name: String,
    /// Type expression, e.g. `db.String(100)`
    pub type_expression: String,
    /// Positional and keyword arguments after the type, in order
    pub parameters: Vec<String>,
}

impl ModelColumn {
    /// Full argument list of the column constructor
    #[must_use]
    pub fn arguments(&self) -> String {
        std::iter::once(self.type_expression.as_str())
            .chain(self.parameters.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which parts `render_output` emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputParts {
    /// Mapping class and form class
    #[default]
    Both,
    /// Mapping class only
    ModelOnly,
    /// Form class only
    FormOnly,
}

impl OutputParts {
    /// Select the parts from the `--only-*` flags
    #[must_use]
    pub const fn from_flags(only_model: bool, only_form: bool) -> Self {
        match (only_model, only_form) {
            (true, _) => Self::ModelOnly,
            (false, true) => Self::FormOnly,
            (false, false) => Self::Both,
        }
    }

    /// Whether the mapping class is emitted
    #[must_use]
    pub const fn includes_model(self) -> bool {
        matches!(self, Self::Both | Self::ModelOnly)
    }

    /// Whether the form class is emitted
    #[must_use]
    pub const fn includes_form(self) -> bool {
        matches!(self, Self::Both | Self::FormOnly)
    }
}

/// Source emitter for one table
pub struct CodeGenerator<'a> {
    table: &'a TableInfo,
    config: &'a GeneratorConfig,
    class_name: String,
    templates: TemplateRegistry,
}

impl<'a> CodeGenerator<'a> {
    /// Create an emitter with the class name derived from the table name
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded templates fail to compile.
    pub fn new(table: &'a TableInfo, config: &'a GeneratorConfig) -> Result<Self> {
        let class_name = NamingHelpers::class_name(
            table.name(),
            &config.naming.remove_prefixes,
            &config.naming.remove_suffixes,
        );

        Ok(Self {
            table,
            config,
            class_name,
            templates: TemplateRegistry::new()?,
        })
    }

    /// Override the mapping class name; the form class follows it
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Use `Model` and `ModelForm` as class names
    #[must_use]
    pub fn with_default_rename(self) -> Self {
        self.with_class_name(DEFAULT_CLASS_NAME)
    }

    /// Mapping class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Form class name
    #[must_use]
    pub fn form_class_name(&self) -> String {
        NamingHelpers::form_class_name(&self.class_name)
    }

    /// Mapping-class columns, in column order
    #[must_use]
    pub fn model_columns(&self) -> Vec<ModelColumn> {
        let model = &self.config.model;

        self.table
            .columns()
            .iter()
            .filter(|c| !self.config.excludes_from_model(&c.name))
            .map(|column| {
                let mut parameters = Vec::new();

                // Positional arguments precede keyword arguments
                if let Some(fk) = self.table.foreign_key_for(&column.name) {
                    parameters.push(format!(
                        "{}('{}.{}')",
                        model.foreign_key_class, fk.referenced_table, fk.referenced_column
                    ));
                }
                if column.primary_key {
                    parameters.push("primary_key=True".to_string());
                } else if !column.nullable {
                    parameters.push("nullable=False".to_string());
                }
                if let Some(default) = column.default.as_deref().and_then(python_literal) {
                    parameters.push(format!("default={default}"));
                }

                let sql_type = column.sql_type();
                ModelColumn {
                    name: column.name.clone(),
                    type_expression: sql_type
                        .mapping_expression(column.max_length, &model.type_mapping),
                    parameters,
                }
            })
            .collect()
    }

    /// Form fields, in column order
    #[must_use]
    pub fn form_fields(&self) -> Vec<GeneratedField> {
        form_fields(self.table, self.config)
    }

    /// Column shown by `__repr__`
    fn repr_column(&self, columns: &[ModelColumn]) -> String {
        self.table
            .primary_keys()
            .find(|c| !self.config.excludes_from_model(&c.name))
            .map(|c| c.name.clone())
            .or_else(|| columns.first().map(|c| c.name.clone()))
            .unwrap_or_else(|| "id".to_string())
    }

    /// Render the mapping class source
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn generate_model(&self) -> Result<String> {
        let model = &self.config.model;
        let columns = self.model_columns();
        let repr_column = self.repr_column(&columns);

        let columns: Vec<_> = columns
            .iter()
            .map(|c| json!({ "name": c.name, "arguments": c.arguments() }))
            .collect();

        self.templates.render(
            "model",
            json!({
                "imports": model.imports,
                "class_name": self.class_name,
                "base_class": model.base_class,
                "table_name": self.table.name(),
                "column_class": model.column_class,
                "columns": columns,
                "repr": format!("<{class_name} {{self.{repr_column}}}>", class_name = self.class_name),
            }),
        )
    }

    /// Render the form class source
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn generate_form(&self) -> Result<String> {
        let form = &self.config.form;

        let fields: Vec<_> = self
            .form_fields()
            .iter()
            .map(|f| {
                let validators: Vec<String> = f
                    .validators
                    .iter()
                    .map(|v| v.expression(&form.default_validators))
                    .collect();
                json!({
                    "name": f.name,
                    "field_type": f.field_type,
                    "label": f.label.replace('\\', "\\\\").replace('\'', "\\'"),
                    "validators": validators,
                })
            })
            .collect();

        self.templates.render(
            "form",
            json!({
                "imports": form.imports,
                "class_name": self.form_class_name(),
                "base_class": form.base_class,
                "fields": fields,
                "submit_name": "submit",
                "submit_field": form.submit_field,
                "submit_label": form.submit_label,
            }),
        )
    }

    /// Render the selected parts as one file with section headers
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_output(&self, parts: OutputParts) -> Result<String> {
        let table = self.table.name();
        let mut sections = Vec::new();

        if parts.includes_model() {
            let body = self.generate_model()?;
            sections.push(json!({
                "title": format!("Mapping class for table '{table}'"),
                "body": body.trim_end(),
            }));
        }
        if parts.includes_form() {
            let body = self.generate_form()?;
            sections.push(json!({
                "title": format!("Form class for table '{table}'"),
                "body": body.trim_end(),
            }));
        }

        self.templates.render("output", json!({ "sections": sections }))
    }

    /// Write the selected parts to `path` and return the file written
    ///
    /// An existing directory gets a file named after the table and the
    /// selected parts.
    ///
    /// # Errors
    ///
    /// Returns [`DbWebFormError::OutputWrite`] if the file cannot be written.
    pub fn write_output(&self, path: &Path, parts: OutputParts) -> Result<PathBuf> {
        let target = if path.is_dir() {
            path.join(NamingHelpers::output_file_name(
                self.table.name(),
                parts == OutputParts::ModelOnly,
                parts == OutputParts::FormOnly,
            ))
        } else {
            path.to_path_buf()
        };

        let contents = self.render_output(parts)?;
        std::fs::write(&target, contents).map_err(|source| DbWebFormError::OutputWrite {
            path: target.clone(),
            source,
        })?;

        tracing::debug!(path = %target.display(), "Wrote generated classes");
        Ok(target)
    }
}

/// Python literal for a column default, if it is a plain literal
///
/// Engine expressions such as `CURRENT_TIMESTAMP` or `nextval(...)` have no
/// client-side equivalent and yield `None`.
fn python_literal(raw: &str) -> Option<String> {
    let raw = raw.trim();

    // PostgreSQL reports string defaults with a cast, e.g. 'x'::character varying
    let (raw, cast) = match raw.rsplit_once("::") {
        Some((value, cast)) if value.ends_with('\'') => (value, Some(cast)),
        _ => (raw, None),
    };

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        let inner = &raw[1..raw.len() - 1];

        // Negative numbers come back quoted, e.g. '-1'::integer
        if cast.is_some_and(is_numeric_cast) && is_number(inner) {
            return Some(inner.to_string());
        }
        let escaped = inner.replace('\\', "\\\\").replace("''", "\\'");
        return Some(format!("'{escaped}'"));
    }
    if is_number(raw) {
        return Some(raw.to_string());
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Some("True".to_string()),
        "false" => Some("False".to_string()),
        _ => None,
    }
}

fn is_number(raw: &str) -> bool {
    raw.parse::<i64>().is_ok() || raw.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_numeric_cast(cast: &str) -> bool {
    let base = cast.split('(').next().unwrap_or(cast).trim();
    matches!(
        base.to_ascii_lowercase().as_str(),
        "integer"
            | "bigint"
            | "smallint"
            | "int2"
            | "int4"
            | "int8"
            | "numeric"
            | "decimal"
            | "real"
            | "double precision"
            | "float4"
            | "float8"
    )
}
