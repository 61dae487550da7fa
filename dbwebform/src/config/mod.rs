//! Generator and server configuration
//!
//! Generation options come from one of two built-in presets merged with an
//! optional user JSON file. Merging is recursive: keys present in the user
//! file win, sibling keys keep their preset values, and lists are replaced
//! wholesale.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "model": {
//!     "base_class": "Base",
//!     "exclude_columns": ["created_at"],
//!     "type_mapping": { "string": "Unicode" }
//!   },
//!   "form": {
//!     "submit_label": "Save"
//!   },
//!   "naming": {
//!     "remove_prefixes": ["tbl_"]
//!   }
//! }
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use dbwebform::config::{GeneratorConfig, MappingStyle};
//! use std::path::Path;
//!
//! # fn example() -> dbwebform::Result<()> {
//! let config = GeneratorConfig::load(Some(Path::new("generator.json")), MappingStyle::Flask)?;
//! assert_eq!(config.form.base_class, "FlaskForm");
//! # Ok(())
//! # }
//! ```

use crate::error::{DbWebFormError, Result};
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Which mapping-class flavour the model preset targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingStyle {
    /// Flask-SQLAlchemy (`db.Model`, `db.Column`)
    #[default]
    Flask,
    /// Plain SQLAlchemy declarative (`Base`, `Column`)
    Classic,
}

/// Mapping class options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Base class of the generated mapping class
    pub base_class: String,
    /// Import lines emitted above the class, in order
    pub imports: Vec<String>,
    /// Columns dropped from both the mapping and the form
    pub exclude_columns: Vec<String>,
    /// Type key (`string`, `integer`, ...) to mapping type name
    pub type_mapping: BTreeMap<String, String>,
    /// Column constructor (`db.Column` or `Column`)
    pub column_class: String,
    /// Foreign key constructor (`db.ForeignKey` or `ForeignKey`)
    pub foreign_key_class: String,
}

/// Validator expressions used by the form emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSettings {
    /// Expression for required fields
    pub required: String,
    /// Expression for email-named fields
    pub email: String,
    /// Expression for length-limited fields; `{max}` is substituted
    pub length: String,
}

/// Form class options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Base class of the generated form class
    pub base_class: String,
    /// Import lines emitted above the class, in order
    pub imports: Vec<String>,
    /// Columns dropped from the form only
    pub exclude_columns: Vec<String>,
    /// Type key to form field class name
    pub field_mapping: BTreeMap<String, String>,
    /// Validator expressions
    pub default_validators: ValidatorSettings,
    /// Field class of the trailing submit field
    pub submit_field: String,
    /// Label of the trailing submit field
    pub submit_label: String,
    /// Per-column labels replacing the derived ones
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Per-column widget names for the demo form (`text`, `email`, `number`,
    /// `decimal`, `date`, `time`, `datetime-local`, `textarea`, `checkbox`,
    /// `select`)
    #[serde(default)]
    pub input_types: BTreeMap<String, String>,
    /// Options of `select` widgets as `[value, label]` pairs, per column
    #[serde(default)]
    pub choices: BTreeMap<String, Vec<(String, String)>>,
}

/// Class naming options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Table name prefixes stripped before building class names
    pub remove_prefixes: Vec<String>,
    /// Table name suffixes stripped before building class names
    pub remove_suffixes: Vec<String>,
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Mapping class settings
    pub model: ModelSettings,
    /// Form class settings
    pub form: FormSettings,
    /// Naming settings
    #[serde(default)]
    pub naming: NamingSettings,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn table(prefix: &str, entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, name)| ((*key).to_string(), format!("{prefix}{name}")))
        .collect()
}

const MODEL_TYPES: &[(&str, &str)] = &[
    ("string", "String"),
    ("text", "Text"),
    ("integer", "Integer"),
    ("big_integer", "BigInteger"),
    ("small_integer", "SmallInteger"),
    ("float", "Float"),
    ("numeric", "Numeric"),
    ("boolean", "Boolean"),
    ("date", "Date"),
    ("datetime", "DateTime"),
    ("time", "Time"),
    ("binary", "LargeBinary"),
];

const FORM_FIELDS: &[(&str, &str)] = &[
    ("string", "StringField"),
    ("text", "TextAreaField"),
    ("integer", "IntegerField"),
    ("big_integer", "IntegerField"),
    ("small_integer", "IntegerField"),
    ("float", "FloatField"),
    ("numeric", "DecimalField"),
    ("boolean", "BooleanField"),
    ("date", "DateField"),
    ("datetime", "DateTimeField"),
    ("time", "TimeField"),
    ("binary", "FileField"),
];

impl ModelSettings {
    fn preset(style: MappingStyle) -> Self {
        match style {
            MappingStyle::Flask => Self {
                base_class: "db.Model".into(),
                imports: strings(&[
                    "from flask_sqlalchemy import SQLAlchemy",
                    "from datetime import datetime",
                    "",
                    "db = SQLAlchemy()",
                ]),
                exclude_columns: strings(&["created_at", "updated_at"]),
                type_mapping: table("db.", MODEL_TYPES),
                column_class: "db.Column".into(),
                foreign_key_class: "db.ForeignKey".into(),
            },
            MappingStyle::Classic => Self {
                base_class: "Base".into(),
                imports: strings(&[
                    "from sqlalchemy import Column, ForeignKey, Integer, BigInteger, SmallInteger, String, Text, Boolean, DateTime, Date, Time, Float, Numeric, LargeBinary",
                    "from sqlalchemy.orm import declarative_base",
                    "",
                    "Base = declarative_base()",
                ]),
                exclude_columns: strings(&["created_at", "updated_at"]),
                type_mapping: table("", MODEL_TYPES),
                column_class: "Column".into(),
                foreign_key_class: "ForeignKey".into(),
            },
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            base_class: "FlaskForm".into(),
            imports: strings(&[
                "from flask_wtf import FlaskForm",
                "from wtforms import StringField, TextAreaField, IntegerField, FloatField, DecimalField, BooleanField, DateField, DateTimeField, TimeField, FileField, SubmitField",
                "from wtforms.validators import DataRequired, Email, Length",
            ]),
            exclude_columns: Vec::new(),
            field_mapping: table("", FORM_FIELDS),
            default_validators: ValidatorSettings {
                required: "DataRequired()".into(),
                email: "Email()".into(),
                length: "Length(max={max})".into(),
            },
            submit_field: "SubmitField".into(),
            submit_label: "Submit".into(),
            labels: BTreeMap::new(),
            input_types: BTreeMap::new(),
            choices: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Built-in defaults for a mapping style
    #[must_use]
    pub fn preset(style: MappingStyle) -> Self {
        Self {
            model: ModelSettings::preset(style),
            form: FormSettings::default(),
            naming: NamingSettings::default(),
        }
    }

    /// Load the preset for `style`, merged with the JSON file at `path`
    ///
    /// # Errors
    ///
    /// - [`DbWebFormError::ConfigNotFound`] when `path` does not exist
    /// - [`DbWebFormError::ConfigParse`] when the file is not valid JSON or
    ///   a value has the wrong shape
    pub fn load(path: Option<&Path>, style: MappingStyle) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::preset(style));
        };

        // Absolute path so figment does not search parent directories
        let path = std::fs::canonicalize(path)
            .map_err(|_| DbWebFormError::ConfigNotFound(path.to_path_buf()))?;

        tracing::debug!(path = %path.display(), "Loading generator configuration");
        Self::merged(style, Json::file(path))
    }

    /// Merge a JSON document over the preset for `style`
    ///
    /// # Errors
    ///
    /// Returns [`DbWebFormError::ConfigParse`] on malformed input.
    pub fn from_json_str(json: &str, style: MappingStyle) -> Result<Self> {
        Self::merged(style, Json::string(json))
    }

    fn merged(style: MappingStyle, overrides: impl figment::Provider) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::preset(style)))
            .merge(overrides)
            .extract()?;
        Ok(config)
    }

    /// Whether `column` is dropped from the mapping class
    #[must_use]
    pub fn excludes_from_model(&self, column: &str) -> bool {
        self.model.exclude_columns.iter().any(|c| c == column)
    }

    /// Whether `column` is dropped from the form class
    #[must_use]
    pub fn excludes_from_form(&self, column: &str) -> bool {
        self.excludes_from_model(column) || self.form.exclude_columns.iter().any(|c| c == column)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::preset(MappingStyle::Flask)
    }
}

/// Demo web server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address to bind
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".into(),
        }
    }
}

impl ServerSettings {
    /// Defaults overridden by `DBWEBFORM_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`DbWebFormError::ConfigParse`] when an environment value has
    /// the wrong shape.
    pub fn from_env() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("DBWEBFORM_"))
            .extract()?;
        Ok(settings)
    }
}
