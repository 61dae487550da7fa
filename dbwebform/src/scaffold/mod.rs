//! Source generation for mapping and form classes
//!
//! Turns a reflected [`TableInfo`](crate::schema::TableInfo) into the text
//! of a mapping class and a form class. Type recognition, naming and
//! templating each live in their own module; [`CodeGenerator`] ties them
//! together.

pub mod field_type;
pub mod generator;
pub mod helpers;
pub mod templates;

pub use field_type::SqlType;
pub use generator::{
    form_fields, CodeGenerator, GeneratedField, ModelColumn, OutputParts, Validator,
    DEFAULT_CLASS_NAME,
};
pub use helpers::NamingHelpers;
