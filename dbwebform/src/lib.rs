//! dbwebform: mapping classes and web forms from live database tables
//!
//! A table is reflected from `SQLite` or `PostgreSQL`, its column types are
//! mapped onto a fixed vocabulary, and two Python classes are emitted: an ORM
//! mapping class and a web form class with validators. The same reflected
//! schema also drives a one-page demo form server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dbwebform::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let table = reflect_table("sqlite://app.db", "users").await?;
//!     let config = GeneratorConfig::default();
//!
//!     let generator = CodeGenerator::new(&table, &config)?;
//!     println!("{}", generator.render_output(OutputParts::Both)?);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`schema`]: table reflection
//! - [`scaffold`]: type mapping, naming and class emission
//! - [`config`]: generator presets and JSON overrides
//! - [`forms`] and [`web`]: the demo form page

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod forms;
pub mod observability;
pub mod scaffold;
pub mod schema;
pub mod web;

pub use error::{DbWebFormError, Result};

pub mod prelude {
    //! Convenience re-exports for common types
    //!
    //! ```rust
    //! use dbwebform::prelude::*;
    //! ```

    pub use crate::config::{GeneratorConfig, MappingStyle, ServerSettings};
    pub use crate::error::{DbWebFormError, Result};
    pub use crate::scaffold::{CodeGenerator, NamingHelpers, OutputParts, SqlType};
    pub use crate::schema::{reflect_table, Column, ForeignKey, TableInfo};
    pub use crate::web::{router, serve, FormState};
}
