//! Table schema snapshots and database reflection
//!
//! [`reflect_table`] opens a single connection, reads one table's columns and
//! foreign keys from the engine catalog, and closes the connection again.
//!
//! ```rust,no_run
//! # async fn example() -> dbwebform::Result<()> {
//! let table = dbwebform::schema::reflect_table("sqlite://app.db", "users").await?;
//! for column in table.columns() {
//!     println!("{} {}", column.name, column.declared_type);
//! }
//! # Ok(())
//! # }
//! ```

mod reader;

pub use reader::{reflect_table, DatabaseKind};

use crate::scaffold::field_type::SqlType;

/// One column of a reflected table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Type name as reported by the engine (`VARCHAR(100)`, `character varying`)
    pub declared_type: String,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Raw default expression
    pub default: Option<String>,
    /// Member of the primary key
    pub primary_key: bool,
    /// Character length limit, when the engine reports one
    pub max_length: Option<u32>,
}

impl Column {
    /// Create a nullable, non-key column with no default
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        let max_length = SqlType::character_length(&declared_type);
        Self {
            name: name.into(),
            declared_type,
            nullable: true,
            default: None,
            primary_key: false,
            max_length,
        }
    }

    /// Mark the column NOT NULL
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column as (part of) the primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the raw default expression
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Recognized source type of this column
    #[must_use]
    pub fn sql_type(&self) -> SqlType {
        SqlType::parse(&self.declared_type).0
    }

    /// Whether the column is required on input (NOT NULL and not a key)
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.nullable && !self.primary_key
    }
}

/// A foreign key constraint on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constrained column in this table
    pub column: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

/// Immutable snapshot of one reflection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    name: String,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
}

impl TableInfo {
    /// Build a snapshot; later duplicates of a column name are dropped
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>, foreign_keys: Vec<ForeignKey>) -> Self {
        let mut unique: Vec<Column> = Vec::with_capacity(columns.len());
        for column in columns {
            if unique.iter().all(|c| c.name != column.name) {
                unique.push(column);
            }
        }

        Self {
            name: name.into(),
            columns: unique,
            foreign_keys,
        }
    }

    /// Table name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in catalog order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Foreign key constraints
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Foreign key constraining `column`, if any
    #[must_use]
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    /// Primary key columns in catalog order
    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }
}
