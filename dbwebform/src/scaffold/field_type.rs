//! Column type recognition for code generation
//!
//! Engines report declared types in many spellings (`VARCHAR(100)`,
//! `character varying`, `int8`). This module folds them into a closed
//! [`SqlType`] and resolves the configured mapping and form names for it.
//!
//! # Recognized Types
//!
//! | `SqlType`  | Config key      | Declared names                              |
//! |------------|-----------------|---------------------------------------------|
//! | `Varchar`  | `string`        | varchar, character varying, nvarchar        |
//! | `Char`     | `string`        | char, character, nchar, bpchar              |
//! | `Text`     | `text`          | text, clob, mediumtext, longtext            |
//! | `Integer`  | `integer`       | integer, int, int4, mediumint, serial       |
//! | `BigInt`   | `big_integer`   | bigint, int8, bigserial                     |
//! | `SmallInt` | `small_integer` | smallint, int2, tinyint, smallserial        |
//! | `Float`    | `float`         | float, real, double, double precision       |
//! | `Numeric`  | `numeric`       | numeric, decimal                            |
//! | `Boolean`  | `boolean`       | boolean, bool                               |
//! | `Date`     | `date`          | date                                        |
//! | `DateTime` | `datetime`      | datetime, timestamp, timestamptz            |
//! | `Time`     | `time`          | time, timetz                                |
//! | `Binary`   | `binary`        | blob, bytea, binary, varbinary              |
//!
//! Anything else is treated as `Varchar` with no length.

use std::collections::BTreeMap;
use std::fmt;

/// Mapping type used when neither the type key nor `string` is configured
const BUILTIN_MAPPING_TYPE: &str = "String";

/// Form field used when neither the type key nor `string` is configured
const BUILTIN_FORM_FIELD: &str = "StringField";

/// Recognized source column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Variable-length string
    Varchar,
    /// Fixed-length string
    Char,
    /// Unbounded text
    Text,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// 16-bit (or smaller) integer
    SmallInt,
    /// Floating point
    Float,
    /// Exact decimal
    Numeric,
    /// Boolean
    Boolean,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Time of day
    Time,
    /// Binary blob
    Binary,
}

impl SqlType {
    /// Parse a declared type into its recognized type and length argument
    ///
    /// The length is the first numeric argument of the parenthesized suffix.
    /// Unrecognized names fall back to [`SqlType::Varchar`] and drop the
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dbwebform::scaffold::field_type::SqlType;
    /// assert_eq!(SqlType::parse("VARCHAR(50)"), (SqlType::Varchar, Some(50)));
    /// assert_eq!(SqlType::parse("numeric(10, 2)"), (SqlType::Numeric, Some(10)));
    /// assert_eq!(SqlType::parse("GEOMETRY(4326)"), (SqlType::Varchar, None));
    /// ```
    #[must_use]
    pub fn parse(declared: &str) -> (Self, Option<u32>) {
        let (base, args) = match declared.split_once('(') {
            Some((base, rest)) => (base, Some(rest.trim_end().trim_end_matches(')'))),
            None => (declared, None),
        };

        let normalized = base
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self::lookup(&normalized).map_or((Self::Varchar, None), |sql_type| {
            let length = args
                .and_then(|args| args.split(',').next())
                .and_then(|first| first.trim().parse::<u32>().ok());
            (sql_type, length)
        })
    }

    /// Length limit of a declared string-family type
    ///
    /// `NUMERIC(10,2)` has a precision, not a length, so it yields `None`.
    #[must_use]
    pub fn character_length(declared: &str) -> Option<u32> {
        match Self::parse(declared) {
            (sql_type, length) if sql_type.is_string_family() => length,
            _ => None,
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        let sql_type = match name {
            "varchar" | "character varying" | "varying character" | "nvarchar"
            | "native character varying" | "varchar2" | "string" => Self::Varchar,
            "char" | "character" | "nchar" | "native character" | "bpchar" => Self::Char,
            "text" | "clob" | "tinytext" | "mediumtext" | "longtext" => Self::Text,
            "integer" | "int" | "int4" | "mediumint" | "serial" => Self::Integer,
            "bigint" | "int8" | "bigserial" | "unsigned big int" => Self::BigInt,
            "smallint" | "int2" | "tinyint" | "smallserial" => Self::SmallInt,
            "float" | "real" | "double" | "double precision" | "float4" | "float8" => Self::Float,
            "numeric" | "decimal" => Self::Numeric,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "datetime"
            | "timestamp"
            | "timestamp without time zone"
            | "timestamp with time zone"
            | "timestamptz" => Self::DateTime,
            "time" | "time without time zone" | "time with time zone" | "timetz" => Self::Time,
            "blob" | "bytea" | "binary" | "varbinary" => Self::Binary,
            _ => return None,
        };
        Some(sql_type)
    }

    /// Key into the `type_mapping` and `field_mapping` tables
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Varchar | Self::Char => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInt => "big_integer",
            Self::SmallInt => "small_integer",
            Self::Float => "float",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Binary => "binary",
        }
    }

    /// Whether the type carries a character length
    #[must_use]
    pub const fn is_string_family(self) -> bool {
        matches!(self, Self::Varchar | Self::Char)
    }

    /// Whether values are whole numbers
    #[must_use]
    pub const fn is_integer_family(self) -> bool {
        matches!(self, Self::Integer | Self::BigInt | Self::SmallInt)
    }

    /// Mapping type expression, e.g. `db.String(50)`
    ///
    /// The length suffix is only applied to string-family types.
    #[must_use]
    pub fn mapping_expression(self, length: Option<u32>, type_mapping: &BTreeMap<String, String>) -> String {
        let name = resolve(type_mapping, self.key(), BUILTIN_MAPPING_TYPE);
        match length {
            Some(length) if self.is_string_family() => format!("{name}({length})"),
            _ => name.to_string(),
        }
    }

    /// Form field class name, e.g. `StringField`
    #[must_use]
    pub fn form_field(self, field_mapping: &BTreeMap<String, String>) -> String {
        resolve(field_mapping, self.key(), BUILTIN_FORM_FIELD).to_string()
    }
}

fn resolve<'a>(table: &'a BTreeMap<String, String>, key: &str, builtin: &'a str) -> &'a str {
    table
        .get(key)
        .or_else(|| table.get("string"))
        .map_or(builtin, String::as_str)
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, MappingStyle};

    #[test]
    fn test_parse_varchar_with_length() {
        let config = GeneratorConfig::preset(MappingStyle::Flask);
        let (sql_type, length) = SqlType::parse("VARCHAR(50)");

        assert_eq!(sql_type, SqlType::Varchar);
        assert_eq!(length, Some(50));
        assert_eq!(sql_type.mapping_expression(length, &config.model.type_mapping), "db.String(50)");
        assert_eq!(sql_type.form_field(&config.form.field_mapping), "StringField");
    }

    #[test]
    fn test_unknown_type_falls_back_without_length() {
        let config = GeneratorConfig::preset(MappingStyle::Flask);
        let (sql_type, length) = SqlType::parse("point(3)");

        assert_eq!(sql_type, SqlType::Varchar);
        assert_eq!(length, None);
        assert_eq!(sql_type.mapping_expression(length, &config.model.type_mapping), "db.String");
        assert_eq!(sql_type.form_field(&config.form.field_mapping), "StringField");
    }

    #[test]
    fn test_case_and_whitespace_normalized() {
        assert_eq!(SqlType::parse("Character  Varying (20)"), (SqlType::Varchar, Some(20)));
        assert_eq!(SqlType::parse("TIMESTAMP WITHOUT TIME ZONE"), (SqlType::DateTime, None));
        assert_eq!(SqlType::parse("double precision"), (SqlType::Float, None));
        assert_eq!(SqlType::parse(""), (SqlType::Varchar, None));
    }

    #[test]
    fn test_all_keys_present_in_presets() {
        let all = [
            SqlType::Varchar,
            SqlType::Char,
            SqlType::Text,
            SqlType::Integer,
            SqlType::BigInt,
            SqlType::SmallInt,
            SqlType::Float,
            SqlType::Numeric,
            SqlType::Boolean,
            SqlType::Date,
            SqlType::DateTime,
            SqlType::Time,
            SqlType::Binary,
        ];

        for style in [MappingStyle::Flask, MappingStyle::Classic] {
            let config = GeneratorConfig::preset(style);
            for sql_type in all {
                assert!(config.model.type_mapping.contains_key(sql_type.key()), "{sql_type}");
                assert!(config.form.field_mapping.contains_key(sql_type.key()), "{sql_type}");
            }
        }
    }

    #[test]
    fn test_text_maps_to_text_types() {
        let config = GeneratorConfig::preset(MappingStyle::Flask);
        let (sql_type, length) = SqlType::parse("TEXT");
        assert_eq!(sql_type.mapping_expression(length, &config.model.type_mapping), "db.Text");
        assert_eq!(sql_type.form_field(&config.form.field_mapping), "TextAreaField");
    }

    #[test]
    fn test_length_ignored_for_non_strings() {
        let config = GeneratorConfig::preset(MappingStyle::Classic);
        let (sql_type, length) = SqlType::parse("NUMERIC(10,2)");
        assert_eq!(length, Some(10));
        assert_eq!(sql_type.mapping_expression(length, &config.model.type_mapping), "Numeric");
        assert_eq!(SqlType::character_length("NUMERIC(10,2)"), None);
        assert_eq!(SqlType::character_length("CHAR(2)"), Some(2));
    }

    #[test]
    fn test_missing_key_falls_back_to_string_then_builtin() {
        let mut mapping = BTreeMap::new();
        mapping.insert("string".to_string(), "Unicode".to_string());
        assert_eq!(SqlType::Date.mapping_expression(None, &mapping), "Unicode");

        let empty = BTreeMap::new();
        assert_eq!(SqlType::Date.mapping_expression(None, &empty), "String");
        assert_eq!(SqlType::Date.form_field(&empty), "StringField");
    }
}
