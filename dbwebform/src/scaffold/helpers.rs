//! Naming helpers for generated classes, labels and files

use convert_case::{Case, Casing};

/// Naming conventions shared by the emitter, the CLI and the web form
pub struct NamingHelpers;

impl NamingHelpers {
    /// Class name for a table
    ///
    /// The table name is lowercased, matching prefixes and suffixes are
    /// stripped (each at most once, in list order), and the remaining
    /// underscore-separated segments are capitalized and joined. Digits and
    /// inner capitals do not start new words.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dbwebform::scaffold::helpers::NamingHelpers;
    /// assert_eq!(NamingHelpers::class_name("tbl_users", &["tbl_".into()], &[]), "Users");
    /// assert_eq!(NamingHelpers::class_name("order_items", &[], &[]), "OrderItems");
    /// assert_eq!(NamingHelpers::class_name("Audit_Log_T", &[], &["_t".into()]), "AuditLog");
    /// ```
    #[must_use]
    pub fn class_name(table: &str, remove_prefixes: &[String], remove_suffixes: &[String]) -> String {
        let mut name = table.to_lowercase();

        for prefix in remove_prefixes {
            if let Some(rest) = name.strip_prefix(prefix.to_lowercase().as_str()) {
                name = rest.to_string();
            }
        }
        for suffix in remove_suffixes {
            if let Some(rest) = name.strip_suffix(suffix.to_lowercase().as_str()) {
                name = rest.to_string();
            }
        }

        segments(&name)
            .map(|s| s.from_case(Case::Snake).to_case(Case::Pascal))
            .collect()
    }

    /// Form class name for a mapping class name
    ///
    /// ```
    /// # use dbwebform::scaffold::helpers::NamingHelpers;
    /// assert_eq!(NamingHelpers::form_class_name("Users"), "UsersForm");
    /// ```
    #[must_use]
    pub fn form_class_name(class_name: &str) -> String {
        format!("{class_name}Form")
    }

    /// Human-readable label for a column
    ///
    /// ```
    /// # use dbwebform::scaffold::helpers::NamingHelpers;
    /// assert_eq!(NamingHelpers::field_label("created_at"), "Created At");
    /// ```
    #[must_use]
    pub fn field_label(column: &str) -> String {
        segments(column)
            .map(|s| s.from_case(Case::Snake).to_case(Case::Title))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Default output file name for `generate`
    ///
    /// ```
    /// # use dbwebform::scaffold::helpers::NamingHelpers;
    /// assert_eq!(NamingHelpers::output_file_name("users", false, false), "users.py");
    /// assert_eq!(NamingHelpers::output_file_name("users", true, false), "users_model.py");
    /// ```
    #[must_use]
    pub fn output_file_name(table: &str, only_model: bool, only_form: bool) -> String {
        if only_model {
            format!("{table}_model.py")
        } else if only_form {
            format!("{table}_form.py")
        } else {
            format!("{table}.py")
        }
    }
}

fn segments(name: &str) -> impl Iterator<Item = &str> {
    name.split('_').filter(|s| !s.is_empty())
}
