//! Server-side validation of submitted form values
//!
//! Messages follow the wording of the generated form classes' validators so
//! the demo page and the emitted code report the same failures.

use super::error::ValidationErrors;
use super::field::{FieldKind, FormField, InputType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use validator::{ValidateEmail, ValidateLength};

/// Message for a missing required value
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Message for a malformed email address
pub const EMAIL_MESSAGE: &str = "Invalid email address.";

/// Message for a value outside a select's options
pub const CHOICE_MESSAGE: &str = "Not a valid choice.";

/// Validate filled-in fields
///
/// Blank optional values are accepted without further checks.
#[must_use]
pub fn validate_fields(fields: &[FormField]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in fields {
        if field.is_checkbox() {
            continue;
        }

        let Some(value) = field.trimmed_value() else {
            if field.required {
                errors.add(&field.name, "required", REQUIRED_MESSAGE);
            }
            continue;
        };

        if let Some(max) = field.max_length {
            if !value.validate_length(None, Some(u64::from(max)), None) {
                errors.add(
                    &field.name,
                    "length",
                    format!("Field cannot be longer than {max} characters."),
                );
            }
        }

        match field.kind {
            FieldKind::Input(input_type) => {
                if let Some((code, message)) = check_format(input_type, value) {
                    errors.add(&field.name, code, message);
                }
            }
            FieldKind::Select => {
                if !field.options.iter().any(|(option, _)| option == value) {
                    errors.add(&field.name, "choice", CHOICE_MESSAGE);
                }
            }
            FieldKind::Textarea | FieldKind::Checkbox { .. } => {}
        }

        // Email inputs were checked above
        let email_input = field.kind == FieldKind::Input(InputType::Email);
        if field.email && !email_input && !value.validate_email() {
            errors.add(&field.name, "email", EMAIL_MESSAGE);
        }
    }

    if errors.has_errors() {
        tracing::debug!(count = errors.count(), "Submission failed validation");
    }
    errors
}

fn check_format(input_type: InputType, value: &str) -> Option<(&'static str, &'static str)> {
    let valid = match input_type {
        InputType::Text => true,
        InputType::Email => value.validate_email(),
        InputType::Number => value.parse::<i64>().is_ok(),
        InputType::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        InputType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        InputType::Time => ["%H:%M", "%H:%M:%S"]
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(value, fmt).is_ok()),
        InputType::DateTimeLocal => ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok()),
    };

    if valid {
        return None;
    }

    Some(match input_type {
        InputType::Email => ("email", EMAIL_MESSAGE),
        InputType::Number => ("integer", "Not a valid integer value."),
        InputType::Decimal => ("decimal", "Not a valid decimal value."),
        InputType::Date => ("date", "Not a valid date value."),
        InputType::Time => ("time", "Not a valid time value."),
        InputType::DateTimeLocal => ("datetime", "Not a valid datetime value."),
        InputType::Text => ("format", "Invalid value."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn filled(mut field: FormField, value: &str) -> FormField {
        field.value = Some(value.to_string());
        field
    }

    fn required(mut field: FormField) -> FormField {
        field.required = true;
        field
    }

    #[test]
    fn test_required_blank() {
        let fields = [filled(required(FormField::input("name", InputType::Text)), "   ")];
        let errors = validate_fields(&fields);
        assert_eq!(errors.for_field("name")[0].message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_optional_blank_is_fine() {
        let fields = [FormField::input("age", InputType::Number)];
        assert!(!validate_fields(&fields).has_errors());
    }

    #[test]
    fn test_max_length() {
        let mut field = filled(FormField::input("code", InputType::Text), "abcdef");
        field.max_length = Some(5);
        let errors = validate_fields(&[field]);
        assert_eq!(errors.for_field("code")[0].code, "length");

        let mut field = filled(FormField::input("code", InputType::Text), "ábcdé");
        field.max_length = Some(5);
        assert!(!validate_fields(&[field]).has_errors());
    }

    #[test]
    fn test_email_format() {
        let bad = [filled(FormField::input("user_email", InputType::Email), "not-an-email")];
        assert_eq!(validate_fields(&bad).for_field("user_email")[0].message, EMAIL_MESSAGE);

        let good = [filled(FormField::input("user_email", InputType::Email), "ada@example.com")];
        assert!(!validate_fields(&good).has_errors());
    }

    #[test]
    fn test_typed_values() {
        let fields = [
            filled(FormField::input("age", InputType::Number), "4.5"),
            filled(FormField::input("price", InputType::Decimal), "4.5"),
            filled(FormField::input("born", InputType::Date), "2024-02-30"),
            filled(FormField::input("opens", InputType::Time), "09:30"),
            filled(FormField::input("seen_at", InputType::DateTimeLocal), "2024-01-01T10:00"),
        ];
        let errors = validate_fields(&fields);

        assert_eq!(errors.for_field("age")[0].code, "integer");
        assert!(!errors.has_field_error("price"));
        assert_eq!(errors.for_field("born")[0].code, "date");
        assert!(!errors.has_field_error("opens"));
        assert!(!errors.has_field_error("seen_at"));
        assert_eq!(errors.count(), 2);
    }

    #[test]
    fn test_email_flag_on_other_widgets() {
        let mut field = filled(FormField::input("backup_email", InputType::Number), "5");
        field.email = true;
        let errors = validate_fields(&[field]);
        assert_eq!(errors.for_field("backup_email")[0].message, EMAIL_MESSAGE);

        let mut field = filled(FormField::textarea("contact_email"), "ada@example.com");
        field.email = true;
        assert!(!validate_fields(&[field]).has_errors());
    }

    #[test]
    fn test_select_choices() {
        let options = vec![("draft".to_string(), "Draft".to_string())];
        let good = [filled(FormField::select("status", options.clone()), "draft")];
        assert!(!validate_fields(&good).has_errors());

        let bad = [filled(FormField::select("status", options), "deleted")];
        assert_eq!(validate_fields(&bad).for_field("status")[0].message, CHOICE_MESSAGE);
    }

    #[test]
    fn test_checkbox_skipped() {
        let values = HashMap::new();
        let mut field = FormField::checkbox("active").with_submitted(&values);
        field.required = true;
        assert!(!validate_fields(&[field]).has_errors());
    }
}
