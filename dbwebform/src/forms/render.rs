//! Form rendering to HTML
//!
//! Renders form builders to HTML strings with proper escaping
//! and validation error display.

use std::fmt::Write;

use super::builder::FormBuilder;
use super::error::ValidationErrors;
use super::field::{FieldKind, FormField, InputType};

const GROUP_CLASS: &str = "form-group";
const LABEL_CLASS: &str = "form-label";
const INPUT_CLASS: &str = "form-input";
const INPUT_ERROR_CLASS: &str = "form-input-error";
const ERROR_CLASS: &str = "form-error";
const SUBMIT_CLASS: &str = "form-submit";

/// Renders forms to HTML
pub struct FormRenderer;

impl FormRenderer {
    /// Render a form to HTML string
    #[must_use]
    pub fn render(form: &FormBuilder<'_>) -> String {
        let mut html = String::with_capacity(1024);

        html.push_str("<form");
        Self::write_attr(&mut html, "action", &form.action);
        Self::write_attr(&mut html, "method", &form.method);
        if form.novalidate {
            html.push_str(" novalidate");
        }
        html.push_str(">\n");

        for field in &form.fields {
            html.push_str(&Self::render_field(field, form.errors));
        }

        if let Some(ref text) = form.submit_text {
            let _ = writeln!(
                html,
                r#"  <button type="submit" class="{SUBMIT_CLASS}">{}</button>"#,
                Self::escape_html(text)
            );
        }

        html.push_str("</form>");
        html
    }

    fn render_field(field: &FormField, errors: Option<&ValidationErrors>) -> String {
        let mut html = String::with_capacity(256);
        let field_errors = errors.map_or(&[][..], |e| e.for_field(&field.name));
        let has_errors = !field_errors.is_empty();

        let _ = writeln!(html, r#"  <div class="{GROUP_CLASS}">"#);

        // Checkbox label comes after the box
        if !field.is_checkbox() {
            html.push_str("    ");
            Self::write_label(&mut html, field);
            html.push('\n');
        }

        match field.kind {
            FieldKind::Input(input_type) => Self::render_input(&mut html, field, input_type, has_errors),
            FieldKind::Textarea => Self::render_textarea(&mut html, field, has_errors),
            FieldKind::Select => Self::render_select(&mut html, field, has_errors),
            FieldKind::Checkbox { checked } => {
                Self::render_checkbox(&mut html, field, checked, has_errors);
                html.push(' ');
                Self::write_label(&mut html, field);
                html.push('\n');
            }
        }

        for error in field_errors {
            let _ = writeln!(
                html,
                r#"    <span class="{ERROR_CLASS}">{}</span>"#,
                Self::escape_html(&error.message)
            );
        }

        html.push_str("  </div>\n");
        html
    }

    fn write_label(html: &mut String, field: &FormField) {
        let _ = write!(
            html,
            r#"<label for="{}" class="{LABEL_CLASS}">{}</label>"#,
            Self::escape_attr(&field.name),
            Self::escape_html(&field.label)
        );
    }

    fn render_input(html: &mut String, field: &FormField, input_type: InputType, has_errors: bool) {
        html.push_str("    <input");
        Self::write_attr(html, "type", input_type.as_str());
        Self::write_common_attrs(html, field, has_errors);

        if let Some(ref value) = field.value {
            Self::write_attr(html, "value", value);
        }
        if input_type == InputType::Decimal {
            Self::write_attr(html, "step", "any");
        }
        if let Some(len) = field.max_length {
            Self::write_attr(html, "maxlength", &len.to_string());
        }
        if field.required {
            html.push_str(" required");
        }
        html.push_str(">\n");
    }

    fn render_textarea(html: &mut String, field: &FormField, has_errors: bool) {
        html.push_str("    <textarea");
        Self::write_common_attrs(html, field, has_errors);
        if let Some(len) = field.max_length {
            Self::write_attr(html, "maxlength", &len.to_string());
        }
        if field.required {
            html.push_str(" required");
        }
        html.push('>');
        if let Some(ref value) = field.value {
            html.push_str(&Self::escape_html(value));
        }
        html.push_str("</textarea>\n");
    }

    fn render_select(html: &mut String, field: &FormField, has_errors: bool) {
        html.push_str("    <select");
        Self::write_common_attrs(html, field, has_errors);
        if field.required {
            html.push_str(" required");
        }
        html.push_str(">\n");

        let current = field.trimmed_value();
        if !field.required || current.is_none() {
            html.push_str("      <option value=\"\"></option>\n");
        }
        for (value, label) in &field.options {
            html.push_str("      <option");
            Self::write_attr(html, "value", value);
            if current == Some(value.as_str()) {
                html.push_str(" selected");
            }
            let _ = writeln!(html, ">{}</option>", Self::escape_html(label));
        }
        html.push_str("    </select>\n");
    }

    fn render_checkbox(html: &mut String, field: &FormField, checked: bool, has_errors: bool) {
        html.push_str("    <input");
        Self::write_attr(html, "type", "checkbox");
        Self::write_common_attrs(html, field, has_errors);
        Self::write_attr(html, "value", "y");
        if checked {
            html.push_str(" checked");
        }
        html.push('>');
    }

    fn write_common_attrs(html: &mut String, field: &FormField, has_errors: bool) {
        Self::write_attr(html, "name", &field.name);
        Self::write_attr(html, "id", &field.name);
        if has_errors {
            Self::write_attr(html, "class", &format!("{INPUT_CLASS} {INPUT_ERROR_CLASS}"));
        } else {
            Self::write_attr(html, "class", INPUT_CLASS);
        }
    }

    fn write_attr(html: &mut String, name: &str, value: &str) {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&Self::escape_attr(value));
        html.push('"');
    }

    /// Escape a string for use in HTML attribute values
    fn escape_attr(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Escape a string for use in HTML content
    fn escape_html(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_form() {
        let form = FormBuilder::new("/", "POST").submit("Submit");
        let html = FormRenderer::render(&form);

        assert!(html.contains(r#"action="/""#));
        assert!(html.contains(r#"method="POST""#));
        assert!(html.contains("<button"));
        assert!(html.contains("Submit"));
    }

    #[test]
    fn test_render_input_field() {
        let mut field = FormField::input("name", InputType::Text);
        field.label = "Name".into();
        field.required = true;
        field.max_length = Some(100);

        let html = FormRenderer::render(&FormBuilder::new("/", "POST").add_field(field));

        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"maxlength="100""#));
        assert!(html.contains(" required"));
        assert!(html.contains(r#"<label for="name" class="form-label">Name</label>"#));
    }

    #[test]
    fn test_render_decimal_step() {
        let html = FormRenderer::render(
            &FormBuilder::new("/", "POST").add_field(FormField::input("price", InputType::Decimal)),
        );
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"step="any""#));
    }

    #[test]
    fn test_render_with_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email", "Invalid email address.");

        let form = FormBuilder::new("/", "POST")
            .errors(&errors)
            .add_field(FormField::input("email", InputType::Email));
        let html = FormRenderer::render(&form);

        assert!(html.contains("Invalid email address."));
        assert!(html.contains("form-error"));
        assert!(html.contains("form-input-error"));
    }

    #[test]
    fn test_render_textarea_escapes_value() {
        let mut field = FormField::textarea("bio");
        field.value = Some("<b>bold</b>".into());
        let html = FormRenderer::render(&FormBuilder::new("/", "POST").add_field(field));

        assert!(html.contains("<textarea"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;</textarea>"));
    }

    #[test]
    fn test_render_checkbox() {
        let mut field = FormField::checkbox("active");
        field.label = "Active".into();
        field.kind = FieldKind::Checkbox { checked: true };
        let html = FormRenderer::render(&FormBuilder::new("/", "POST").add_field(field));

        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains(" checked>"));
        assert!(html.contains("Active</label>"));
    }

    #[test]
    fn test_render_select() {
        let mut field = FormField::select(
            "status",
            vec![
                ("draft".to_string(), "Draft".to_string()),
                ("live".to_string(), "Published <now>".to_string()),
            ],
        );
        field.value = Some("live".into());
        let html = FormRenderer::render(&FormBuilder::new("/", "POST").add_field(field));

        assert!(html.contains(r#"<select name="status" id="status" class="form-input">"#));
        assert!(html.contains(r#"<option value="">"#));
        assert!(html.contains(r#"<option value="draft">Draft</option>"#));
        assert!(html.contains(r#"<option value="live" selected>Published &lt;now&gt;</option>"#));
        assert!(html.contains("</select>"));
    }

    #[test]
    fn test_render_novalidate() {
        let html = FormRenderer::render(&FormBuilder::new("/", "POST").novalidate());
        assert!(html.starts_with(r#"<form action="/" method="POST" novalidate>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(FormRenderer::escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(FormRenderer::escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(FormRenderer::escape_attr("\"test\""), "&quot;test&quot;");
    }
}
