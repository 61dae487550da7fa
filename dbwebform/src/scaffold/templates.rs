//! Embedded templates for the emitted source text
//!
//! Templates render with auto-escaping off: the output is source code, not
//! HTML. Block tags sit on their own lines and are trimmed, so the layout of
//! each template matches the layout of its output.

use crate::error::Result;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

/// Mapping class
pub const MODEL_TEMPLATE: &str = r"{% for line in imports %}
{{ line }}
{% endfor %}


class {{ class_name }}({{ base_class }}):
    __tablename__ = '{{ table_name }}'

{% for column in columns %}
    {{ column.name }} = {{ column_class }}({{ column.arguments }})
{% endfor %}

    def __repr__(self):
        return f'{{ repr }}'
";

/// Form class
pub const FORM_TEMPLATE: &str = r"{% for line in imports %}
{{ line }}
{% endfor %}


class {{ class_name }}({{ base_class }}):
{% for field in fields %}
    {{ field.name }} = {{ field.field_type }}('{{ field.label }}'{% if field.validators %}, validators=[{{ field.validators|join(', ') }}]{% endif %})
{% endfor %}
    {{ submit_name }} = {{ submit_field }}('{{ submit_label }}')
";

/// Combined output with section headers
pub const OUTPUT_TEMPLATE: &str = r"{% for section in sections %}
{% if not loop.first %}


{% endif %}
# {{ section.title }}
{{ section.body }}
{% endfor %}
";

/// Registry of the compiled templates
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Compile the embedded templates
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_template("model", MODEL_TEMPLATE)?;
        env.add_template("form", FORM_TEMPLATE)?;
        env.add_template("output", OUTPUT_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Render a named template
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<String> {
        let template = self.env.get_template(name)?;
        let rendered = template.render(context)?;
        tracing::debug!(template = name, bytes = rendered.len(), "Rendered template");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_compile() {
        assert!(TemplateRegistry::new().is_ok());
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::new().unwrap();
        assert!(registry.render("missing", json!({})).is_err());
    }

    #[test]
    fn test_no_html_escaping() {
        let registry = TemplateRegistry::new().unwrap();
        let rendered = registry
            .render(
                "output",
                json!({ "sections": [{ "title": "Model", "body": "x = '<a & b>'" }] }),
            )
            .unwrap();
        assert_eq!(rendered, "# Model\nx = '<a & b>'\n");
    }

    #[test]
    fn test_sections_separated_by_blank_lines() {
        let registry = TemplateRegistry::new().unwrap();
        let rendered = registry
            .render(
                "output",
                json!({ "sections": [
                    { "title": "A", "body": "a = 1" },
                    { "title": "B", "body": "b = 2" },
                ] }),
            )
            .unwrap();
        assert_eq!(rendered, "# A\na = 1\n\n\n# B\nb = 2\n");
    }
}
