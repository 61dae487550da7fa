//! Route handlers for the form page

use super::state::FormState;
use crate::forms::{validate_fields, FieldKind, FormBuilder, FormField, ValidationErrors};
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::collections::HashMap;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    title: &'a str,
    form_html: &'a str,
}

struct SubmittedEntry {
    label: String,
    value: String,
}

#[derive(Template)]
#[template(path = "submitted.html")]
struct SubmittedPage<'a> {
    title: &'a str,
    entries: Vec<SubmittedEntry>,
}

/// `GET /`: the empty form
pub async fn show_form(State(state): State<FormState>) -> Response {
    render_form(&state, &HashMap::new(), None, StatusCode::OK)
}

/// `POST /`: validate a submission
///
/// Valid values are logged and acknowledged. Otherwise the form comes back
/// with the submitted values and inline errors.
pub async fn submit_form(
    State(state): State<FormState>,
    Form(values): Form<HashMap<String, String>>,
) -> Response {
    let fields: Vec<FormField> = state
        .fields()
        .iter()
        .map(|f| FormField::from_generated(f).with_submitted(&values))
        .collect();
    let errors = validate_fields(&fields);

    if errors.has_errors() {
        tracing::warn!(
            table = state.table(),
            errors = errors.count(),
            "Rejected form submission"
        );
        return render_form(&state, &values, Some(&errors), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let submitted: HashMap<&str, String> = fields
        .iter()
        .map(|f| (f.name.as_str(), display_value(f)))
        .collect();
    tracing::info!(table = state.table(), values = ?submitted, "Accepted form submission");

    let page = SubmittedPage {
        title: state.title(),
        entries: fields
            .iter()
            .map(|f| SubmittedEntry {
                label: f.label.clone(),
                value: display_value(f),
            })
            .collect(),
    };
    html_response(page.render(), StatusCode::OK)
}

fn render_form(
    state: &FormState,
    values: &HashMap<String, String>,
    errors: Option<&ValidationErrors>,
    status: StatusCode,
) -> Response {
    let mut form = FormBuilder::new("/", "POST")
        .schema_fields(state.fields(), values)
        .submit(state.submit_label());
    if let Some(errors) = errors {
        form = form.errors(errors).novalidate();
    }
    let form_html = form.build();

    let page = IndexPage {
        title: state.title(),
        form_html: &form_html,
    };
    html_response(page.render(), status)
}

fn html_response(rendered: askama::Result<String>, status: StatusCode) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn display_value(field: &FormField) -> String {
    match field.kind {
        FieldKind::Checkbox { checked } => String::from(if checked { "Yes" } else { "No" }),
        FieldKind::Select => {
            let value = field.trimmed_value().unwrap_or_default();
            field
                .options
                .iter()
                .find(|(option, _)| option == value)
                .map_or(value, |(_, label)| label.as_str())
                .to_string()
        }
        FieldKind::Input(_) | FieldKind::Textarea => {
            field.trimmed_value().unwrap_or_default().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value() {
        let values = HashMap::from([
            ("active".to_string(), "y".to_string()),
            ("name".to_string(), "  Ada ".to_string()),
        ]);
        let checkbox = FormField::checkbox("active").with_submitted(&values);
        let name = FormField::textarea("name").with_submitted(&values);
        let empty = FormField::textarea("bio").with_submitted(&values);

        assert_eq!(display_value(&checkbox), "Yes");
        assert_eq!(display_value(&name), "Ada");
        assert_eq!(display_value(&empty), "");

        let status = HashMap::from([("status".to_string(), "live".to_string())]);
        let select = FormField::select("status", vec![("live".into(), "Published".into())])
            .with_submitted(&status);
        assert_eq!(display_value(&select), "Published");
    }

    #[test]
    fn test_submitted_page_escapes_values() {
        let page = SubmittedPage {
            title: "Users",
            entries: vec![SubmittedEntry {
                label: "Name".into(),
                value: "<script>".into(),
            }],
        };
        let html = page.render().unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
