//! Demo web application serving one generated form
//!
//! The table is reflected once at startup. `GET /` shows the empty form and
//! `POST /` validates a submission: errors re-render the form with status
//! 422, valid values are logged and acknowledged.

mod handlers;
mod state;

pub use handlers::{show_form, submit_form};
pub use state::FormState;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::schema::reflect_table;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Router with the form route and request tracing
#[must_use]
pub fn router(state: FormState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reflect `table` and serve its form on `bind` until the server stops
///
/// # Errors
///
/// Returns an error if reflection fails, the address cannot be bound, or the
/// server stops with an I/O error.
pub async fn serve(url: &str, table: &str, config: &GeneratorConfig, bind: &str) -> Result<()> {
    let info = reflect_table(url, table).await?;
    let state = FormState::from_table(&info, config);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        table = info.name(),
        fields = state.fields().len(),
        "Serving form"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
