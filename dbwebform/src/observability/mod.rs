//! Observability (logging, tracing)
//!
//! Structured logging through `tracing`. Log lines always go to stderr so the
//! generator can stream source text on stdout.

use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG`), falling back to
///   `default_filter`
/// - Pretty formatting in debug builds, JSON in release builds
///
/// # Errors
///
/// Returns [`DbWebFormError::Logging`](crate::DbWebFormError::Logging) if a
/// global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use dbwebform::observability;
///
/// # fn main() -> dbwebform::Result<()> {
/// observability::init("info")?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Default filter for the command-line generator
pub const CLI_FILTER: &str = "warn,dbwebform=info";

/// Default filter for the demo web server
pub const SERVER_FILTER: &str = "info,tower_http=debug";
