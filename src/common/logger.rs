//! Logging setup utilities for the relay server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// The default filter covers the library crate and the running binary at
/// `default_log_level`; a `RUST_LOG` environment variable takes precedence
/// when set.
///
/// # Examples
///
/// ```no_run
/// idobata::common::logger::setup_logger("server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let fallback = format!(
        "{}={default_log_level},{binary_name}={default_log_level}",
        env!("CARGO_PKG_NAME").replace('-', "_")
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
