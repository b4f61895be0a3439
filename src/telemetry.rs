//! Telemetry and Observability
//!
//! Structured logging setup.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Default filter when `RUST_LOG` is unset.
fn default_filter(echo: bool) -> &'static str {
    if echo {
        "info,chat_registry=debug,sqlx=warn,sqlx::query=info"
    } else {
        "info,chat_registry=debug,sqlx=warn"
    }
}

/// Initialize tracing subscriber.
///
/// With `echo` set, executed SQL statements are let through the filter.
pub fn init_tracing(echo: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(echo)));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(echo, "Tracing initialized");
}
