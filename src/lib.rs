pub mod config;
pub mod consumption;
pub mod error;
pub mod fuel_prices;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod routing;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging with the default level and text output
///
/// Note: This function can only be called once. The server command uses
/// [`init_tracing_with`] instead so that configured level and format apply.
pub fn init_tracing() {
    init_tracing_with("info", "text");
}

/// Initialize tracing with an explicit level and format ("text" or "json")
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing_with(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
