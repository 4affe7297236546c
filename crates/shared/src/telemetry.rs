//! Telemetry (tracing) initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to `stratum=debug`.
/// Safe to call once per process; embedding applications that install
/// their own subscriber should skip this.
pub fn init() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stratum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
