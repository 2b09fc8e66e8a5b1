use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initializes the global tracing subscriber. INFO by default, with the
/// crate itself at DEBUG; `RUST_LOG` overrides both.
pub fn init_logging() {
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive("cardmind=debug".parse().expect("valid directive"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty());

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set up tracing subscriber");
}
