//! Observability for ntshape
//!
//! Logging goes through `tracing`. Each record carries an `event` field
//! drawn from [`Event`]; the library never installs a subscriber, the
//! binary does so through [`init_logging`].

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
