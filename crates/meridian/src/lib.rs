//! Meridian host.
//!
//! Wires the persistence and security crates together from command-line and
//! environment configuration. The `meridian` binary is a thin wrapper over
//! [`Host`].

pub mod config;
pub mod host;

pub use config::{Command, HostConfig};
pub use host::{BindingReport, Host, PolicyReport};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "meridian={level},meridian_persistence={level},meridian_security={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
