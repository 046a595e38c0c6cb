pub mod config;
pub mod error;

pub use config::{Config, ProvidersConfig, SearchConfig, ValidationResult};
pub use error::{AppError, LookupError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging at the default `info` level (overridable via `RUST_LOG`)
pub fn init() -> Result<()> {
    init_with_level("info")
}

/// Initialize logging with an explicit fallback level.
///
/// `RUST_LOG` still wins when set. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_with_level(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Cityscope core initialized");
    }
    Ok(())
}
