//! Observability (logging, tracing)
//!
//! The crate emits `tracing` spans and events; install a subscriber to see
//! them. [`init`] sets up a reasonable default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG`)
/// - Pretty formatting in debug builds, JSON in release builds
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
///
/// # Example
///
/// ```rust,no_run
/// use mailgun_send::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize the tracing subscriber for a named service
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("debug,mailgun_send=trace")
        } else {
            EnvFilter::new("info")
        }
    });

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    }

    tracing::debug!(service = %config.service_name, "Tracing initialised");

    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "mailgun-send".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}
