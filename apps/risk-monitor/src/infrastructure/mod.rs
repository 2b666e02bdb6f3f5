//! Infrastructure Layer
//!
//! Adapters for the exchange and notifier ports, configuration loading,
//! and telemetry setup.

pub mod config;
pub mod container;
pub mod exchange;
pub mod notifier;
pub mod telemetry;

pub use config::{Config, ConfigError, ConfigSource, load_config};
pub use container::{ReportJob, StartupError};
pub use exchange::{DeribitConfig, DeribitEnvironment, DeribitError, DeribitExchangeAdapter};
pub use notifier::{LogNotifier, ReportNotifier, TelegramConfig, TelegramError, TelegramNotifier};
