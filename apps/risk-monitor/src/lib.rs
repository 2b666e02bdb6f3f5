// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Risk Monitor - Deribit Account Risk Report
//!
//! One-shot job that reads a Deribit account, derives its margin and option
//! exposure figures, and posts a Markdown summary to a Telegram chat. An
//! external scheduler repeats the run.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure arithmetic over exchange snapshots
//!   - `account`: Account summaries and USD conversion
//!   - `exposure`: Positions and the short-call / net-notional rules
//!   - `report`: Totals and margin usage
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `ExchangePort`, `NotifierPort`
//!   - `services`: Run-scoped index price memo, message rendering
//!   - `use_cases`: `GenerateReport`, `PublishReport`, `RunReport`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `exchange`: Deribit HTTP adapter
//!   - `notifier`: Telegram Bot API adapter, dry-run log notifier
//!   - `config`: YAML configuration with environment interpolation
//!   - `telemetry`: tracing subscriber and optional OTLP export

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::account::{AccountSummary, ConversionSource, CurrencyBalance, IndexPrice};
pub use domain::exposure::{ExposureRule, InstrumentKind, OptionExposure, Position};
pub use domain::report::{MarginScope, MetricsCalculator, RiskReport};
pub use domain::shared::{Currency, DomainError};

// Application re-exports
pub use application::ports::{
    AccessToken, ClientCredentials, ExchangeError, ExchangePort, NotifierError, NotifierPort,
};
pub use application::services::{MessageRenderer, PriceResolver};
pub use application::use_cases::{
    ExposurePlan, GenerateReportUseCase, PositionQuery, PublishReportUseCase, ReportError,
    ReportPlan, RunReportUseCase,
};

// Infrastructure re-exports
pub use infrastructure::{
    Config, ConfigError, ConfigSource, DeribitConfig, DeribitEnvironment, DeribitExchangeAdapter,
    ReportJob, StartupError, TelegramConfig, TelegramNotifier, load_config,
};
