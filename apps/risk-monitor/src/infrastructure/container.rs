//! Dependency wiring for one report run.

use std::sync::Arc;

use thiserror::Error;

use crate::application::services::MessageRenderer;
use crate::application::use_cases::{
    GenerateReportUseCase, PublishReportUseCase, ReportError, ReportPlan, RunReportUseCase,
};
use crate::domain::report::RiskReport;
use crate::infrastructure::config::{Config, ConfigError};
use crate::infrastructure::exchange::{DeribitError, DeribitExchangeAdapter};
use crate::infrastructure::notifier::{LogNotifier, ReportNotifier, TelegramError, TelegramNotifier};

/// Errors while building the job from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Exchange client could not be built.
    #[error("Failed to build exchange client: {0}")]
    Exchange(#[from] DeribitError),

    /// Notifier client could not be built.
    #[error("Failed to build notifier: {0}")]
    Notifier(#[from] TelegramError),
}

/// A fully wired report run.
pub struct ReportJob {
    use_case: RunReportUseCase<DeribitExchangeAdapter, ReportNotifier>,
    plan: ReportPlan,
    dry_run: bool,
}

impl ReportJob {
    /// Wire adapters and use cases from configuration.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let plan = config.report.to_plan()?;

        let exchange = DeribitExchangeAdapter::new(config.exchange.deribit_config()?)?;
        let notifier = if config.notifier.dry_run {
            ReportNotifier::DryRun(LogNotifier)
        } else {
            ReportNotifier::Telegram(TelegramNotifier::new(config.notifier.telegram_config())?)
        };
        let dry_run = notifier.is_dry_run();

        let use_case = RunReportUseCase::new(
            GenerateReportUseCase::new(Arc::new(exchange), config.exchange.credentials()),
            PublishReportUseCase::new(
                Arc::new(notifier),
                MessageRenderer::new(config.report.title.clone()),
            ),
        );

        Ok(Self {
            use_case,
            plan,
            dry_run,
        })
    }

    /// The plan this job reports on.
    #[must_use]
    pub const fn plan(&self) -> &ReportPlan {
        &self.plan
    }

    /// Check if delivery is replaced by logging.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run the pipeline once.
    pub async fn run(&self) -> Result<RiskReport, ReportError> {
        self.use_case.execute(&self.plan).await
    }
}
