//! Run Report Use Case
//!
//! The full pipeline: generate, then publish. Nothing is sent unless
//! generation completed.

use super::error::ReportError;
use super::generate_report::{GenerateReportUseCase, ReportPlan};
use super::publish_report::PublishReportUseCase;
use crate::application::ports::{ExchangePort, NotifierPort};
use crate::domain::report::RiskReport;

/// Use case for one complete report run.
pub struct RunReportUseCase<E, N>
where
    E: ExchangePort,
    N: NotifierPort,
{
    generate: GenerateReportUseCase<E>,
    publish: PublishReportUseCase<N>,
}

impl<E, N> RunReportUseCase<E, N>
where
    E: ExchangePort,
    N: NotifierPort,
{
    /// Create a new RunReportUseCase.
    pub const fn new(generate: GenerateReportUseCase<E>, publish: PublishReportUseCase<N>) -> Self {
        Self { generate, publish }
    }

    /// Execute the use case.
    pub async fn execute(&self, plan: &ReportPlan) -> Result<RiskReport, ReportError> {
        let report = self.generate.execute(plan).await?;
        self.publish.execute(&report).await?;
        Ok(report)
    }
}
