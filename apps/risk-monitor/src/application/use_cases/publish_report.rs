//! Publish Report Use Case

use std::sync::Arc;

use super::error::ReportError;
use crate::application::ports::NotifierPort;
use crate::application::services::MessageRenderer;
use crate::domain::report::RiskReport;

/// Use case for rendering a report and delivering it.
pub struct PublishReportUseCase<N>
where
    N: NotifierPort,
{
    notifier: Arc<N>,
    renderer: MessageRenderer,
}

impl<N> PublishReportUseCase<N>
where
    N: NotifierPort,
{
    /// Create a new PublishReportUseCase.
    pub fn new(notifier: Arc<N>, renderer: MessageRenderer) -> Self {
        Self { notifier, renderer }
    }

    /// Execute the use case. Returns the delivered text.
    pub async fn execute(&self, report: &RiskReport) -> Result<String, ReportError> {
        let text = self.renderer.render(report);
        self.notifier.send(&text).await?;
        tracing::info!(chars = text.chars().count(), "Report delivered");
        Ok(text)
    }
}
