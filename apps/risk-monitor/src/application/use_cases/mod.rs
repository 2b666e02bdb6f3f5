//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod error;
mod generate_report;
mod publish_report;
mod run_report;

pub use error::ReportError;
pub use generate_report::{ExposurePlan, GenerateReportUseCase, PositionQuery, ReportPlan};
pub use publish_report::PublishReportUseCase;
pub use run_report::RunReportUseCase;
