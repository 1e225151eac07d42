//! Driving port for compliance reporting.

use async_trait::async_trait;

use crate::domain::{ComplianceReport, Error, ReportPeriod};

/// Domain use-case port for compliance summaries.
#[async_trait]
pub trait ComplianceReportQuery: Send + Sync {
    /// Summarise items created within `period`.
    async fn compliance_report(&self, period: ReportPeriod) -> Result<ComplianceReport, Error>;
}
