use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::dtos::NewReportPayload;
use crate::features::reports::models::{Report, ReportStatus};

/// Operations the client needs from the report backend.
///
/// Implementations return already-decoded records; transport details stay
/// behind this trait so the review and history flows can run against a fake.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Every report (admin view)
    async fn list_reports(&self) -> Result<Vec<Report>>;

    /// Reports submitted by `user_id`
    async fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<Report>>;

    /// Persist a new status for `report_id`
    async fn update_report_status(&self, report_id: &str, status: ReportStatus) -> Result<()>;

    async fn count_users(&self) -> Result<u64>;

    async fn count_reports(&self) -> Result<u64>;

    /// Upload a new report with its media attachment
    async fn submit_report(&self, payload: NewReportPayload) -> Result<Report>;
}
