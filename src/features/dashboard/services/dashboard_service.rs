use std::sync::Arc;

use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::reports::clients::ReportBackend;

/// Aggregate counts for the home screen
pub struct DashboardService {
    backend: Arc<dyn ReportBackend>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self { backend }
    }

    /// Fetch both counts concurrently. A failed count is logged and shown as zero.
    pub async fn get_summary(&self) -> DashboardSummaryDto {
        let (users, reports) =
            futures::join!(self.backend.count_users(), self.backend.count_reports());

        let total_users = users.unwrap_or_else(|e| {
            tracing::error!("Error fetching users: {}", e);
            0
        });
        let total_reports = reports.unwrap_or_else(|e| {
            tracing::error!("Error fetching reports: {}", e);
            0
        });

        DashboardSummaryDto {
            total_users,
            total_reports,
        }
    }
}
