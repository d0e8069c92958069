use serde::Serialize;

/// Community totals shown on the home screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummaryDto {
    pub total_users: u64,
    pub total_reports: u64,
}
