// =============================================================================
// ESCALATION THRESHOLDS
// =============================================================================

/// Consecutive report days before a RED report may be escalated
pub const RED_ACTION_THRESHOLD_DAYS: u32 = 3;

/// Consecutive report days before a YELLOW report may be escalated
pub const YELLOW_ACTION_THRESHOLD_DAYS: u32 = 5;

// =============================================================================
// BACKEND PATHS (relative to the configured base URL)
// =============================================================================

pub const PATH_LIST_REPORTS: &str = "reports/get-report";
pub const PATH_USER_REPORTS: &str = "reports/get-user-report";
pub const PATH_UPDATE_STATUS: &str = "reports/update-status";
pub const PATH_NEW_REPORT: &str = "reports/new-report";
pub const PATH_TOTAL_REPORTS: &str = "reports/total-reports";
pub const PATH_COUNT_USERS: &str = "user/countUsersOnly";

// =============================================================================
// USER NOTICES
// =============================================================================

pub const NOTICE_CONNECTION_FAILED: &str = "Could not connect to server";
pub const NOTICE_FETCH_FAILED: &str = "Failed to fetch reports";
pub const NOTICE_UPDATE_FAILED: &str = "Failed to update status";
pub const NOTICE_UPDATE_SUCCEEDED: &str = "Report status updated successfully";
pub const NOTICE_SUBMIT_FAILED: &str = "Failed to submit noise report. Please try again.";
pub const NOTICE_SELECT_RESPONSE: &str = "Please select a response";
pub const NOTICE_LOGIN_TO_VIEW: &str = "Please log in to view your reports.";
pub const NOTICE_LOGIN_AGAIN: &str = "Please log in again.";
