use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::features::reports::display::Badge;
use crate::features::reports::models::{MediaType, NoiseLevel, Report, ReportLocation, ReportStatus};

/// Badge rendered with its colours
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeDto {
    pub label: String,
    pub color: String,
    pub background: String,
}

impl From<Badge> for BadgeDto {
    fn from(badge: Badge) -> Self {
        Self {
            label: badge.label.to_string(),
            color: badge.color.to_string(),
            background: badge.background.to_string(),
        }
    }
}

/// Body of the status update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReportStatus,
}

/// Envelope of the per-user report listing; records are decoded by `decode_reports`
#[derive(Debug, Default, Deserialize)]
pub struct UserReportsResponse {
    #[serde(default)]
    pub reports: Vec<serde_json::Value>,
}

/// Decode a report list one record at a time, logging and skipping records
/// that cannot be read so the rest of the list still shows
pub fn decode_reports(records: Vec<serde_json::Value>) -> Vec<Report> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Report>(record) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Skipping unreadable report at index {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountUsersResponse {
    #[serde(default)]
    pub total_users: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalReportsResponse {
    #[serde(default)]
    pub total_reports: u64,
}

/// The creation endpoint answers with the new record, bare or wrapped
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitReportResponse {
    Wrapped { report: Report },
    Bare(Report),
}

impl SubmitReportResponse {
    pub fn into_report(self) -> Report {
        match self {
            SubmitReportResponse::Wrapped { report } => report,
            SubmitReportResponse::Bare(report) => report,
        }
    }
}

/// Evidence produced by the media capture service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaAttachment {
    pub path: PathBuf,
    pub media_type: MediaType,
}

impl MediaAttachment {
    pub fn audio(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            media_type: MediaType::Audio,
        }
    }

    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            media_type: MediaType::Video,
        }
    }

    /// File extension of the capture, e.g. `m4a`; `bin` when the path has none
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }

    /// MIME type sent with the upload, `audio/<ext>` or `video/<ext>`
    pub fn mime_type(&self) -> String {
        format!("{}/{}", self.media_type, self.extension())
    }

    /// Upload file name, `noise_report_<millis>.<ext>`
    pub fn upload_file_name(&self, epoch_millis: i64) -> String {
        format!("noise_report_{}.{}", epoch_millis, self.extension())
    }
}

/// Validated payload handed to the backend's creation endpoint
#[derive(Debug, Clone)]
pub struct NewReportPayload {
    pub user_id: String,
    pub media: MediaAttachment,
    pub reason: String,
    pub noise_level: NoiseLevel,
    pub comment: Option<String>,
    pub location: Option<ReportLocation>,
}
