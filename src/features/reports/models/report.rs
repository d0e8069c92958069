use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ReportLocation;
use crate::shared::types::{lenient_count, lenient_enum, lenient_value};

/// Severity a citizen assigns to a disturbance. Ordered `Green < Yellow < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Green,
    Yellow,
    Red,
}

impl NoiseLevel {
    pub const ALL: [NoiseLevel; 3] = [NoiseLevel::Green, NoiseLevel::Yellow, NoiseLevel::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseLevel::Green => "green",
            NoiseLevel::Yellow => "yellow",
            NoiseLevel::Red => "red",
        }
    }
}

impl std::fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoiseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(NoiseLevel::Green),
            "yellow" => Ok(NoiseLevel::Yellow),
            "red" => Ok(NoiseLevel::Red),
            other => Err(format!("unknown noise level '{}'", other)),
        }
    }
}

/// Administrative lifecycle state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Monitoring,
    ActionRequired,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Monitoring,
        ReportStatus::ActionRequired,
        ReportStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Monitoring => "monitoring",
            ReportStatus::ActionRequired => "action_required",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "monitoring" => Ok(ReportStatus::Monitoring),
            "action_required" => Ok(ReportStatus::ActionRequired),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("unknown report status '{}'", other)),
        }
    }
}

/// Kind of evidence attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(MediaType::Audio),
            "video" => Ok(MediaType::Video),
            other => Err(format!("unknown media type '{}'", other)),
        }
    }
}

/// Read-only projection of a backend report record.
///
/// Every field except the identifier is optional on the wire; unknown enum
/// values and malformed locations decode to `None` rather than rejecting the
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReportRecord")]
pub struct Report {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<NoiseLevel>,
    pub consecutive_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ReportLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Wire shape of a report. Both spellings of the id and of the media URL
/// may be present at once; `_id` and `mediaUrl` take precedence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_value")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    noise_level: Option<NoiseLevel>,
    #[serde(default, deserialize_with = "lenient_count")]
    consecutive_days: u32,
    #[serde(default, deserialize_with = "lenient_enum")]
    status: Option<ReportStatus>,
    #[serde(default, deserialize_with = "lenient_value")]
    comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    location: Option<ReportLocation>,
    #[serde(default, deserialize_with = "lenient_enum")]
    media_type: Option<MediaType>,
    #[serde(default, deserialize_with = "lenient_value")]
    media_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    media_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_value")]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReportRecord> for Report {
    type Error = String;

    fn try_from(record: ReportRecord) -> Result<Self, Self::Error> {
        let id = record
            .mongo_id
            .into_iter()
            .chain(record.id)
            .find(|id| !id.trim().is_empty())
            .ok_or_else(|| "report record has no id".to_string())?;

        Ok(Report {
            id,
            user_id: record.user_id,
            reason: record.reason,
            noise_level: record.noise_level,
            consecutive_days: record.consecutive_days,
            status: record.status,
            comment: record.comment,
            location: record.location,
            media_type: record.media_type,
            media_url: record.media_url.or(record.media_uri),
            created_at: record.created_at,
        })
    }
}

impl Report {
    /// Status with the implicit `pending` default applied
    pub fn effective_status(&self) -> ReportStatus {
        self.status.unwrap_or_default()
    }

    pub fn is_pending(&self) -> bool {
        self.effective_status() == ReportStatus::Pending
    }

    /// Media URL when the attachment is audio
    pub fn audio_url(&self) -> Option<&str> {
        match self.media_type {
            Some(MediaType::Audio) => self.media_url.as_deref(),
            _ => None,
        }
    }

    /// Media URL when the attachment is video
    pub fn video_url(&self) -> Option<&str> {
        match self.media_type {
            Some(MediaType::Video) => self.media_url.as_deref(),
            _ => None,
        }
    }
}
