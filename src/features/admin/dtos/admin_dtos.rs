use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::reports::display::{
    consecutive_days_badge, noise_level_badge, reason_icon, reason_title, relative_time,
    response_heading, response_hint, status_badge,
};
use crate::features::reports::dtos::BadgeDto;
use crate::features::reports::engine::{current_message, Audience, ResponseOption};
use crate::features::reports::models::{Report, ReportStatus};

// =============================================================================
// REPORT CARD
// =============================================================================

/// One row of the admin report list
#[derive(Debug, Clone, Serialize)]
pub struct AdminReportCardDto {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub submitted: Option<String>,
    /// Absent when the report carries no recognised level
    pub noise_level: Option<BadgeDto>,
    pub status: BadgeDto,
    pub consecutive_days: Option<String>,
    pub response_heading: String,
    pub response_message: String,
    pub response_hint: String,
    pub awaiting_response: bool,
    pub comment: Option<String>,
    pub coordinates: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

impl AdminReportCardDto {
    pub fn from_report(report: &Report, now: DateTime<Utc>) -> Self {
        Self {
            id: report.id.clone(),
            icon: reason_icon(report.reason.as_deref()).to_string(),
            title: reason_title(report).to_string(),
            submitted: report.created_at.map(|at| relative_time(at, now)),
            noise_level: report
                .noise_level
                .map(|level| noise_level_badge(Some(level)).into()),
            status: status_badge(report.status).into(),
            consecutive_days: consecutive_days_badge(report),
            response_heading: response_heading(report).to_string(),
            response_message: current_message(report, Audience::Admin),
            response_hint: response_hint(report).to_string(),
            awaiting_response: report.is_pending(),
            comment: report.comment.clone().filter(|c| !c.trim().is_empty()),
            coordinates: report.location.as_ref().map(|l| l.coordinates_line()),
            audio_url: report.audio_url().map(str::to_string),
            video_url: report.video_url().map(str::to_string),
        }
    }
}

// =============================================================================
// RESPONSE PICKER
// =============================================================================

/// A response option with its selection state
#[derive(Debug, Clone, Serialize)]
pub struct ResponseChoiceDto {
    pub status: ReportStatus,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub message: String,
    pub selected: bool,
}

impl ResponseChoiceDto {
    pub fn new(option: &ResponseOption, selected: Option<ReportStatus>) -> Self {
        Self {
            status: option.status,
            label: option.label.to_string(),
            icon: option.icon.to_string(),
            color: status_badge(Some(option.status)).color.to_string(),
            message: option.message.clone(),
            selected: selected == Some(option.status),
        }
    }
}
