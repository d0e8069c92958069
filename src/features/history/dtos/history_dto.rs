use serde::Serialize;

use crate::features::reports::dtos::BadgeDto;
use crate::features::reports::display::{location_caption, media_caption, status_badge};
use crate::features::reports::engine::{current_message, Audience};
use crate::features::reports::models::Report;

/// One card of the citizen's report history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReportCardDto {
    pub id: String,
    /// e.g. `Jun 4, 2024, 01:00 PM`
    pub submitted: Option<String>,
    pub reason: Option<String>,
    pub location: Option<String>,
    pub media: Option<String>,
    pub comment: Option<String>,
    pub status: BadgeDto,
    pub response_message: String,
}

impl From<&Report> for HistoryReportCardDto {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            submitted: report
                .created_at
                .map(|at| at.format("%b %-d, %Y, %I:%M %p").to_string()),
            reason: report.reason.clone(),
            location: location_caption(report),
            media: media_caption(report).map(str::to_string),
            comment: report.comment.clone().filter(|c| !c.trim().is_empty()),
            status: status_badge(report.status).into(),
            response_message: current_message(report, Audience::Citizen),
        }
    }
}

/// Header line, e.g. `3 reports submitted`
pub fn history_subtitle(count: usize) -> String {
    if count == 1 {
        "1 report submitted".to_string()
    } else {
        format!("{} reports submitted", count)
    }
}
