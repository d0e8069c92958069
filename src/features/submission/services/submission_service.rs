use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::clients::ReportBackend;
use crate::features::reports::display::{noise_level_badge, noise_level_description};
use crate::features::reports::dtos::NewReportPayload;
use crate::features::reports::models::Report;
use crate::features::submission::dtos::NewReportDto;
use crate::shared::constants::NOTICE_LOGIN_AGAIN;

/// Validates a composed report and uploads it with its evidence
pub struct SubmissionService {
    backend: Arc<dyn ReportBackend>,
    user_id: Option<String>,
}

impl SubmissionService {
    pub fn new(backend: Arc<dyn ReportBackend>, user_id: Option<String>) -> Self {
        Self { backend, user_id }
    }

    /// Check the form and build the upload payload without touching the network
    pub fn prepare(&self, dto: &NewReportDto) -> Result<NewReportPayload> {
        if let Some(problem) = dto.first_problem() {
            return Err(AppError::Validation(problem));
        }

        let user_id = self
            .user_id
            .clone()
            .ok_or_else(|| AppError::Unauthenticated(NOTICE_LOGIN_AGAIN.to_string()))?;

        // All three are guaranteed by `first_problem` returning None
        let (Some(media), Some(reason), Some(noise_level)) =
            (dto.media.clone(), dto.reason.clone(), dto.noise_level)
        else {
            return Err(AppError::Internal(
                "validated report is missing required fields".to_string(),
            ));
        };

        Ok(NewReportPayload {
            user_id,
            media,
            reason: reason.trim().to_string(),
            noise_level,
            comment: dto.trimmed_comment(),
            location: dto.location.clone(),
        })
    }

    pub async fn submit(&self, dto: &NewReportDto) -> Result<Report> {
        let payload = self.prepare(dto)?;

        if !tokio::fs::try_exists(&payload.media.path).await? {
            return Err(AppError::Validation(format!(
                "Recording not found at {}",
                payload.media.path.display()
            )));
        }

        tracing::info!(
            "Submitting {} report with {} evidence",
            payload.noise_level,
            payload.media.media_type
        );
        self.backend.submit_report(payload).await
    }
}

/// Confirmation text shown after a successful submission
pub fn submission_summary(dto: &NewReportDto) -> String {
    let mut lines = vec!["Noise Report Submitted Successfully!".to_string(), String::new()];

    if let Some(reason) = &dto.reason {
        lines.push(format!("Reason: {}", reason.trim()));
    }
    if let Some(comment) = dto.trimmed_comment() {
        lines.push(format!("Details: {}", comment));
    }
    if let Some(level) = dto.noise_level {
        lines.push(format!(
            "Noise Level: {} ({})",
            noise_level_badge(Some(level)).label,
            noise_level_description(level)
        ));
    }
    if let Some(media) = &dto.media {
        let name = media
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!("{}: {}", capitalize(media.media_type.as_str()), name));
    }
    match &dto.location {
        Some(location) => {
            if let Some(line) = location.address.as_ref().and_then(|a| a.short_line()) {
                lines.push(format!("Location: {}", line));
            }
            lines.push(format!(
                "Coordinates: {:.6}, {:.6}",
                location.latitude, location.longitude
            ));
        }
        None => lines.push("Location: Not provided".to_string()),
    }

    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
