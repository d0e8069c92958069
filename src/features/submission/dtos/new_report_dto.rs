use validator::{Validate, ValidationErrors};

use crate::features::reports::dtos::MediaAttachment;
use crate::features::reports::models::{NoiseLevel, ReportLocation};

/// Form state of a report being composed on the device
#[derive(Debug, Clone, Default, Validate)]
pub struct NewReportDto {
    #[validate(required(message = "Please record audio or attach a video first."))]
    pub media: Option<MediaAttachment>,

    #[validate(
        required(message = "Please select a reason for this noise report."),
        length(min = 1, max = 100, message = "Please select a reason for this noise report.")
    )]
    pub reason: Option<String>,

    #[validate(required(message = "Please select the noise level (Low/Medium/High)."))]
    pub noise_level: Option<NoiseLevel>,

    #[validate(length(max = 1000, message = "Details must be at most 1000 characters."))]
    pub comment: Option<String>,

    pub location: Option<ReportLocation>,
}

/// Fields in the order their problems are reported to the user
const FIELD_ORDER: [&str; 4] = ["media", "reason", "noise_level", "comment"];

impl NewReportDto {
    /// Validate and return the first problem in form order, as user-facing text
    pub fn first_problem(&self) -> Option<String> {
        let mut normalized = self.clone();
        normalized.reason = normalized
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        match normalized.validate() {
            Ok(()) => None,
            Err(errors) => Some(first_message(&errors)),
        }
    }

    /// Comment with surrounding whitespace removed, dropped when empty
    pub fn trimmed_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .filter_map(|errs| errs.first())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string())
        })
        .next()
        .unwrap_or_else(|| "Invalid report".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> NewReportDto {
        NewReportDto {
            media: Some(MediaAttachment::audio("/tmp/rec.m4a")),
            reason: Some("🔊 Loud Music".to_string()),
            noise_level: Some(NoiseLevel::Red),
            comment: None,
            location: None,
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert_eq!(complete().first_problem(), None);
    }

    #[test]
    fn test_problems_reported_in_form_order() {
        assert_eq!(
            NewReportDto::default().first_problem().as_deref(),
            Some("Please record audio or attach a video first.")
        );

        let no_reason = NewReportDto {
            reason: Some("   ".to_string()),
            noise_level: None,
            ..complete()
        };
        assert_eq!(
            no_reason.first_problem().as_deref(),
            Some("Please select a reason for this noise report.")
        );

        let no_level = NewReportDto {
            noise_level: None,
            ..complete()
        };
        assert_eq!(
            no_level.first_problem().as_deref(),
            Some("Please select the noise level (Low/Medium/High).")
        );
    }

    #[test]
    fn test_overlong_comment_rejected() {
        let dto = NewReportDto {
            comment: Some("x".repeat(1001)),
            ..complete()
        };
        assert_eq!(
            dto.first_problem().as_deref(),
            Some("Details must be at most 1000 characters.")
        );
    }

    #[test]
    fn test_trimmed_comment() {
        let dto = NewReportDto {
            comment: Some("  loud bass  ".to_string()),
            ..complete()
        };
        assert_eq!(dto.trimmed_comment().as_deref(), Some("loud bass"));
        let blank = NewReportDto {
            comment: Some("   ".to_string()),
            ..complete()
        };
        assert_eq!(blank.trimmed_comment(), None);
    }
}
