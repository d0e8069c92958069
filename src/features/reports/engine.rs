//! Report status and response policy.
//!
//! Maps `(noise level, consecutive days, status)` to the selectable responses
//! an administrator may send and to the message shown for a report's current
//! state. Both the admin review screen and the citizen history screen call
//! into this module, so the same record always yields the same text.
//!
//! Every function here is total: unknown levels produce no options and a
//! neutral message, an unset status is `pending`.

use super::models::{NoiseLevel, Report, ReportStatus};
use crate::shared::constants::{RED_ACTION_THRESHOLD_DAYS, YELLOW_ACTION_THRESHOLD_DAYS};

pub const ADMIN_PENDING_MESSAGE: &str = "No response sent yet.";
pub const CITIZEN_PENDING_MESSAGE: &str = "Your report is being reviewed by the barangay.";
pub const NEUTRAL_MESSAGE: &str = "Your report has been received.";

/// Who the message is rendered for. Only the pending placeholder differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Citizen,
}

/// One selectable response in a noise level's track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOption {
    pub status: ReportStatus,
    pub label: &'static str,
    pub icon: &'static str,
    pub message: String,
}

impl ResponseOption {
    fn monitoring(message: String) -> Self {
        Self {
            status: ReportStatus::Monitoring,
            label: "Monitoring",
            icon: "eye",
            message,
        }
    }

    fn action_required(message: &str) -> Self {
        Self {
            status: ReportStatus::ActionRequired,
            label: "Action Required",
            icon: "alert-circle",
            message: message.to_string(),
        }
    }

    fn resolved(message: &str) -> Self {
        Self {
            status: ReportStatus::Resolved,
            label: "Resolved",
            icon: "checkmark-circle",
            message: message.to_string(),
        }
    }
}

/// Consecutive days required before `action_required` is offered; `None` for green
pub fn escalation_threshold(level: NoiseLevel) -> Option<u32> {
    match level {
        NoiseLevel::Red => Some(RED_ACTION_THRESHOLD_DAYS),
        NoiseLevel::Yellow => Some(YELLOW_ACTION_THRESHOLD_DAYS),
        NoiseLevel::Green => None,
    }
}

fn monitoring_message(level: NoiseLevel, consecutive_days: u32) -> String {
    match level {
        NoiseLevel::Red => format!(
            "We have received your report. The barangay is monitoring this location. \
             Progress: Day {} of {} consecutive reports for RED noise.",
            consecutive_days, RED_ACTION_THRESHOLD_DAYS
        ),
        NoiseLevel::Yellow => format!(
            "Your report has been recorded. The barangay will continue monitoring. \
             Progress: Day {} of {} consecutive reports for YELLOW noise.",
            consecutive_days, YELLOW_ACTION_THRESHOLD_DAYS
        ),
        NoiseLevel::Green => "Your report has been received. This minor noise is under observation. \
             The barangay advises communicating with neighbors to resolve minor disturbances."
            .to_string(),
    }
}

/// Ordered escalation ladder for a report: `monitoring`, then `action_required`
/// once the level's threshold is met, then `resolved`.
pub fn available_responses(
    level: Option<NoiseLevel>,
    consecutive_days: u32,
) -> Vec<ResponseOption> {
    let Some(level) = level else {
        return Vec::new();
    };

    let mut responses = vec![ResponseOption::monitoring(monitoring_message(
        level,
        consecutive_days,
    ))];

    match level {
        NoiseLevel::Red => {
            if consecutive_days >= RED_ACTION_THRESHOLD_DAYS {
                responses.push(ResponseOption::action_required(
                    "The noise at this location has been reported for 3 consecutive days. \
                     A barangay officer has been assigned to take action. \
                     You will be updated once resolved.",
                ));
            }
            responses.push(ResponseOption::resolved(
                "Your noise complaint has been resolved. \
                 Appropriate action has been taken by the barangay.",
            ));
        }
        NoiseLevel::Yellow => {
            if consecutive_days >= YELLOW_ACTION_THRESHOLD_DAYS {
                responses.push(ResponseOption::action_required(
                    "The noise has been reported for 5 consecutive days. \
                     A barangay officer will take action. You will be updated once resolved.",
                ));
            }
            responses.push(ResponseOption::resolved(
                "Your noise complaint has been resolved. The barangay has addressed the issue.",
            ));
        }
        NoiseLevel::Green => {
            responses.push(ResponseOption::resolved(
                "Advice has been provided regarding your noise report. The matter is now closed.",
            ));
        }
    }

    responses
}

fn ladder_rank(status: ReportStatus) -> u8 {
    match status {
        ReportStatus::Pending => 0,
        ReportStatus::Monitoring => 1,
        ReportStatus::ActionRequired => 2,
        ReportStatus::Resolved => 3,
    }
}

/// Responses an administrator may pick for `report`: the available ladder
/// without any step strictly earlier than the report's current status.
pub fn selectable_responses(report: &Report) -> Vec<ResponseOption> {
    let current = ladder_rank(report.effective_status());
    available_responses(report.noise_level, report.consecutive_days)
        .into_iter()
        .filter(|option| ladder_rank(option.status) >= current)
        .collect()
}

/// Message for an explicit `(level, status, days)` triple
pub fn message_for(
    level: Option<NoiseLevel>,
    status: Option<ReportStatus>,
    consecutive_days: u32,
    audience: Audience,
) -> String {
    let status = status.unwrap_or_default();
    if status == ReportStatus::Pending {
        return match audience {
            Audience::Admin => ADMIN_PENDING_MESSAGE.to_string(),
            Audience::Citizen => CITIZEN_PENDING_MESSAGE.to_string(),
        };
    }

    let mut responses = available_responses(level, consecutive_days);
    if let Some(index) = responses.iter().position(|r| r.status == status) {
        return responses.swap_remove(index).message;
    }

    // Status set before its threshold was reached (or an unknown level):
    // describe the monitoring state instead.
    match level {
        Some(level) => monitoring_message(level, consecutive_days),
        None => NEUTRAL_MESSAGE.to_string(),
    }
}

/// Canonical message describing `report`'s current state for `audience`
pub fn current_message(report: &Report, audience: Audience) -> String {
    message_for(
        report.noise_level,
        report.status,
        report.consecutive_days,
        audience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(level: Option<NoiseLevel>, status: Option<ReportStatus>, days: u32) -> Report {
        Report {
            id: "r-1".to_string(),
            user_id: None,
            reason: Some("Loud Music".to_string()),
            noise_level: level,
            consecutive_days: days,
            status,
            comment: None,
            location: None,
            media_type: None,
            media_url: None,
            created_at: None,
        }
    }

    fn statuses(options: &[ResponseOption]) -> Vec<ReportStatus> {
        options.iter().map(|o| o.status).collect()
    }

    #[test]
    fn test_ladder_starts_with_monitoring_and_ends_with_resolved() {
        for level in NoiseLevel::ALL {
            for days in 0..=10 {
                let options = available_responses(Some(level), days);
                assert!(!options.is_empty());
                assert_eq!(options[0].status, ReportStatus::Monitoring);
                assert_eq!(options[options.len() - 1].status, ReportStatus::Resolved);
            }
        }
    }

    #[test]
    fn test_action_required_thresholds() {
        for days in 0..=10 {
            let has_action = |level| {
                available_responses(Some(level), days)
                    .iter()
                    .any(|o| o.status == ReportStatus::ActionRequired)
            };
            assert_eq!(has_action(NoiseLevel::Red), days >= 3, "red day {}", days);
            assert_eq!(has_action(NoiseLevel::Yellow), days >= 5, "yellow day {}", days);
            assert!(!has_action(NoiseLevel::Green), "green day {}", days);
        }
    }

    #[test]
    fn test_red_below_threshold() {
        let options = available_responses(Some(NoiseLevel::Red), 2);
        assert_eq!(
            statuses(&options),
            vec![ReportStatus::Monitoring, ReportStatus::Resolved]
        );
        assert!(options[0].message.contains("Day 2 of 3"));
    }

    #[test]
    fn test_red_at_threshold() {
        let options = available_responses(Some(NoiseLevel::Red), 3);
        assert_eq!(
            statuses(&options),
            vec![
                ReportStatus::Monitoring,
                ReportStatus::ActionRequired,
                ReportStatus::Resolved
            ]
        );
        assert!(options[1].message.contains("3 consecutive days"));
        assert!(options[1].message.contains("officer has been assigned"));
        assert_eq!(options[1].label, "Action Required");
        assert_eq!(options[1].icon, "alert-circle");
    }

    #[test]
    fn test_yellow_at_threshold() {
        let options = available_responses(Some(NoiseLevel::Yellow), 5);
        let action = options
            .iter()
            .find(|o| o.status == ReportStatus::ActionRequired)
            .expect("action_required offered at day 5");
        assert!(action.message.contains("5 consecutive days"));
        assert!(options[0].message.contains("Day 5 of 5"));
    }

    #[test]
    fn test_green_has_advisory_monitoring() {
        let options = available_responses(Some(NoiseLevel::Green), 9);
        assert_eq!(options.len(), 2);
        assert!(options[0].message.contains("communicating with neighbors"));
        assert!(!options[0].message.contains("Day"));
    }

    #[test]
    fn test_unknown_level_has_no_options() {
        assert!(available_responses(None, 0).is_empty());
        assert!(available_responses(None, 12).is_empty());
    }

    #[test]
    fn test_available_responses_is_idempotent() {
        for level in [None, Some(NoiseLevel::Red), Some(NoiseLevel::Yellow)] {
            assert_eq!(available_responses(level, 4), available_responses(level, 4));
        }
    }

    #[test]
    fn test_pending_placeholders_differ_by_audience() {
        let r = report(Some(NoiseLevel::Green), None, 0);
        assert_eq!(current_message(&r, Audience::Admin), "No response sent yet.");
        assert_eq!(
            current_message(&r, Audience::Citizen),
            "Your report is being reviewed by the barangay."
        );

        let explicit = report(Some(NoiseLevel::Red), Some(ReportStatus::Pending), 4);
        assert_eq!(current_message(&explicit, Audience::Admin), ADMIN_PENDING_MESSAGE);
    }

    #[test]
    fn test_sent_response_identical_for_both_audiences() {
        let r = report(Some(NoiseLevel::Red), Some(ReportStatus::Resolved), 1);
        let admin = current_message(&r, Audience::Admin);
        assert_eq!(admin, current_message(&r, Audience::Citizen));
        assert!(admin.contains("has been resolved"));
    }

    #[test]
    fn test_premature_action_required_falls_back_to_monitoring() {
        let r = report(Some(NoiseLevel::Yellow), Some(ReportStatus::ActionRequired), 2);
        let message = current_message(&r, Audience::Citizen);
        assert!(message.contains("Day 2 of 5"));
        assert!(message.contains("continue monitoring"));
    }

    #[test]
    fn test_current_message_is_total() {
        let levels = [
            None,
            Some(NoiseLevel::Green),
            Some(NoiseLevel::Yellow),
            Some(NoiseLevel::Red),
        ];
        let statuses = [
            None,
            Some(ReportStatus::Pending),
            Some(ReportStatus::Monitoring),
            Some(ReportStatus::ActionRequired),
            Some(ReportStatus::Resolved),
        ];
        for level in levels {
            for status in statuses {
                for days in [0, 1, 3, 5, 40] {
                    for audience in [Audience::Admin, Audience::Citizen] {
                        let message = message_for(level, status, days, audience);
                        assert!(
                            !message.trim().is_empty(),
                            "{:?}/{:?}/{}/{:?}",
                            level,
                            status,
                            days,
                            audience
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_level_sent_status_is_neutral() {
        let r = report(None, Some(ReportStatus::Monitoring), 3);
        assert_eq!(current_message(&r, Audience::Admin), NEUTRAL_MESSAGE);
        assert!(available_responses(r.noise_level, r.consecutive_days).is_empty());
    }

    #[test]
    fn test_selectable_responses_never_step_back() {
        let pending = report(Some(NoiseLevel::Red), None, 4);
        assert_eq!(selectable_responses(&pending).len(), 3);

        let escalated = report(Some(NoiseLevel::Red), Some(ReportStatus::ActionRequired), 4);
        assert_eq!(
            statuses(&selectable_responses(&escalated)),
            vec![ReportStatus::ActionRequired, ReportStatus::Resolved]
        );

        let resolved = report(Some(NoiseLevel::Green), Some(ReportStatus::Resolved), 0);
        assert_eq!(
            statuses(&selectable_responses(&resolved)),
            vec![ReportStatus::Resolved]
        );
    }

    #[test]
    fn test_escalation_threshold() {
        assert_eq!(escalation_threshold(NoiseLevel::Red), Some(3));
        assert_eq!(escalation_threshold(NoiseLevel::Yellow), Some(5));
        assert_eq!(escalation_threshold(NoiseLevel::Green), None);
    }
}
