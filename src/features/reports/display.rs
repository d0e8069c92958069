//! Lookup tables shared by the admin and citizen views.
//!
//! Each mapping is total: unknown or missing keys resolve to a neutral entry.

use chrono::{DateTime, Utc};

use super::models::{NoiseLevel, Report, ReportStatus};

/// Colour pair and label for a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub color: &'static str,
    pub background: &'static str,
    pub label: &'static str,
}

const UNKNOWN_LEVEL_BADGE: Badge = Badge {
    color: "#999999",
    background: "#F5F5F5",
    label: "Unknown",
};

pub fn noise_level_badge(level: Option<NoiseLevel>) -> Badge {
    match level {
        Some(NoiseLevel::Red) => Badge {
            color: "#F44336",
            background: "#FFEBEE",
            label: "High",
        },
        Some(NoiseLevel::Yellow) => Badge {
            color: "#FFC107",
            background: "#FFF9C4",
            label: "Medium",
        },
        Some(NoiseLevel::Green) => Badge {
            color: "#4CAF50",
            background: "#E8F5E9",
            label: "Low",
        },
        None => UNKNOWN_LEVEL_BADGE,
    }
}

/// Badge for a status; an unset status renders as pending
pub fn status_badge(status: Option<ReportStatus>) -> Badge {
    match status.unwrap_or_default() {
        ReportStatus::Pending => Badge {
            color: "#999999",
            background: "#F5F5F5",
            label: "Pending",
        },
        ReportStatus::ActionRequired => Badge {
            color: "#F44336",
            background: "#FFEBEE",
            label: "Action Required",
        },
        ReportStatus::Monitoring => Badge {
            color: "#FFC107",
            background: "#FFF9C4",
            label: "Monitoring",
        },
        ReportStatus::Resolved => Badge {
            color: "#4CAF50",
            background: "#E8F5E9",
            label: "Resolved",
        },
    }
}

/// Short description used by the severity picker on the submission form
pub fn noise_level_description(level: NoiseLevel) -> &'static str {
    match level {
        NoiseLevel::Green => "Mild disturbance",
        NoiseLevel::Yellow => "Moderate noise",
        NoiseLevel::Red => "Severe disturbance",
    }
}

/// Filter chips on the admin list, in display order
pub const REASON_FILTERS: [&str; 6] = ["All", "Music", "Vehicle", "Construction", "Party", "Animal"];

const REASON_ICONS: [(&str, &str); 7] = [
    ("Music", "🔊"),
    ("Vehicle", "🚗"),
    ("Construction", "🔨"),
    ("Party", "🎉"),
    ("Animal", "🐕"),
    ("Industrial", "🏭"),
    ("Shouting", "🗣️"),
];

const DEFAULT_REASON_ICON: &str = "📢";

pub fn reason_icon(reason: Option<&str>) -> &'static str {
    let Some(reason) = reason else {
        return DEFAULT_REASON_ICON;
    };
    REASON_ICONS
        .iter()
        .find(|(keyword, _)| reason.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_REASON_ICON)
}

/// Whether `report` is shown under the reason `filter`. `"All"` matches everything.
pub fn matches_reason_filter(report: &Report, filter: &str) -> bool {
    if filter == "All" {
        return true;
    }
    report
        .reason
        .as_deref()
        .is_some_and(|reason| reason.contains(filter))
}

/// Title shown on a report card
pub fn reason_title(report: &Report) -> &str {
    report
        .reason
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("Noise Report")
}

/// "N consecutive days" badge text, shown only once a report repeats
pub fn consecutive_days_badge(report: &Report) -> Option<String> {
    (report.consecutive_days > 1).then(|| format!("{} consecutive days", report.consecutive_days))
}

/// Heading of the response panel on the admin card
pub fn response_heading(report: &Report) -> &'static str {
    if report.is_pending() {
        "No Response Sent"
    } else {
        "System Response"
    }
}

/// Hint under the response panel on the admin card
pub fn response_hint(report: &Report) -> &'static str {
    if report.is_pending() {
        "Tap to select and send response"
    } else {
        "Tap to change response & status"
    }
}

/// Attachment line on the citizen history card
pub fn media_caption(report: &Report) -> Option<&'static str> {
    report.media_type.map(|media| match media {
        super::models::MediaType::Video => "Video attached",
        super::models::MediaType::Audio => "Audio recording",
    })
}

/// Location line on the citizen history card
pub fn location_caption(report: &Report) -> Option<String> {
    report.location.as_ref().map(|location| {
        location
            .address
            .as_ref()
            .and_then(|a| a.street.clone())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Location captured".to_string())
    })
}

/// Age of `created_at` relative to `now`: `Just now`, `5m ago`, `3h ago`,
/// `2d ago`, then the calendar date (`Jun 4`).
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        created_at.format("%b %-d").to_string()
    }
}
