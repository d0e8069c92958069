use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reverse-geocoded address components captured alongside the coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl LocationAddress {
    /// "street city", skipping missing parts; `None` when both are absent
    pub fn short_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.street.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Where the disturbance was recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<LocationAddress>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ReportLocation {
    /// Coordinates with six decimal places, as shown on report cards
    pub fn coordinates_line(&self) -> String {
        format!("Lat: {:.6}, Lon: {:.6}", self.latitude, self.longitude)
    }
}
