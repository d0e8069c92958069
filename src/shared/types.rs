use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Error body returned by the backend on non-success statuses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode an optional string-backed enum, turning unknown or mistyped values into `None`.
///
/// Report records are loosely shaped, so a value this client does not
/// recognise must degrade to "absent" instead of failing the whole list.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.trim().parse::<T>().ok()))
}

/// Decode an optional nested value, turning a malformed shape into `None`
pub fn lenient_value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a non-negative day counter that may arrive as a number, a string, or not at all.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let count = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.floor() as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_count")]
        days: u32,
    }

    #[test]
    fn test_lenient_count_shapes() {
        let cases = [
            (r#"{"days": 4}"#, 4),
            (r#"{"days": "2"}"#, 2),
            (r#"{"days": -3}"#, 0),
            (r#"{"days": 2.7}"#, 2),
            (r#"{"days": null}"#, 0),
            (r#"{}"#, 0),
        ];
        for (json, expected) in cases {
            let sample: Sample = serde_json::from_str(json).unwrap();
            assert_eq!(sample.days, expected, "input {}", json);
        }
    }
}
