use super::ResolutionError;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Providers send `null` for fields they know nothing about.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Loose truthiness of the provider's `error` flag.
fn is_set(flag: &Value) -> bool {
    match flag {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Geolocation of a single address, as reported by the provider.
///
/// Records are only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub utc_offset: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timezone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub org: String,
}

impl LocationRecord {
    pub fn coordinates(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Normalize a successful (2xx) response body.
    pub fn from_payload(text: &str) -> Result<Self, ResolutionError> {
        let parse_error = || ResolutionError::ParseError {
            raw_text: text.to_owned(),
        };
        let payload: Value = serde_json::from_str(text).map_err(|_| parse_error())?;
        if payload.get("error").map_or(false, is_set) {
            let reason = match payload.get("reason") {
                None => String::new(),
                Some(Value::String(reason)) => reason.clone(),
                Some(reason) => reason.to_string(),
            };
            return Err(ResolutionError::ApiError { reason });
        }
        serde_json::from_value(payload).map_err(|_| parse_error())
    }
}
