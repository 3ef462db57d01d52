//! The `history` entity and the write payload that produces it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::NOT_APPLICABLE;
use crate::error::ValidationError;
use crate::timestamp::parse_analysis_date;

/// One persisted analysis result, as returned by the read handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    #[serde(with = "analysis_date_format")]
    pub analysis_date: NaiveDateTime,
    pub file_name: String,
    pub total_cells: Option<i64>,
    pub density_cells_ml: Option<f64>,
}

/// A validated history row waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryRecord {
    pub analysis_date: NaiveDateTime,
    pub file_name: String,
    pub total_cells: Option<i64>,
    pub density_cells_ml: Option<f64>,
}

/// A measurement as it arrives on the wire: a JSON number, the `"N/A"`
/// sentinel, or a number encoded as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(serde_json::Number),
    Text(String),
}

impl Measurement {
    fn text_value(text: &str) -> Option<&str> {
        let trimmed = text.trim();
        (trimmed != NOT_APPLICABLE).then_some(trimmed)
    }

    /// Interpret as a cell count. Integral floats (`120.0`) are accepted.
    pub fn to_count(&self, field: &'static str) -> Result<Option<i64>, ValidationError> {
        let invalid = || ValidationError::InvalidMeasurement { field, value: self.to_string() };
        match self {
            Self::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)).map(Some).ok_or_else(invalid),
            Self::Text(text) => match Self::text_value(text) {
                None => Ok(None),
                Some(value) => value
                    .parse::<i64>()
                    .ok()
                    .or_else(|| value.parse::<f64>().ok().and_then(integral))
                    .map(Some)
                    .ok_or_else(invalid),
            },
        }
    }

    /// Interpret as a density in cells per millilitre.
    pub fn to_density(&self, field: &'static str) -> Result<Option<f64>, ValidationError> {
        let invalid = || ValidationError::InvalidMeasurement { field, value: self.to_string() };
        match self {
            Self::Number(n) => n.as_f64().map(Some).ok_or_else(invalid),
            Self::Text(text) => match Self::text_value(text) {
                None => Ok(None),
                Some(value) => {
                    value.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some).ok_or_else(invalid)
                },
            },
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::as_conversions,
    reason = "value is checked to be integral and within i64 range first"
)]
fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// Body of a write request, before validation.
///
/// Every field is optional at this stage so that a missing field is reported
/// as such rather than as a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub total_cells: Option<Measurement>,
    #[serde(default)]
    pub density_cells_ml: Option<Measurement>,
}

impl HistoryPayload {
    /// Decode a raw request body. The body must be a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::InvalidBody);
        }
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::InvalidBody)?;
        if !value.is_object() {
            return Err(ValidationError::InvalidBody);
        }
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Check required fields, resolve `N/A` sentinels and normalize the timestamp.
    pub fn validate(self) -> Result<NewHistoryRecord, ValidationError> {
        let file_name = self
            .file_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ValidationError::MissingField("file_name"))?;
        let timestamp = self.timestamp.ok_or(ValidationError::MissingField("timestamp"))?;
        let analysis_date = parse_analysis_date(&timestamp)?;

        let total_cells = match &self.total_cells {
            Some(m) => m.to_count("total_cells")?,
            None => None,
        };
        let density_cells_ml = match &self.density_cells_ml {
            Some(m) => m.to_density("density_cells_ml")?,
            None => None,
        };

        Ok(NewHistoryRecord { analysis_date, file_name, total_cells, density_cells_ml })
    }
}

impl NewHistoryRecord {
    pub fn from_json_body(body: &[u8]) -> Result<Self, ValidationError> {
        HistoryPayload::from_slice(body)?.validate()
    }
}

mod analysis_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::constants::ANALYSIS_DATE_FORMAT;

    pub(super) fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(ANALYSIS_DATE_FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, ANALYSIS_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
