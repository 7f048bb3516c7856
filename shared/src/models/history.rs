//! Search history entries returned alongside advice

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::soil::SoilReading;
use crate::normalize::text_or_empty;

/// Timestamp fields used by successive backend versions, in lookup order
pub const TIMESTAMP_FIELDS: [&str; 3] = ["createdat", "createdAt", "accessedAt"];

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A previous advice lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub county: String,
    pub crop: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub soil_data: SoilReading,
}

impl HistoryEntry {
    pub fn from_value(raw: &Value) -> Self {
        let object = raw.as_object();
        let field = |key: &str| object.and_then(|o| o.get(key));

        let timestamp = TIMESTAMP_FIELDS
            .iter()
            .filter_map(|key| field(*key))
            .find_map(parse_timestamp);

        Self {
            county: text_or_empty(field("county")),
            crop: text_or_empty(field("crop")),
            timestamp,
            soil_data: SoilReading::normalize(field("soilData")),
        }
    }

    /// How this entry's time is shown at `index` in the history list
    pub fn display_time(&self, index: usize) -> HistoryTime {
        if index == 0 {
            return HistoryTime::AccessedNow;
        }
        match self.timestamp {
            Some(ts) => HistoryTime::At(ts),
            None => HistoryTime::Unknown,
        }
    }

    /// `county - crop - time` heading line
    pub fn heading(&self, index: usize) -> String {
        format!("{} - {} - {}", self.county, self.crop, self.display_time(index))
    }

    /// Compact nutrient line, one decimal each
    pub fn soil_summary(&self) -> String {
        let s = &self.soil_data;
        format!(
            "pH: {:.1}, N: {:.1}, P: {:.1}, K: {:.1}",
            s.ph, s.nitrogen, s.phosphorus, s.potassium
        )
    }
}

/// Display form of a history timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTime {
    AccessedNow,
    At(DateTime<Utc>),
    Unknown,
}

impl fmt::Display for HistoryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryTime::AccessedNow => f.write_str("accessed now"),
            HistoryTime::Unknown => f.write_str("unknown time"),
            HistoryTime::At(ts) => write!(
                f,
                "{}",
                ts.with_timezone(&Local).format("%-m/%-d/%Y, %-I:%M:%S %p")
            ),
        }
    }
}

/// Map a raw history list to normalized entries. Anything but an array is empty.
pub fn normalize_history(raw: Option<&Value>) -> Vec<HistoryEntry> {
    raw.and_then(Value::as_array)
        .map(|items| items.iter().map(HistoryEntry::from_value).collect())
        .unwrap_or_default()
}

/// Parse the date forms the advice service has used over time
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            })?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
