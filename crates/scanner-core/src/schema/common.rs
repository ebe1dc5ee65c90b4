use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Yahoo wraps most numbers in a formatting object, as below:
///
/// ```text
/// "trailingPE": { "raw": 29.51, "fmt": "29.51" }
/// ```
///
/// But absent values come back as an empty object, a `null`, or not at all,
/// and flat records (e.g., cached `info` dumps) carry the bare number:
///
/// ```text
/// "trailingPE": {}
/// "trailingPE": 29.51
/// ```
///
/// `de_raw` reads all of them into an `Option<f64>`. Non-numeric raws, like
/// `"Infinity"`, read as absent.
pub fn de_raw<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Deserialize::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(num)) => num.as_f64(),
        Some(Value::Object(map)) => map.get("raw").and_then(Value::as_f64),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Transform a `unix timestamp` + `exchange gmtoffset` -> `local date`, e.g.,
///             `1705930200`     + `-18000`            -> `2024-01-22`
pub fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|time| time.date_naive())
}

/// Error object returned next to (or instead of) a `result`.
///
/// ```text
/// "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}
