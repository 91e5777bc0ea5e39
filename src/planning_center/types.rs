//! Planning Center data types.
//!
//! These types represent the data structures from the Planning Center API.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Look up a nested field, returning `None` as soon as any step is missing or null
pub fn dig<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |v, key| v.get(key))
        .filter(|v| !v.is_null())
}

/// Look up a nested string field
pub fn dig_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    dig(value, path)?.as_str()
}

/// A JSON:API response document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Primary resources
    #[serde(default)]
    pub data: Vec<Value>,
    /// Side-loaded resources referenced by relationship id
    #[serde(default)]
    pub included: Vec<Value>,
    /// Pagination links
    #[serde(default)]
    pub links: Links,
}

/// Pagination links of a listing response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    /// Absolute URL of the following page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

impl Document {
    /// Decode a response body, requiring a `data` array
    pub fn from_value(value: Value, origin: &str) -> Result<Self> {
        if !value.get("data").is_some_and(Value::is_array) {
            return Err(Error::parse("Missing 'data' array in response", origin.to_string()));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::parse(format!("Unexpected response shape: {e}"), origin.to_string()))
    }
}

/// Represents a type of service (e.g., "Sunday Morning")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceType {
    /// API identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl ServiceType {
    /// Read a service type resource, skipping entries without an id
    pub fn from_resource(resource: &Value) -> Option<Self> {
        Some(Self {
            id: dig_str(resource, &["id"])?.to_string(),
            name: dig_str(resource, &["attributes", "name"]).unwrap_or_default().to_string(),
        })
    }
}

/// Represents a specific instance of a service on a particular date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// API identifier
    pub id: String,
    /// Calendar date the plan sorts by; plans without one are never matched
    pub sort_date: Option<NaiveDate>,
    /// Display title (may be empty)
    pub title: String,
    /// Human-readable date range (e.g., "June 9, 2024")
    pub dates: String,
}

impl Plan {
    /// Read a plan resource. A present but malformed `sort_date` is an error.
    pub fn from_resource(resource: &Value) -> Result<Self> {
        let id = dig_str(resource, &["id"])
            .ok_or_else(|| Error::parse("Plan resource without an id", None))?
            .to_string();
        let sort_date = dig_str(resource, &["attributes", "sort_date"])
            .map(parse_plan_date)
            .transpose()?;

        Ok(Self {
            id,
            sort_date,
            title: dig_str(resource, &["attributes", "title"]).unwrap_or_default().to_string(),
            dates: dig_str(resource, &["attributes", "dates"]).unwrap_or_default().to_string(),
        })
    }

    /// Title for display, falling back to the date range
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { &self.dates } else { &self.title }
    }
}

/// Relationship record linking a person to a plan's team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Linked person id, if the member is tied to a person record
    pub person_id: Option<String>,
}

impl TeamMember {
    /// Read a team member resource
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            person_id: dig_str(resource, &["relationships", "person", "data", "id"])
                .map(String::from),
        }
    }
}

/// Represents an element within a plan (e.g., song, header, media)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    /// Raw item type as reported by the API
    pub item_type: String,
    /// Item title
    pub title: String,
    /// Arrangement relationship id
    pub arrangement_ref: Option<String>,
    /// Key relationship id
    pub key_ref: Option<String>,
}

impl PlanItem {
    /// Read an item resource
    pub fn from_resource(resource: &Value) -> Self {
        let rel = |name: &str| dig_str(resource, &["relationships", name, "data", "id"]).map(String::from);
        Self {
            item_type: dig_str(resource, &["attributes", "item_type"]).unwrap_or_default().to_string(),
            title: dig_str(resource, &["attributes", "title"]).unwrap_or_default().to_string(),
            arrangement_ref: rel("arrangement"),
            key_ref: rel("key"),
        }
    }

    /// Whether this item is a song line
    pub fn is_song(&self) -> bool {
        self.item_type.eq_ignore_ascii_case(crate::constants::api::SONG_ITEM_TYPE)
    }
}

/// A song in the setlist with its musical metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Item title as it appears in the plan
    pub title: String,
    /// Arrangement tempo
    pub bpm: Option<f64>,
    /// Arrangement time signature (e.g., "4/4")
    pub meter: Option<String>,
    /// Key name (e.g., "G")
    pub key: Option<String>,
}

impl Song {
    /// A song with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), bpm: None, meter: None, key: None }
    }
}

/// Parse a plan's `sort_date` into the calendar date it was scheduled on.
///
/// Accepts RFC 3339 timestamps, naive timestamps and bare `YYYY-MM-DD`. The
/// date is taken as written; no timezone conversion is applied.
pub fn parse_plan_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    parse_date(raw)
}

/// Parse a `YYYY-MM-DD` date.
///
/// Only the zero-padded form is accepted, since dates are matched by their
/// exact text: `2024-6-9` is rejected rather than read as 2024-06-09.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let text = raw.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| Error::date_parse(raw, e))?;
    if date.format("%Y-%m-%d").to_string() != text {
        return Err(Error::date_parse(raw, "expected YYYY-MM-DD"));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn dig_treats_null_as_absent() {
        let v = json!({ "relationships": { "key": { "data": null } } });
        assert!(dig(&v, &["relationships", "key", "data"]).is_none());
        assert!(dig(&v, &["relationships", "key", "data", "id"]).is_none());
        assert!(dig(&v, &["relationships", "missing"]).is_none());
        assert!(dig(&v, &["relationships", "key"]).is_some());
    }

    #[test]
    fn plan_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(parse_plan_date("2024-06-09T10:00:00Z").unwrap(), expected);
        assert_eq!(parse_plan_date("2024-06-09T23:30:00-05:00").unwrap(), expected);
        assert_eq!(parse_plan_date("2024-06-09T10:00:00").unwrap(), expected);
        assert_eq!(parse_plan_date("2024-06-09").unwrap(), expected);
        assert!(matches!(parse_plan_date("next sunday"), Err(Error::DateParse { .. })));
    }

    #[test]
    fn date_format_round_trips() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_date(&d.format("%Y-%m-%d").to_string()).unwrap(), d);
        assert_eq!(d.to_string(), "2024-02-29");
    }

    #[test]
    fn date_requires_padded_fields() {
        assert!(matches!(parse_date("2024-6-9"), Err(Error::DateParse { .. })));
        assert!(matches!(parse_date("2024-06-9"), Err(Error::DateParse { .. })));
        assert_eq!(parse_date(" 2024-06-09 ").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
    }

    #[test]
    fn plan_without_sort_date() {
        let plan = Plan::from_resource(&json!({
            "id": "p1",
            "attributes": { "sort_date": null, "title": null, "dates": "No dates" }
        }))
        .unwrap();
        assert_eq!(plan.sort_date, None);
        assert_eq!(plan.display_title(), "No dates");
    }

    #[test]
    fn plan_with_malformed_sort_date_fails() {
        let err = Plan::from_resource(&json!({
            "id": "p1",
            "attributes": { "sort_date": "sometime" }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::DateParse { .. }));
    }

    #[test]
    fn item_type_is_case_insensitive() {
        let item = PlanItem::from_resource(&json!({
            "attributes": { "item_type": "Song", "title": "Oceans" },
            "relationships": { "arrangement": { "data": { "type": "Arrangement", "id": "a1" } } }
        }));
        assert!(item.is_song());
        assert_eq!(item.arrangement_ref.as_deref(), Some("a1"));
        assert_eq!(item.key_ref, None);
    }

    #[test]
    fn document_requires_data_array() {
        assert!(Document::from_value(json!({ "errors": [] }), "/plans").is_err());
        let doc = Document::from_value(
            json!({ "data": [], "links": { "next": "https://x/plans?offset=25" } }),
            "/plans",
        )
        .unwrap();
        assert!(doc.included.is_empty());
        assert_eq!(doc.links.next.as_deref(), Some("https://x/plans?offset=25"));
    }
}
