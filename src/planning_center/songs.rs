//! Song extraction from plan items.
//!
//! Plan items reference their arrangement and key only by relationship id;
//! the resources themselves arrive side-loaded in `included`. The index is
//! built in full before any item is resolved.

use serde_json::Value;
use std::collections::HashMap;

use super::api::PlanningCenterApi;
use super::types::{dig, dig_str, Document, PlanItem, Song};
use crate::constants::api::ITEM_INCLUDES;
use crate::error::Result;

/// Side-loaded resources keyed by `(type, id)`
#[derive(Debug, Default)]
pub struct IncludedIndex<'a> {
    by_key: HashMap<(String, String), &'a Value>,
}

impl<'a> IncludedIndex<'a> {
    /// Index every included resource that carries both a type and an id
    pub fn build(included: &'a [Value]) -> Self {
        let by_key = included
            .iter()
            .filter_map(|v| {
                let kind = dig_str(v, &["type"])?.to_lowercase();
                Some(((kind, dig_str(v, &["id"])?.to_string()), v))
            })
            .collect();
        Self { by_key }
    }

    /// Look up a resource. Type names compare case-insensitively
    /// ("Arrangement" and "arrangement" are the same type).
    pub fn get(&self, kind: &str, id: &str) -> Option<&'a Value> {
        self.by_key.get(&(kind.to_lowercase(), id.to_string())).copied()
    }

    /// Number of indexed resources
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether nothing was indexed
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Fetch a plan's items with their arrangements and keys and build the setlist
pub async fn fetch_plan_songs(
    api: &dyn PlanningCenterApi,
    service_type_id: &str,
    plan_id: &str,
) -> Result<Vec<Song>> {
    let path = format!("/service_types/{service_type_id}/plans/{plan_id}/items");
    let doc = Document::from_value(api.get(&path, &[("include", ITEM_INCLUDES)]).await?, &path)?;
    let songs = extract_songs(&doc);
    tracing::info!(plan = plan_id, items = doc.data.len(), songs = songs.len(), "Extracted songs");
    Ok(songs)
}

/// Join song items against the included resources, keeping plan order
pub fn extract_songs(doc: &Document) -> Vec<Song> {
    let index = IncludedIndex::build(&doc.included);

    doc.data
        .iter()
        .map(PlanItem::from_resource)
        .filter(PlanItem::is_song)
        .map(|item| resolve_song(&item, &index))
        .collect()
}

fn resolve_song(item: &PlanItem, index: &IncludedIndex<'_>) -> Song {
    let arrangement = item
        .arrangement_ref
        .as_deref()
        .and_then(|id| index.get("Arrangement", id));
    let key = item.key_ref.as_deref().and_then(|id| index.get("Key", id));

    Song {
        title: item.title.clone(),
        bpm: arrangement.and_then(|a| dig(a, &["attributes", "bpm"])).and_then(read_bpm),
        meter: arrangement
            .and_then(|a| dig_str(a, &["attributes", "meter"]))
            .map(String::from),
        key: key.and_then(|k| dig_str(k, &["attributes", "name"])).map(String::from),
    }
}

/// Tempo may be sent as a number or a numeric string
fn read_bpm(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
