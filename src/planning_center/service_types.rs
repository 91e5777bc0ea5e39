//! Service type lookup by name.

use super::api::PlanningCenterApi;
use super::types::{Document, ServiceType};
use crate::error::{Error, Result};

/// Fetch all service types
pub async fn fetch_service_types(api: &dyn PlanningCenterApi) -> Result<Vec<ServiceType>> {
    let path = "/service_types";
    let doc = Document::from_value(api.get(path, &[]).await?, path)?;
    Ok(doc.data.iter().filter_map(ServiceType::from_resource).collect())
}

/// Find the first service type whose name matches `name`, ignoring case and
/// surrounding whitespace on both sides
pub async fn resolve_service_type(api: &dyn PlanningCenterApi, name: &str) -> Result<ServiceType> {
    let wanted = name.trim().to_lowercase();
    let found = fetch_service_types(api)
        .await?
        .into_iter()
        .find(|s| s.name.trim().to_lowercase() == wanted)
        .ok_or_else(|| Error::not_found(format!("Service type {name:?}")))?;

    tracing::info!(id = %found.id, "Using service type: {}", found.name);
    Ok(found)
}
