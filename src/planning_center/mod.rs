//! Planning Center API integration.
//!
//! Provides the authenticated API client and the lookups built on it:
//! service type by name, plan by date or by schedule, and the plan's songs.

/// API client for Planning Center Online requests
pub mod api;
/// Canned-response API for tests
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
/// Plan lookup strategies
pub mod plans;
/// Service type lookup
pub mod service_types;
/// Song extraction from plan items
pub mod songs;
/// Data types representing Planning Center resources
pub mod types;

// Re-export key components
pub use api::{PlanningCenterApi, PlanningCenterClient};
pub use plans::{find_next_scheduled_plan, find_plan_by_date, select_plan, PlanSelection};
pub use service_types::resolve_service_type;
pub use songs::{extract_songs, fetch_plan_songs};
pub use types::{Plan, ServiceType, Song};
