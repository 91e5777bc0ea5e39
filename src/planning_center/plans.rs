//! Plan lookup strategies.
//!
//! Both strategies read the plan listing of one service type ordered by
//! `sort_date`. Plans without a sort date are skipped; a malformed one aborts
//! the lookup.

use chrono::NaiveDate;

use super::api::PlanningCenterApi;
use super::types::{Document, Plan, TeamMember};
use crate::constants::api::PLAN_ORDER;
use crate::error::Result;

/// How the target plan is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSelection {
    /// The plan whose sort date is exactly this day
    ByDate(NaiveDate),
    /// The soonest plan, from `today` on, with the person on its team
    NextScheduled {
        /// First day considered
        today: NaiveDate,
    },
}

fn plans_path(service_type_id: &str) -> String {
    format!("/service_types/{service_type_id}/plans")
}

/// Walk every page of the plan listing and return the first plan dated `target`
pub async fn find_plan_by_date(
    api: &dyn PlanningCenterApi,
    service_type_id: &str,
    target: NaiveDate,
) -> Result<Option<Plan>> {
    let path = plans_path(service_type_id);
    let mut body = api.get(&path, &[("order", PLAN_ORDER)]).await?;
    let mut origin = path;

    loop {
        let doc = Document::from_value(body, &origin)?;
        for resource in &doc.data {
            // Parsed one at a time so an earlier match wins over a bad date later on the page.
            let plan = Plan::from_resource(resource)?;
            let Some(date) = plan.sort_date else { continue };
            tracing::debug!(plan = %plan.id, %date, "Checking plan: {}", plan.display_title());
            if date == target {
                tracing::info!(plan = %plan.id, "Selected plan: {} - {}", plan.display_title(), plan.dates);
                return Ok(Some(plan));
            }
        }

        match doc.links.next {
            Some(next) => {
                body = api.get_url(&next).await?;
                origin = next;
            }
            None => return Ok(None),
        }
    }
}

/// Return the soonest plan from `today` on whose team includes `person_id`.
///
/// Only the first page of the listing is inspected; plans beyond it are
/// never considered.
pub async fn find_next_scheduled_plan(
    api: &dyn PlanningCenterApi,
    service_type_id: &str,
    person_id: &str,
    today: NaiveDate,
) -> Result<Option<Plan>> {
    let path = plans_path(service_type_id);
    let doc = Document::from_value(api.get(&path, &[("order", PLAN_ORDER)]).await?, &path)?;

    for resource in &doc.data {
        let plan = Plan::from_resource(resource)?;
        let Some(date) = plan.sort_date else { continue };
        if date < today {
            continue;
        }

        tracing::debug!(plan = %plan.id, %date, "Checking team for plan: {}", plan.display_title());
        if is_on_team(api, service_type_id, &plan.id, person_id).await? {
            tracing::info!(plan = %plan.id, "Auto-selected scheduled plan: {} - {}", plan.display_title(), plan.dates);
            return Ok(Some(plan));
        }
    }

    Ok(None)
}

async fn is_on_team(
    api: &dyn PlanningCenterApi,
    service_type_id: &str,
    plan_id: &str,
    person_id: &str,
) -> Result<bool> {
    let path = format!("/service_types/{service_type_id}/plans/{plan_id}/team_members");
    let doc = Document::from_value(api.get(&path, &[]).await?, &path)?;
    Ok(doc
        .data
        .iter()
        .map(TeamMember::from_resource)
        .any(|m| m.person_id.as_deref() == Some(person_id)))
}

/// Dispatch to the lookup strategy named by `selection`
pub async fn select_plan(
    api: &dyn PlanningCenterApi,
    service_type_id: &str,
    person_id: &str,
    selection: PlanSelection,
) -> Result<Option<Plan>> {
    match selection {
        PlanSelection::ByDate(date) => find_plan_by_date(api, service_type_id, date).await,
        PlanSelection::NextScheduled { today } => {
            find_next_scheduled_plan(api, service_type_id, person_id, today).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;
    use crate::planning_center::fake::StaticApi;
    use serde_json::{json, Value};

    const NEXT: &str = "https://api.example.test/service_types/1/plans?offset=2&order=sort_date";

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plan(id: &str, sort_date: Option<&str>) -> Value {
        json!({
            "type": "Plan",
            "id": id,
            "attributes": { "sort_date": sort_date, "title": format!("Plan {id}"), "dates": "" }
        })
    }

    fn team(person_ids: &[&str]) -> Value {
        let data: Vec<Value> = person_ids
            .iter()
            .map(|p| json!({ "relationships": { "person": { "data": { "type": "Person", "id": p } } } }))
            .collect();
        json!({ "data": data })
    }

    fn paged_api() -> StaticApi {
        StaticApi::new()
            .route("/service_types/1/plans", json!({
                "data": [plan("p1", Some("2024-06-02T10:00:00Z")), plan("p2", Some("2024-06-09T10:00:00Z"))],
                "links": { "next": NEXT }
            }))
            .route(NEXT, json!({
                "data": [plan("p3", None), plan("p4", Some("2024-06-16T10:00:00Z"))],
                "links": {}
            }))
    }

    #[tokio::test]
    async fn date_match_on_first_page() {
        let api = paged_api();
        let found = find_plan_by_date(&api, "1", day("2024-06-09")).await.unwrap();
        assert_eq!(found.unwrap().id, "p2");
        assert_eq!(api.requests(), vec!["/service_types/1/plans"]);
    }

    #[tokio::test]
    async fn date_match_follows_next_link() {
        let api = paged_api();
        let found = find_plan_by_date(&api, "1", day("2024-06-16")).await.unwrap();
        assert_eq!(found.unwrap().id, "p4");
        assert_eq!(api.requests().len(), 2);
    }

    #[tokio::test]
    async fn date_miss_exhausts_pages() {
        let api = paged_api();
        let found = find_plan_by_date(&api, "1", day("2024-06-10")).await.unwrap();
        assert!(found.is_none());
        assert_eq!(api.requests(), vec!["/service_types/1/plans".to_string(), NEXT.to_string()]);
    }

    #[tokio::test]
    async fn malformed_sort_date_aborts() {
        let api = StaticApi::new().route("/service_types/1/plans", json!({
            "data": [plan("p1", Some("June 2nd"))]
        }));
        let err = find_plan_by_date(&api, "1", day("2024-06-02")).await.unwrap_err();
        assert!(matches!(err, Error::DateParse { .. }));
    }

    #[tokio::test]
    async fn date_match_before_malformed_plan() {
        let api = StaticApi::new().route("/service_types/1/plans", json!({
            "data": [plan("p1", Some("2024-06-09T10:00:00Z")), plan("p2", Some("garbage"))]
        }));
        let found = find_plan_by_date(&api, "1", day("2024-06-09")).await.unwrap();
        assert_eq!(found.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn malformed_sort_date_after_miss_aborts() {
        let api = StaticApi::new().route("/service_types/1/plans", json!({
            "data": [plan("p1", Some("2024-06-02T10:00:00Z")), plan("p2", Some("garbage"))]
        }));
        let err = find_plan_by_date(&api, "1", day("2024-06-09")).await.unwrap_err();
        assert!(matches!(err, Error::DateParse { ref value, .. } if value == "garbage"));
    }

    #[tokio::test]
    async fn scheduled_aborts_on_malformed_date() {
        let api = StaticApi::new()
            .route("/service_types/1/plans", json!({
                "data": [plan("p1", Some("2024-06-02T10:00:00Z")), plan("p2", Some("garbage"))]
            }))
            .route("/service_types/1/plans/p1/team_members", team(&["someone-else"]));

        let err = find_next_scheduled_plan(&api, "1", "me", day("2024-06-01")).await.unwrap_err();
        assert!(matches!(err, Error::DateParse { .. }));
        // p1 was checked before the bad date was reached.
        assert_eq!(
            api.requests(),
            vec!["/service_types/1/plans", "/service_types/1/plans/p1/team_members"]
        );
    }

    #[tokio::test]
    async fn scheduled_match_before_malformed_plan() {
        let api = StaticApi::new()
            .route("/service_types/1/plans", json!({
                "data": [plan("p1", Some("2024-06-02T10:00:00Z")), plan("p2", Some("garbage"))]
            }))
            .route("/service_types/1/plans/p1/team_members", team(&["me"]));

        let found = find_next_scheduled_plan(&api, "1", "me", day("2024-06-01")).await.unwrap();
        assert_eq!(found.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn scheduled_skips_past_plans_and_other_teams() {
        let api = StaticApi::new()
            .route("/service_types/1/plans", json!({
                "data": [
                    plan("old", Some("2024-05-26T10:00:00Z")),
                    plan("none", None),
                    plan("p1", Some("2024-06-02T10:00:00Z")),
                    plan("p2", Some("2024-06-09T10:00:00Z")),
                    plan("p3", Some("2024-06-16T10:00:00Z"))
                ],
                "links": { "next": NEXT }
            }))
            .route("/service_types/1/plans/p1/team_members", team(&["someone-else"]))
            .route("/service_types/1/plans/p2/team_members", team(&["me", "someone-else"]))
            .route("/service_types/1/plans/p3/team_members", team(&["me"]));

        let found = find_next_scheduled_plan(&api, "1", "me", day("2024-06-01")).await.unwrap();
        assert_eq!(found.unwrap().id, "p2");
        assert_eq!(
            api.requests(),
            vec![
                "/service_types/1/plans",
                "/service_types/1/plans/p1/team_members",
                "/service_types/1/plans/p2/team_members",
            ]
        );
    }

    #[tokio::test]
    async fn scheduled_includes_today() {
        let api = StaticApi::new()
            .route("/service_types/1/plans", json!({ "data": [plan("p1", Some("2024-06-02T09:00:00Z"))] }))
            .route("/service_types/1/plans/p1/team_members", team(&["me"]));

        let found = find_next_scheduled_plan(&api, "1", "me", day("2024-06-02")).await.unwrap();
        assert_eq!(found.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn scheduled_reads_first_page_only() {
        let api = StaticApi::new()
            .route("/service_types/1/plans", json!({
                "data": [plan("p1", Some("2024-06-02T10:00:00Z"))],
                "links": { "next": NEXT }
            }))
            .route("/service_types/1/plans/p1/team_members", team(&[]))
            .route(NEXT, json!({ "data": [plan("p9", Some("2024-06-30T10:00:00Z"))] }))
            .route("/service_types/1/plans/p9/team_members", team(&["me"]));

        let found = find_next_scheduled_plan(&api, "1", "me", day("2024-06-01")).await.unwrap();
        assert!(found.is_none());
        assert!(!api.requests().iter().any(|r| r == NEXT));
    }

    #[tokio::test]
    async fn select_plan_dispatches() {
        let api = paged_api()
            .route("/service_types/1/plans/p2/team_members", team(&["me"]))
            .route("/service_types/1/plans/p1/team_members", team(&[]));

        let by_date = select_plan(&api, "1", "me", PlanSelection::ByDate(day("2024-06-02"))).await.unwrap();
        assert_eq!(by_date.unwrap().id, "p1");

        let scheduled = select_plan(&api, "1", "me", PlanSelection::NextScheduled { today: day("2024-06-01") })
            .await
            .unwrap();
        assert_eq!(scheduled.unwrap().id, "p2");
    }
}
