//! Dump service types and the first page of plans from Planning Center.
//!
//! Usage: cargo run --bin dump_plans [-- --service "Celebration Service"]

use anyhow::Context;
use setlist_midi::config::Config;
use setlist_midi::planning_center::service_types::fetch_service_types;
use setlist_midi::planning_center::types::{Document, Plan};
use setlist_midi::planning_center::{resolve_service_type, PlanningCenterApi, PlanningCenterClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let service = args
        .iter()
        .position(|a| a == "--service")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(service) = service {
        config.target_service_type_name = service;
    }
    config.validate()?;
    let client = PlanningCenterClient::new(&config);

    let services = fetch_service_types(&client)
        .await
        .context("Failed to fetch service types")?;
    println!("=== Service types ({}) ===", services.len());
    for s in &services {
        println!("  {} (id: {})", s.name, s.id);
    }

    let service_type = resolve_service_type(&client, &config.target_service_type_name).await?;
    let path = format!("/service_types/{}/plans", service_type.id);
    let doc = Document::from_value(client.get(&path, &[("order", "sort_date")]).await?, &path)?;

    println!("\n=== Plans for {} (first page) ===", service_type.name);
    for resource in &doc.data {
        let plan = Plan::from_resource(resource).context("Unreadable plan")?;
        let date = plan.sort_date.map_or_else(|| "----------".to_string(), |d| d.to_string());
        println!("  {date} | {} | {} (id: {})", plan.display_title(), plan.dates, plan.id);
    }
    if doc.links.next.is_some() {
        println!("  ... more pages available");
    }

    Ok(())
}
