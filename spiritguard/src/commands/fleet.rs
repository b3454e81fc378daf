// spiritguard/src/commands/fleet.rs
//
// USE CASE: Live fleet replay and geofencing.

use chrono::NaiveTime;

use spiritguard_core::application::FleetMonitor;
use spiritguard_core::domain::compliance::RouteAlert;
use spiritguard_core::domain::reference::CityDirectory;

use super::context;
use super::output::{self, liters};
use crate::cli::{CommonArgs, OutputFormat};

pub fn execute(common: CommonArgs, at: Option<NaiveTime>) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let monitor = FleetMonitor::new(&config, &CityDirectory::builtin())?;
    let snapshot = monitor.snapshot(context::time_or_now(at));

    if common.format == OutputFormat::Json {
        return output::print_json(&snapshot);
    }

    let s = &snapshot.summary;
    println!(
        "🚛 Fleet at {}: {} in transit, {} high-risk, {} medium-risk, {:.1}% compliant, {} L on the road",
        snapshot.at.format("%H:%M:%S"),
        s.in_transit,
        s.high_risk_alerts,
        s.medium_risk_alerts,
        s.compliance_rate_percent,
        liters(s.total_cargo_liters as f64)
    );

    let mut table = output::table(&[
        "Truck", "Route", "Status", "Progress", "Deviation", "Risk", "Alert",
    ]);
    for (p, c) in snapshot.positions.iter().zip(&snapshot.compliance) {
        let alert = match c.alert_type {
            RouteAlert::HighRisk => format!("🔴 {}", c.alert_type),
            RouteAlert::MediumRisk => format!("🟠 {}", c.alert_type),
            RouteAlert::Normal => c.alert_type.to_string(),
        };
        table.add_row(vec![
            p.truck_id.clone(),
            format!("{} → {}", p.origin, p.destination),
            p.status.to_string(),
            format!("{:.0}%", p.progress_percent),
            format!("{:.1} km", c.deviation_km),
            format!("{:.0}", c.risk_score),
            alert,
        ]);
    }
    println!("{table}");
    Ok(())
}
