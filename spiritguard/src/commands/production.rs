// spiritguard/src/commands/production.rs
//
// USE CASE: Molasses-in vs spirit-out reconciliation.

use chrono::NaiveDate;

use spiritguard_core::application::ProductionAuditor;
use spiritguard_core::domain::compliance::{ProductionAlert, ProductionSummary};

use super::context;
use super::output::{self, liters};
use crate::cli::{CommonArgs, OutputFormat};

pub fn execute(
    common: CommonArgs,
    factory: Option<String>,
    today: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let auditor = ProductionAuditor::new(&config);
    let mut audit = auditor.audit(context::today_or_now(today));

    if let Some(factory) = factory.as_deref().map(str::trim) {
        audit.records.retain(|r| r.factory_id.eq_ignore_ascii_case(factory));
        audit.factories.retain(|f| f.factory_id.eq_ignore_ascii_case(factory));
        if audit.records.is_empty() {
            anyhow::bail!("❌ Unknown factory '{}'", factory);
        }
        audit.summary = ProductionSummary::from_records(&audit.records);
    }

    if common.format == OutputFormat::Json {
        return output::print_json(&audit);
    }

    let s = &audit.summary;
    println!(
        "🏭 {} runs, {} L in, {} L out ({:.1}% efficiency), {} diversion alert(s)",
        s.runs,
        liters(s.total_input),
        liters(s.total_output),
        s.efficiency_percent,
        s.diversion_alerts
    );

    let mut factories = output::table(&["Factory", "Runs", "Input (L)", "Output (L)", "Avg variance", "Alerts"]);
    for f in &audit.factories {
        factories.add_row(vec![
            f.factory_id.clone(),
            f.runs.to_string(),
            liters(f.total_input),
            liters(f.total_output),
            format!("{:+.1}%", f.avg_variance_percent),
            f.diversion_alerts.to_string(),
        ]);
    }
    println!("{factories}");

    let flagged: Vec<_> = audit
        .records
        .iter()
        .filter(|r| r.alert == ProductionAlert::DiversionSuspected)
        .collect();
    if flagged.is_empty() {
        println!("✅ No diversion suspected.");
        return Ok(());
    }

    let mut table = output::table(&["Factory", "Date", "Theoretical (L)", "Actual (L)", "Variance", "Alert"]);
    for r in flagged {
        table.add_row(vec![
            r.factory_id.clone(),
            r.date.to_string(),
            liters(r.theoretical_output),
            liters(r.actual_output),
            format!("{:+.1}%", r.variance_percent),
            r.alert.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
