// spiritguard/src/commands/anomalies.rs
//
// USE CASE: Isolation Forest scan over district-year totals.

use spiritguard_core::application::run_anomaly_scan;

use super::context;
use super::output::{self, liters, percent};
use crate::cli::{CommonArgs, OutputFormat};

pub fn execute(common: CommonArgs, top: Option<usize>) -> anyhow::Result<()> {
    let mut config = context::load_config(&common)?;
    if let Some(k) = top {
        config.detection.top_k = k;
    }
    let sales = context::load_sales(&common, &config);

    // NoData / MissingColumn / InsufficientData surface as a failed command
    let scan = run_anomaly_scan(sales.dataset(), &config.detection)?;

    if common.format == OutputFormat::Json {
        return output::print_json(&scan);
    }

    println!("🤖 Anomaly scan over {} district-years", scan.total);
    let mut summary = output::table(&["Metric", "Value"]);
    summary.add_row(vec!["Anomalies".to_string(), scan.anomaly_count.to_string()]);
    summary.add_row(vec![
        "Contamination".to_string(),
        format!("{:.2}", scan.contamination),
    ]);
    summary.add_row(vec![
        "Data purity".to_string(),
        format!("{:.1}%", scan.purity_ratio * 100.0),
    ]);
    summary.add_row(vec!["YoY swings".to_string(), scan.yoy_swings.to_string()]);
    for (label, count) in &scan.breakdown {
        summary.add_row(vec![format!("Type {}", label), count.to_string()]);
    }
    println!("{summary}");

    if scan.top.is_empty() {
        println!("✅ No anomalies flagged.");
        return Ok(());
    }

    let mut table = output::table(&["District", "Year", "Sales (L)", "YoY", "Type", "Score"]);
    for r in &scan.top {
        table.add_row(vec![
            r.district.clone(),
            r.year.map_or_else(|| "-".to_string(), |y| y.to_string()),
            liters(r.sale_in_liters),
            percent(r.yoy_change_percent),
            r.anomaly_type.to_string(),
            format!("{:.3}", r.anomaly_score),
        ]);
    }
    println!("{table}");
    Ok(())
}
