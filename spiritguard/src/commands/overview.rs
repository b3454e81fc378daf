// spiritguard/src/commands/overview.rs
//
// USE CASE: Headline KPIs of the loaded sales file.

use serde::Serialize;
use tracing::warn;

use spiritguard_core::domain::sales::{GrowthSummary, SalesOverview};

use super::context;
use super::output::{self, liters};
use crate::cli::{CommonArgs, OutputFormat};

#[derive(Serialize)]
struct OverviewReport<'a> {
    source: &'a str,
    mode: &'static str,
    encoding: Option<&'static str>,
    overview: SalesOverview,
    growth: Option<GrowthSummary>,
}

pub fn execute(common: CommonArgs) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let sales = context::load_sales(&common, &config);

    if !sales.dataset().is_long() {
        warn!(mode = sales.dataset().mode(), "No normalized sales records");
    }

    let report = OverviewReport {
        source: sales.origin(),
        mode: sales.dataset().mode(),
        encoding: sales.encoding().map(|e| e.as_str()),
        overview: sales.overview(),
        growth: sales.growth_summary(),
    };

    if common.format == OutputFormat::Json {
        return output::print_json(&report);
    }

    match report.encoding {
        Some(enc) => println!("📊 {} ({} mode, {})", report.source, report.mode, enc),
        None => println!("📊 {} ({} mode)", report.source, report.mode),
    }
    let mut table = output::table(&["Metric", "Value"]);
    let o = &report.overview;
    table.add_row(vec!["Records".to_string(), o.records.to_string()]);
    table.add_row(vec!["Total sales (L)".to_string(), liters(o.total_sales)]);
    table.add_row(vec!["Districts".to_string(), o.districts.to_string()]);
    table.add_row(vec!["Years".to_string(), o.years.to_string()]);
    table.add_row(vec!["States".to_string(), o.states.to_string()]);
    if let Some(g) = &report.growth {
        table.add_row(vec![
            format!("Growth {}-{}", g.first_year, g.last_year),
            format!("{:+.1}%", g.total_growth_percent),
        ]);
    }
    println!("{table}");
    Ok(())
}
