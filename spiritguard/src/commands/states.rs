// spiritguard/src/commands/states.rs
//
// USE CASE: State-level rollup plus the national time series.

use serde::Serialize;

use spiritguard_core::domain::sales::{NationalTotal, StateSummary};

use super::context;
use super::output::{self, liters};
use crate::cli::{CommonArgs, OutputFormat};

#[derive(Serialize)]
struct StatesReport {
    states: Vec<StateSummary>,
    national: Vec<NationalTotal>,
}

pub fn execute(common: CommonArgs) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let sales = context::load_sales(&common, &config);

    let report = StatesReport {
        states: sales.state_summaries(),
        national: sales.national_totals(),
    };

    if common.format == OutputFormat::Json {
        return output::print_json(&report);
    }

    if report.states.is_empty() {
        println!("⚠️  No state data available.");
        return Ok(());
    }

    let mut table = output::table(&["State", "Total (L)", "Mean (L)", "Max (L)"]);
    for s in &report.states {
        table.add_row(vec![
            s.state.clone(),
            liters(s.total_sales),
            liters(s.avg_sales),
            liters(s.max_sales),
        ]);
    }
    println!("{table}");

    let mut series = output::table(&["Year", "Total (L)"]);
    for n in &report.national {
        series.add_row(vec![n.year.to_string(), liters(n.total_sales)]);
    }
    println!("{series}");
    Ok(())
}
