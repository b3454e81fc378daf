// spiritguard/src/commands/trends.rs
//
// USE CASE: District-year totals with YoY change.

use spiritguard_core::domain::sales::YearAggregate;

use super::context;
use super::output::{self, liters, percent};
use crate::cli::{CommonArgs, OutputFormat};

pub fn execute(common: CommonArgs, district: Option<String>) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let sales = context::load_sales(&common, &config);

    let trends: Vec<YearAggregate> = sales
        .district_trends()
        .into_iter()
        .filter(|t| {
            district
                .as_deref()
                .is_none_or(|d| t.district.eq_ignore_ascii_case(d.trim()))
        })
        .collect();

    if common.format == OutputFormat::Json {
        return output::print_json(&trends);
    }

    if trends.is_empty() {
        println!("⚠️  No trend data available.");
        return Ok(());
    }

    let swing = config.detection.yoy_swing_percent;
    let mut table = output::table(&["District", "Year", "Sales (L)", "YoY", "Signal"]);
    for t in &trends {
        table.add_row(vec![
            t.district.clone(),
            t.year.to_string(),
            liters(t.sale_in_liters_sum),
            percent(t.yoy_change_percent),
            t.yoy_signal(swing).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
