// spiritguard/src/commands/geo.rs
//
// USE CASE: Geographic distribution of one year's sales.

use serde::Serialize;

use spiritguard_core::domain::reference::CityDirectory;
use spiritguard_core::domain::sales::DistrictLocation;

use super::context;
use super::output::{self, liters};
use crate::cli::{CommonArgs, OutputFormat};

#[derive(Serialize)]
struct GeoReport {
    year: Option<i32>,
    located: usize,
    districts: Vec<DistrictLocation>,
}

pub fn execute(common: CommonArgs, year: Option<i32>) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let sales = context::load_sales(&common, &config);
    let cities = CityDirectory::builtin();

    let year = year.or_else(|| sales.latest_year());
    let districts = year
        .map(|y| sales.district_distribution(y, &cities))
        .unwrap_or_default();
    let report = GeoReport {
        year,
        located: districts.iter().filter(|d| d.coordinates.is_some()).count(),
        districts,
    };

    if common.format == OutputFormat::Json {
        return output::print_json(&report);
    }

    let Some(year) = report.year else {
        println!("⚠️  No sales data to map.");
        return Ok(());
    };

    println!(
        "📍 {}: {} of {} districts located",
        year,
        report.located,
        report.districts.len()
    );
    let mut table = output::table(&["District", "Sales (L)", "Lat", "Lon", "State"]);
    for d in &report.districts {
        let (lat, lon) = d.coordinates.map_or_else(
            || ("-".to_string(), "-".to_string()),
            |c| (format!("{:.4}", c.lat), format!("{:.4}", c.lon)),
        );
        table.add_row(vec![
            d.district.clone(),
            liters(d.sale_in_liters),
            lat,
            lon,
            d.region.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}
