// spiritguard-core/src/domain/sales/geo.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::reference::{CityDirectory, Coordinates};
use crate::domain::sales::record::SalesRecord;

/// A district's sales for one year, placed on the map when its name is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictLocation {
    pub district: String,
    pub sale_in_liters: f64,
    pub coordinates: Option<Coordinates>,
    pub region: Option<String>,
}

/// Per-district totals for `year`, joined to the reference directory, largest first.
pub fn district_distribution(
    records: &[SalesRecord],
    year: i32,
    directory: &CityDirectory,
) -> Vec<DistrictLocation> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records.iter().filter(|r| r.year == year) {
        *totals.entry(r.district.as_str()).or_default() += r.sale_in_liters;
    }

    let mut out: Vec<DistrictLocation> = totals
        .into_iter()
        .map(|(district, sale_in_liters)| {
            let location = directory.lookup(district);
            DistrictLocation {
                district: district.to_string(),
                sale_in_liters,
                coordinates: location.map(|l| l.coordinates),
                region: location.map(|l| l.state.clone()),
            }
        })
        .collect();

    // Stable sort keeps the alphabetical order among equal totals
    out.sort_by(|a, b| b.sale_in_liters.total_cmp(&a.sale_in_liters));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(district: &str, year: i32, sale: f64) -> SalesRecord {
        SalesRecord {
            district: district.to_string(),
            state: "Karnataka".to_string(),
            year,
            sale_in_liters: sale,
        }
    }

    #[test]
    fn test_distribution_joins_known_districts() {
        let records = vec![
            rec("Mysore", 2016, 10.0),
            rec("Atlantis", 2016, 50.0),
            rec("Mysore", 2017, 99.0),
        ];
        let rows = district_distribution(&records, 2016, &CityDirectory::builtin());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].district, "Atlantis");
        assert!(rows[0].coordinates.is_none());
        assert_eq!(rows[1].sale_in_liters, 10.0);
        assert_eq!(rows[1].region.as_deref(), Some("Karnataka"));
    }
}
