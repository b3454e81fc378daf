// spiritguard-core/src/domain/sales/aggregation.rs
//
// Read-only projections over normalized sales records. Every function here
// is pure: same records in, same rows out, in the same order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::detection::AnomalyType;
use crate::domain::sales::record::SalesRecord;

/// Default YoY swing (percent) above which the rule-based signal fires.
pub const DEFAULT_YOY_SWING_PERCENT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearAggregate {
    pub district: String,
    pub year: i32,
    pub sale_in_liters_sum: f64,
    /// `None` for the district's first observed year, and when the previous total is 0.
    pub yoy_change_percent: Option<f64>,
}

impl YearAggregate {
    /// Rule-based signal on the YoY swing alone, independent of the outlier model.
    pub fn yoy_signal(&self, threshold_percent: f64) -> AnomalyType {
        match self.yoy_change_percent {
            Some(change) if change > threshold_percent => AnomalyType::Spike,
            Some(change) if change < -threshold_percent => AnomalyType::Drop,
            _ => AnomalyType::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub state: String,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub max_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalTotal {
    pub year: i32,
    pub total_sales: f64,
}

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOverview {
    pub records: usize,
    pub total_sales: f64,
    pub districts: usize,
    pub years: usize,
    pub states: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub first_year: i32,
    pub last_year: i32,
    pub first_total: f64,
    pub last_total: f64,
    pub total_growth_percent: f64,
    pub years_span: i32,
}

fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Sums per (district, year), sorted by district then year, with YoY change per district.
pub fn district_trends(records: &[SalesRecord]) -> Vec<YearAggregate> {
    let mut sums: BTreeMap<(&str, i32), f64> = BTreeMap::new();
    for r in records {
        *sums.entry((r.district.as_str(), r.year)).or_default() += r.sale_in_liters;
    }

    let mut out = Vec::with_capacity(sums.len());
    let mut previous: Option<(&str, f64)> = None;

    for ((district, year), sum) in sums {
        let yoy_change_percent = match previous {
            Some((prev_district, prev_sum)) if prev_district == district => {
                percent_change(prev_sum, sum)
            }
            _ => None,
        };
        previous = Some((district, sum));

        out.push(YearAggregate {
            district: district.to_string(),
            year,
            sale_in_liters_sum: sum,
            yoy_change_percent,
        });
    }
    out
}

/// Total / mean / max of record values per state, sorted by state.
pub fn state_summaries(records: &[SalesRecord]) -> Vec<StateSummary> {
    let mut groups: BTreeMap<&str, (f64, usize, f64)> = BTreeMap::new();
    for r in records {
        let entry = groups
            .entry(r.state.as_str())
            .or_insert((0.0, 0, f64::NEG_INFINITY));
        entry.0 += r.sale_in_liters;
        entry.1 += 1;
        entry.2 = entry.2.max(r.sale_in_liters);
    }

    groups
        .into_iter()
        .map(|(state, (total, count, max))| StateSummary {
            state: state.to_string(),
            total_sales: total,
            avg_sales: total / count as f64,
            max_sales: max,
        })
        .collect()
}

/// Totals per year, ascending.
pub fn national_totals(records: &[SalesRecord]) -> Vec<NationalTotal> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.year).or_default() += r.sale_in_liters;
    }
    totals
        .into_iter()
        .map(|(year, total_sales)| NationalTotal { year, total_sales })
        .collect()
}

pub fn overview(records: &[SalesRecord]) -> SalesOverview {
    let districts: BTreeSet<&str> = records.iter().map(|r| r.district.as_str()).collect();
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    let states: BTreeSet<&str> = records.iter().map(|r| r.state.as_str()).collect();

    SalesOverview {
        records: records.len(),
        total_sales: records.iter().map(|r| r.sale_in_liters).sum(),
        districts: districts.len(),
        years: years.len(),
        states: states.len(),
    }
}

/// First-to-last growth across the national series. Needs two years and a non-zero baseline.
pub fn growth_summary(totals: &[NationalTotal]) -> Option<GrowthSummary> {
    let (first, last) = match totals {
        [first, .., last] => (first, last),
        _ => return None,
    };
    let total_growth_percent = percent_change(first.total_sales, last.total_sales)?;

    Some(GrowthSummary {
        first_year: first.year,
        last_year: last.year,
        first_total: first.total_sales,
        last_total: last.total_sales,
        total_growth_percent,
        years_span: last.year - first.year,
    })
}
