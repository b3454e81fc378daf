// spiritguard-core/src/domain/compliance/production.rs
//
// Input/output reconciliation: compares what a distillery should have
// produced from its molasses intake with what it declared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::compliance::config::ProductionThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductionAlert {
    Normal,
    DiversionSuspected,
}

impl ProductionAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::DiversionSuspected => "DIVERSION_SUSPECTED",
        }
    }
}

impl fmt::Display for ProductionAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day's declared run at a factory. Carries no alert of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRun {
    pub factory_id: String,
    pub date: NaiveDate,
    /// Molasses intake, liters.
    pub input_volume: f64,
    pub actual_output: f64,
    pub waste_liters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub factory_id: String,
    pub date: NaiveDate,
    pub input_volume: f64,
    pub theoretical_output: f64,
    pub actual_output: f64,
    pub waste_liters: f64,
    pub balance: f64,
    pub variance_percent: f64,
    pub alert: ProductionAlert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub runs: usize,
    pub total_input: f64,
    pub total_output: f64,
    pub efficiency_percent: f64,
    pub diversion_alerts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorySummary {
    pub factory_id: String,
    pub runs: usize,
    pub total_input: f64,
    pub total_output: f64,
    pub avg_variance_percent: f64,
    pub diversion_alerts: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProductionScorer {
    thresholds: ProductionThresholds,
}

impl ProductionScorer {
    pub fn new(thresholds: ProductionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn score(&self, run: &ProductionRun) -> ProductionRecord {
        let theoretical_output = run.input_volume * self.thresholds.yield_ratio;
        let variance_percent = if theoretical_output == 0.0 {
            0.0
        } else {
            (run.actual_output - theoretical_output) / theoretical_output * 100.0
        };

        let alert = if variance_percent < -self.thresholds.diversion_threshold_percent {
            ProductionAlert::DiversionSuspected
        } else {
            ProductionAlert::Normal
        };

        ProductionRecord {
            factory_id: run.factory_id.clone(),
            date: run.date,
            input_volume: run.input_volume,
            theoretical_output,
            actual_output: run.actual_output,
            waste_liters: run.waste_liters,
            balance: run.actual_output - run.waste_liters,
            variance_percent,
            alert,
        }
    }

    pub fn score_ledger(&self, runs: &[ProductionRun]) -> Vec<ProductionRecord> {
        runs.iter().map(|r| self.score(r)).collect()
    }
}

fn diversions<'a>(records: impl Iterator<Item = &'a ProductionRecord>) -> usize {
    records
        .filter(|r| r.alert == ProductionAlert::DiversionSuspected)
        .count()
}

impl ProductionSummary {
    pub fn from_records(records: &[ProductionRecord]) -> Self {
        let total_input: f64 = records.iter().map(|r| r.input_volume).sum();
        let total_output: f64 = records.iter().map(|r| r.actual_output).sum();

        Self {
            runs: records.len(),
            total_input,
            total_output,
            efficiency_percent: if total_input > 0.0 {
                total_output / total_input * 100.0
            } else {
                0.0
            },
            diversion_alerts: diversions(records.iter()),
        }
    }
}

/// Per-factory rollup, sorted by factory id.
pub fn factory_summaries(records: &[ProductionRecord]) -> Vec<FactorySummary> {
    let mut groups: BTreeMap<&str, Vec<&ProductionRecord>> = BTreeMap::new();
    for r in records {
        groups.entry(r.factory_id.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(factory_id, runs)| FactorySummary {
            factory_id: factory_id.to_string(),
            runs: runs.len(),
            total_input: runs.iter().map(|r| r.input_volume).sum(),
            total_output: runs.iter().map(|r| r.actual_output).sum(),
            avg_variance_percent: runs.iter().map(|r| r.variance_percent).sum::<f64>()
                / runs.len() as f64,
            diversion_alerts: diversions(runs.iter().copied()),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run(factory: &str, input: f64, actual: f64) -> ProductionRun {
        ProductionRun {
            factory_id: factory.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            input_volume: input,
            actual_output: actual,
            waste_liters: 100.0,
        }
    }

    #[test]
    fn test_theoretical_yield_and_balance() {
        let rec = ProductionScorer::default().score(&run("F1", 100_000.0, 76_000.0));
        assert_eq!(rec.theoretical_output, 80_000.0);
        assert_eq!(rec.variance_percent, -5.0);
        assert_eq!(rec.balance, 75_900.0);
        assert_eq!(rec.alert, ProductionAlert::Normal);
    }

    #[test]
    fn test_alert_is_derived_from_variance() {
        let scorer = ProductionScorer::default();
        // 40% of theoretical: -60% variance
        let diverted = scorer.score(&run("F1", 100_000.0, 32_000.0));
        assert_eq!(diverted.alert, ProductionAlert::DiversionSuspected);

        // exactly -20% is not below the threshold
        let edge = scorer.score(&run("F1", 100_000.0, 64_000.0));
        assert_eq!(edge.variance_percent, -20.0);
        assert_eq!(edge.alert, ProductionAlert::Normal);
    }

    #[test]
    fn test_zero_input_is_normal() {
        let rec = ProductionScorer::default().score(&run("F1", 0.0, 0.0));
        assert_eq!(rec.variance_percent, 0.0);
        assert_eq!(rec.alert, ProductionAlert::Normal);
    }

    #[test]
    fn test_summaries() {
        let scorer = ProductionScorer::default();
        let records = scorer.score_ledger(&[
            run("F2", 100_000.0, 76_000.0),
            run("F1", 100_000.0, 40_000.0),
            run("F1", 100_000.0, 80_000.0),
        ]);

        let summary = ProductionSummary::from_records(&records);
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.total_input, 300_000.0);
        assert_eq!(summary.diversion_alerts, 1);
        assert!((summary.efficiency_percent - 65.333).abs() < 1e-3);

        let factories = factory_summaries(&records);
        assert_eq!(factories.len(), 2);
        assert_eq!(factories[0].factory_id, "F1");
        assert_eq!(factories[0].diversion_alerts, 1);
        assert_eq!(factories[0].avg_variance_percent, -25.0);
    }
}
