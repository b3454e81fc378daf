// spiritguard-core/src/application/anomaly_scan.rs

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;

use crate::domain::detection::{AnomalyRecord, AnomalyType, DetectionError, DetectionReport};
use crate::domain::project::DetectionConfig;
use crate::domain::sales::{RawRow, SalesDataset, YearAggregate, district_trends};

// --- DTOs ---

/// One scored district-year (or raw row, in degraded mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    pub district: String,
    pub year: Option<i32>,
    pub sale_in_liters: f64,
    pub yoy_change_percent: Option<f64>,
    /// Rule-based YoY swing label, independent of the model.
    pub yoy_signal: AnomalyType,
    pub is_anomaly: bool,
    pub anomaly_score: f64,
    pub anomaly_type: AnomalyType,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyScan {
    pub total: usize,
    pub anomaly_count: usize,
    pub contamination: f64,
    pub purity_ratio: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub breakdown: BTreeMap<AnomalyType, usize>,
    pub yoy_swings: usize,
    pub top: Vec<ScoredRow>,
    pub rows: Vec<ScoredRow>,
}

/// Fits the outlier detector on district-year totals.
///
/// A raw (un-reshaped) dataset is handed to the detector as-is, which reports
/// the missing feature column unless the sheet happens to carry one.
#[instrument(skip_all, fields(mode = dataset.mode()))]
pub fn run_anomaly_scan(
    dataset: &SalesDataset,
    config: &DetectionConfig,
) -> Result<AnomalyScan, DetectionError> {
    let detector = &config.detector;

    match dataset {
        SalesDataset::Empty => Err(DetectionError::NoData),
        SalesDataset::Long(records) => {
            let aggregates = district_trends(records);
            let report = detector.detect(&aggregates)?;
            Ok(summarize(&report, config, |agg: &YearAggregate| {
                (
                    agg.district.clone(),
                    Some(agg.year),
                    agg.yoy_change_percent,
                    agg.yoy_signal(config.yoy_swing_percent),
                )
            }))
        }
        SalesDataset::Raw(table) => {
            let rows: Vec<RawRow<'_>> = table.iter_rows().collect();
            let report = detector.detect(&rows)?;
            Ok(summarize(&report, config, |row: &RawRow<'_>| {
                (
                    row.get("district").unwrap_or_default().to_string(),
                    None,
                    None,
                    AnomalyType::Normal,
                )
            }))
        }
    }
}

type RowContext = (String, Option<i32>, Option<f64>, AnomalyType);

fn summarize<T, F>(report: &DetectionReport<T>, config: &DetectionConfig, context: F) -> AnomalyScan
where
    F: Fn(&T) -> RowContext,
{
    let to_row = |r: &AnomalyRecord<T>| {
        let (district, year, yoy_change_percent, yoy_signal) = context(&r.row);
        ScoredRow {
            district,
            year,
            sale_in_liters: r.value,
            yoy_change_percent,
            yoy_signal,
            is_anomaly: r.is_anomaly,
            anomaly_score: r.anomaly_score,
            anomaly_type: r.anomaly_type,
        }
    };

    let rows: Vec<ScoredRow> = report.records.iter().map(&to_row).collect();

    AnomalyScan {
        total: report.total(),
        anomaly_count: report.anomaly_count,
        contamination: report.contamination,
        purity_ratio: report.purity_ratio,
        mean: report.mean,
        std_dev: report.std_dev,
        breakdown: report.type_breakdown(),
        yoy_swings: rows
            .iter()
            .filter(|r| r.yoy_signal != AnomalyType::Normal)
            .count(),
        top: report
            .top_anomalies(config.top_k)
            .into_iter()
            .map(&to_row)
            .collect(),
        rows,
    }
}
