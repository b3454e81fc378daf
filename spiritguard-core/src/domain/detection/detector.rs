// spiritguard-core/src/domain/detection/detector.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::detection::feature::{FeatureRow, SALE_FEATURE};
use crate::domain::detection::isolation_forest::{ForestParams, IsolationForest, percentile};
use crate::domain::detection::{AnomalyType, DetectionError};

pub const MIN_CONTAMINATION: f64 = 0.01;
pub const MAX_CONTAMINATION: f64 = 0.1;

/// Width of the SPIKE/DROP band, in sample standard deviations around the mean.
pub const LABEL_BAND_SIGMAS: f64 = 2.0;

/// Expected anomalous fraction for `n` records: `min(0.1, max(0.01, 1/n))`.
pub fn contamination_rate(n: usize) -> f64 {
    let inverse = if n == 0 { 1.0 } else { 1.0 / n as f64 };
    MAX_CONTAMINATION.min(MIN_CONTAMINATION.max(inverse))
}

/// A scored row. The wrapped row's own fields are flattened when serialized.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyRecord<T> {
    #[serde(flatten)]
    pub row: T,
    #[serde(skip)]
    pub value: f64,
    pub is_anomaly: bool,
    /// `score_samples` convention: lower is more anomalous.
    pub anomaly_score: f64,
    pub anomaly_type: AnomalyType,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport<T> {
    pub records: Vec<AnomalyRecord<T>>,
    pub anomaly_count: usize,
    pub contamination: f64,
    /// `1 - anomaly_count / total`. This is a data-purity ratio, NOT a
    /// supervised accuracy: there are no ground-truth labels to validate against.
    pub purity_ratio: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl<T> DetectionReport<T> {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Anomalous rows ranked by absolute deviation from the population mean, largest first.
    pub fn top_anomalies(&self, k: usize) -> Vec<&AnomalyRecord<T>> {
        let mut anomalies: Vec<&AnomalyRecord<T>> =
            self.records.iter().filter(|r| r.is_anomaly).collect();
        anomalies.sort_by(|a, b| {
            let da = (a.value - self.mean).abs();
            let db = (b.value - self.mean).abs();
            db.total_cmp(&da)
        });
        anomalies.truncate(k);
        anomalies
    }

    pub fn type_breakdown(&self) -> BTreeMap<AnomalyType, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.anomaly_type).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutlierDetector {
    #[serde(default = "default_feature")]
    pub feature: String,

    #[validate(nested)]
    #[serde(default)]
    pub forest: ForestParams,
}

fn default_feature() -> String {
    SALE_FEATURE.to_string()
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            feature: default_feature(),
            forest: ForestParams::default(),
        }
    }
}

impl OutlierDetector {
    pub fn new(feature: impl Into<String>, forest: ForestParams) -> Self {
        Self {
            feature: feature.into(),
            forest,
        }
    }

    /// Fits the forest on the standardized feature and labels every row.
    #[instrument(skip_all, fields(feature = %self.feature, rows = rows.len()))]
    pub fn detect<T: FeatureRow + Clone>(
        &self,
        rows: &[T],
    ) -> Result<DetectionReport<T>, DetectionError> {
        // 1. Input guards (order matters: empty, schema, size)
        if rows.is_empty() {
            return Err(DetectionError::NoData);
        }
        if !rows.iter().any(|r| r.has_feature(&self.feature)) {
            return Err(DetectionError::MissingColumn(self.feature.clone()));
        }
        if rows.len() < 2 {
            return Err(DetectionError::InsufficientData { count: rows.len() });
        }

        info!("Training anomaly detection model...");

        let values: Vec<f64> = rows
            .iter()
            .map(|r| r.feature(&self.feature).unwrap_or(0.0))
            .collect();

        // 2. Standardize (population std, like a standard scaler)
        let mean = mean(&values);
        let pop_std = std_dev(&values, mean, 0);
        let scale = if pop_std > 0.0 { pop_std } else { 1.0 };
        let scaled: Vec<f64> = values.iter().map(|v| (v - mean) / scale).collect();

        // 3. Fit + score
        let contamination = contamination_rate(values.len());
        let forest = IsolationForest::fit(&scaled, &self.forest);
        let scores = forest.score_samples(&scaled);
        let offset = percentile(&scores, 100.0 * contamination);

        // 4. Label against the raw sample std
        let sample_std = std_dev(&values, mean, 1);
        let records: Vec<AnomalyRecord<T>> = rows
            .iter()
            .zip(values.iter().zip(scores.iter()))
            .map(|(row, (&value, &score))| {
                let is_anomaly = score < offset;
                AnomalyRecord {
                    row: row.clone(),
                    value,
                    is_anomaly,
                    anomaly_score: score,
                    anomaly_type: classify(value, is_anomaly, mean, sample_std),
                }
            })
            .collect();

        let anomaly_count = records.iter().filter(|r| r.is_anomaly).count();
        let purity_ratio = 1.0 - anomaly_count as f64 / records.len().max(1) as f64;

        info!(
            anomaly_count,
            contamination,
            purity_ratio,
            "✓ Anomalies detected"
        );

        Ok(DetectionReport {
            records,
            anomaly_count,
            contamination,
            purity_ratio,
            mean,
            std_dev: sample_std,
        })
    }
}

/// SPIKE / DROP only for model-flagged rows outside mean ± 2σ. A flagged row
/// inside the band stays NORMAL.
// NOTE: this under-reports flagged rows whose value sits inside the band; kept as-is.
pub(crate) fn classify(value: f64, is_anomaly: bool, mean: f64, std: f64) -> AnomalyType {
    if !is_anomaly || std <= 0.0 {
        return AnomalyType::Normal;
    }
    if value > mean + LABEL_BAND_SIGMAS * std {
        AnomalyType::Spike
    } else if value < mean - LABEL_BAND_SIGMAS * std {
        AnomalyType::Drop
    } else {
        AnomalyType::Normal
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

fn std_dev(values: &[f64], mean: f64, ddof: usize) -> f64 {
    if values.len() <= ddof {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - ddof) as f64).sqrt()
}
