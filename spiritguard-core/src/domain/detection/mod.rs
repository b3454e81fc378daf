// spiritguard-core/src/domain/detection/mod.rs

pub mod detector;
pub mod feature;
pub mod isolation_forest;

pub use detector::{AnomalyRecord, DetectionReport, OutlierDetector, contamination_rate};
pub use feature::{FeatureRow, SALE_FEATURE};
pub use isolation_forest::{ForestParams, IsolationForest};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Typed detector failures, checked in this order: empty input, missing feature, too few rows.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum DetectionError {
    #[error("No data available")]
    #[diagnostic(code(spiritguard::detection::no_data))]
    NoData,

    #[error("Missing {0} column")]
    #[diagnostic(
        code(spiritguard::detection::missing_column),
        help("The sales file was loaded in raw mode; check that its headers carry year tokens.")
    )]
    MissingColumn(String),

    #[error("Insufficient data: need at least 2 records, got {count}")]
    #[diagnostic(code(spiritguard::detection::insufficient_data))]
    InsufficientData { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    #[default]
    Normal,
    Spike,
    Drop,
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Spike => "SPIKE",
            Self::Drop => "DROP",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
