// spiritguard-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::compliance::ComplianceConfig;
use crate::domain::detection::OutlierDetector;
use crate::domain::sales::aggregation::DEFAULT_YOY_SWING_PERCENT;
use crate::domain::sales::normalizer::DEFAULT_REGION;
use crate::domain::simulation::SimulationConfig;

/// Fallback file name when neither the config nor the data dir names a CSV.
pub const DEFAULT_DATA_FILE: &str = "liquor_sales_data.csv";

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[validate(nested)]
    #[serde(default)]
    pub data: DataConfig,

    #[validate(nested)]
    #[serde(default)]
    pub detection: DetectionConfig,

    #[validate(nested)]
    #[serde(default)]
    pub compliance: ComplianceConfig,

    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct DataConfig {
    /// Explicit sales CSV, relative to the project dir. Wins over discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[validate(length(min = 1))]
    #[serde(default = "default_data_dir")]
    pub dir: String,

    /// Region applied to rows without a state column.
    #[validate(length(min = 1))]
    #[serde(default = "default_state")]
    pub default_state: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct DetectionConfig {
    #[validate(nested)]
    #[serde(default)]
    pub detector: OutlierDetector,

    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_yoy_swing")]
    pub yoy_swing_percent: f64,
}

fn default_name() -> String {
    "spiritguard".to_string()
}
fn default_version() -> String {
    "1.0.0".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_state() -> String {
    DEFAULT_REGION.to_string()
}
fn default_top_k() -> usize {
    15
}
fn default_yoy_swing() -> f64 {
    DEFAULT_YOY_SWING_PERCENT
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            data: DataConfig::default(),
            detection: DetectionConfig::default(),
            compliance: ComplianceConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: None,
            dir: default_data_dir(),
            default_state: default_state(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            detector: OutlierDetector::default(),
            top_k: default_top_k(),
            yoy_swing_percent: default_yoy_swing(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
name: karnataka_excise
data:
  file: raw/sales.csv
detection:
  top_k: 5
compliance:
  production:
    diversion_threshold_percent: 25
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "karnataka_excise");
        assert_eq!(config.data.file.as_deref(), Some("raw/sales.csv"));
        assert_eq!(config.data.default_state, "Karnataka");
        assert_eq!(config.detection.top_k, 5);
        assert_eq!(config.detection.detector.forest.n_estimators, 100);
        assert_eq!(config.compliance.production.diversion_threshold_percent, 25.0);
        assert_eq!(config.compliance.production.yield_ratio, 0.8);
        assert_eq!(config.simulation.num_trucks, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_validation_reaches_thresholds() {
        let yaml = r#"
compliance:
  route:
    medium_risk_above_km: 18
    high_risk_above_km: 15
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());

        let mut config = ProjectConfig::default();
        config.detection.top_k = 0;
        assert!(config.validate().is_err());
    }
}
