// spiritguard-core/src/domain/compliance/config.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Serialize, Clone, Default, Validate)]
pub struct ComplianceConfig {
    #[validate(nested)]
    #[serde(default)]
    pub route: RouteThresholds,

    #[validate(nested)]
    #[serde(default)]
    pub production: ProductionThresholds,
}

/// Geofencing thresholds, in kilometres off the approved corridor.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_route_thresholds"))]
pub struct RouteThresholds {
    /// Compliant iff deviation is strictly below this.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_compliant_below_km")]
    pub compliant_below_km: f64,

    #[validate(range(min = 0.0))]
    #[serde(default = "default_medium_risk_above_km")]
    pub medium_risk_above_km: f64,

    #[validate(range(min = 0.0))]
    #[serde(default = "default_high_risk_above_km")]
    pub high_risk_above_km: f64,

    /// Deviation at which the risk score saturates at 100.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_risk_full_scale_km")]
    pub risk_full_scale_km: f64,
}

fn default_compliant_below_km() -> f64 {
    10.0
}
fn default_medium_risk_above_km() -> f64 {
    10.0
}
fn default_high_risk_above_km() -> f64 {
    15.0
}
fn default_risk_full_scale_km() -> f64 {
    20.0
}

impl Default for RouteThresholds {
    fn default() -> Self {
        Self {
            compliant_below_km: default_compliant_below_km(),
            medium_risk_above_km: default_medium_risk_above_km(),
            high_risk_above_km: default_high_risk_above_km(),
            risk_full_scale_km: default_risk_full_scale_km(),
        }
    }
}

fn validate_route_thresholds(t: &RouteThresholds) -> Result<(), ValidationError> {
    if t.medium_risk_above_km > t.high_risk_above_km {
        let mut err = ValidationError::new("risk_threshold_order");
        err.message = Some("medium_risk_above_km must not exceed high_risk_above_km".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
pub struct ProductionThresholds {
    /// Litres of spirit expected per litre of molasses.
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    #[serde(default = "default_yield_ratio")]
    pub yield_ratio: f64,

    /// Output shortfall (percent of theoretical) beyond which diversion is suspected.
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "default_diversion_threshold_percent")]
    pub diversion_threshold_percent: f64,
}

fn default_yield_ratio() -> f64 {
    0.8
}
fn default_diversion_threshold_percent() -> f64 {
    20.0
}

impl Default for ProductionThresholds {
    fn default() -> Self {
        Self {
            yield_ratio: default_yield_ratio(),
            diversion_threshold_percent: default_diversion_threshold_percent(),
        }
    }
}
