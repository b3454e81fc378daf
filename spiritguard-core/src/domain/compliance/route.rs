// spiritguard-core/src/domain/compliance/route.rs

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::compliance::config::RouteThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[serde(rename = "In Transit")]
    InTransit,
    Idle,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InTransit => "In Transit",
            Self::Idle => "Idle",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteAlert {
    Normal,
    MediumRisk,
    HighRisk,
}

impl RouteAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::HighRisk => "HIGH_RISK",
        }
    }
}

impl fmt::Display for RouteAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vehicle's reported position, as produced by the fleet feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePosition {
    pub truck_id: String,
    pub status: VehicleStatus,
    pub origin: String,
    pub destination: String,
    pub lat: f64,
    pub lon: f64,
    pub speed_kmh: f64,
    pub cargo_liters: u32,
    pub progress_percent: f64,
    pub deviation_km: f64,
    /// Set by the feed when the vehicle has left its corridor.
    pub is_deviating: bool,
    pub last_ping: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComplianceRecord {
    pub entity_id: String,
    pub deviation_km: f64,
    pub is_compliant: bool,
    pub risk_score: f64,
    pub alert_type: RouteAlert,
    pub status: VehicleStatus,
    pub cargo_liters: u32,
    pub speed_kmh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub vehicles: usize,
    pub in_transit: usize,
    pub high_risk_alerts: usize,
    pub medium_risk_alerts: usize,
    pub total_cargo_liters: u64,
    pub compliance_rate_percent: f64,
}

/// Stateless geofencing scorer: every position is evaluated on its own.
#[derive(Debug, Clone, Default)]
pub struct RouteComplianceScorer {
    thresholds: RouteThresholds,
}

impl RouteComplianceScorer {
    pub fn new(thresholds: RouteThresholds) -> Self {
        Self { thresholds }
    }

    pub fn score(&self, position: &RoutePosition) -> RouteComplianceRecord {
        let t = &self.thresholds;
        let deviation_km = position.deviation_km.max(0.0);

        let risk_score = (deviation_km / t.risk_full_scale_km * 100.0).min(100.0);

        // The deviation flag gates both risk levels; distance alone never raises an alert.
        let alert_type = match (position.is_deviating, deviation_km) {
            (true, d) if d > t.high_risk_above_km => RouteAlert::HighRisk,
            (true, d) if d > t.medium_risk_above_km => RouteAlert::MediumRisk,
            _ => RouteAlert::Normal,
        };

        RouteComplianceRecord {
            entity_id: position.truck_id.clone(),
            deviation_km,
            is_compliant: deviation_km < t.compliant_below_km,
            risk_score,
            alert_type,
            status: position.status,
            cargo_liters: position.cargo_liters,
            speed_kmh: position.speed_kmh,
        }
    }

    pub fn score_fleet(&self, positions: &[RoutePosition]) -> Vec<RouteComplianceRecord> {
        positions.iter().map(|p| self.score(p)).collect()
    }
}

impl FleetSummary {
    pub fn from_records(records: &[RouteComplianceRecord]) -> Self {
        let count = |alert: RouteAlert| records.iter().filter(|r| r.alert_type == alert).count();
        let compliant = records.iter().filter(|r| r.is_compliant).count();

        Self {
            vehicles: records.len(),
            in_transit: records
                .iter()
                .filter(|r| r.status == VehicleStatus::InTransit)
                .count(),
            high_risk_alerts: count(RouteAlert::HighRisk),
            medium_risk_alerts: count(RouteAlert::MediumRisk),
            total_cargo_liters: records.iter().map(|r| u64::from(r.cargo_liters)).sum(),
            compliance_rate_percent: if records.is_empty() {
                100.0
            } else {
                compliant as f64 / records.len() as f64 * 100.0
            },
        }
    }
}
