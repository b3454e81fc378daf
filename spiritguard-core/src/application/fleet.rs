// spiritguard-core/src/application/fleet.rs

use chrono::NaiveTime;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::compliance::{
    FleetSummary, RouteComplianceRecord, RouteComplianceScorer, RoutePosition,
};
use crate::domain::error::DomainError;
use crate::domain::project::ProjectConfig;
use crate::domain::reference::CityDirectory;
use crate::domain::simulation::FleetSimulator;

#[derive(Debug, Clone, Serialize)]
pub struct FleetSnapshot {
    pub at: NaiveTime,
    pub summary: FleetSummary,
    pub positions: Vec<RoutePosition>,
    pub compliance: Vec<RouteComplianceRecord>,
}

/// Replays the fleet at a given time and geofences every vehicle.
#[derive(Debug, Clone)]
pub struct FleetMonitor {
    simulator: FleetSimulator,
    scorer: RouteComplianceScorer,
}

impl FleetMonitor {
    pub fn new(config: &ProjectConfig, cities: &CityDirectory) -> Result<Self, DomainError> {
        Ok(Self {
            simulator: FleetSimulator::new(&config.simulation, cities)?,
            scorer: RouteComplianceScorer::new(config.compliance.route),
        })
    }

    #[instrument(skip(self))]
    pub fn snapshot(&self, at: NaiveTime) -> FleetSnapshot {
        let positions = self.simulator.positions_at(at);
        let compliance = self.scorer.score_fleet(&positions);
        let summary = FleetSummary::from_records(&compliance);

        info!(
            vehicles = summary.vehicles,
            high_risk = summary.high_risk_alerts,
            "✓ Calculated route compliance"
        );

        FleetSnapshot {
            at,
            summary,
            positions,
            compliance,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_scores_every_vehicle() {
        let monitor = FleetMonitor::new(&ProjectConfig::default(), &CityDirectory::builtin()).unwrap();
        let snapshot = monitor.snapshot(NaiveTime::from_hms_opt(14, 0, 0).unwrap());

        assert_eq!(snapshot.positions.len(), 15);
        assert_eq!(snapshot.compliance.len(), 15);
        for (p, c) in snapshot.positions.iter().zip(&snapshot.compliance) {
            assert_eq!(p.truck_id, c.entity_id);
            assert_eq!(c.is_compliant, p.deviation_km < 10.0);
        }
    }
}
