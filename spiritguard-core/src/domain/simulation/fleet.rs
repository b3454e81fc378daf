// spiritguard-core/src/domain/simulation/fleet.rs

use chrono::{NaiveTime, TimeDelta, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::domain::compliance::route::{RoutePosition, VehicleStatus};
use crate::domain::error::DomainError;
use crate::domain::reference::{CityDirectory, Coordinates};
use crate::domain::simulation::SimulationConfig;

/// Approved corridors: (origin, destination, road distance in km).
pub const APPROVED_ROUTES: [(&str, &str, f64); 5] = [
    ("Bengaluru", "Mysore", 140.0),
    ("Bengaluru", "Tumkur", 70.0),
    ("Bengaluru", "Hassan", 187.0),
    ("Bengaluru", "Mangalore", 350.0),
    ("Hubli", "Belgaum", 110.0),
];

const DEVIATION_PROBABILITY: f64 = 0.15;
const IDLE_PROBABILITY: f64 = 0.2;
const MAX_DEVIATION_KM: f64 = 20.0;
const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FleetRoute {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub from: Coordinates,
    pub to: Coordinates,
}

impl FleetRoute {
    fn resolve(
        origin: &str,
        destination: &str,
        distance_km: f64,
        cities: &CityDirectory,
    ) -> Result<Self, DomainError> {
        let locate = |name: &str| {
            cities
                .lookup(name)
                .map(|c| c.coordinates)
                .ok_or_else(|| DomainError::UnknownRoute(format!("{} -> {}", origin, destination)))
        };
        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            from: locate(origin)?,
            to: locate(destination)?,
        })
    }

    fn point_at(&self, progress: f64, offset_km: f64) -> (f64, f64) {
        let dlat = self.to.lat - self.from.lat;
        let dlon = self.to.lon - self.from.lon;
        let mut lat = self.from.lat + dlat * progress;
        let mut lon = self.from.lon + dlon * progress;

        let norm = (dlat * dlat + dlon * dlon).sqrt();
        if offset_km > 0.0 && norm > 0.0 {
            // Unit normal to the corridor, scaled to degrees
            let shift = offset_km / KM_PER_DEGREE;
            lat += -dlon / norm * shift;
            lon += dlat / norm * shift;
        }
        (lat, lon)
    }
}

/// Per-truck traits drawn once at construction.
#[derive(Debug, Clone)]
struct TruckProfile {
    truck_id: String,
    route: usize,
    phase_secs: u32,
    idle: bool,
    cruise_kmh: f64,
    cargo_liters: u32,
    is_deviating: bool,
    deviation_km: f64,
    ping_lag_mins: i64,
}

/// Deterministic replay of a fleet moving along the approved corridors.
#[derive(Debug, Clone)]
pub struct FleetSimulator {
    routes: Vec<FleetRoute>,
    trucks: Vec<TruckProfile>,
    cycle_secs: u32,
}

impl FleetSimulator {
    #[instrument(skip_all, fields(trucks = config.num_trucks))]
    pub fn new(config: &SimulationConfig, cities: &CityDirectory) -> Result<Self, DomainError> {
        let routes = APPROVED_ROUTES
            .iter()
            .map(|&(from, to, km)| FleetRoute::resolve(from, to, km, cities))
            .collect::<Result<Vec<_>, _>>()?;

        let cycle_secs = config.cycle_secs.max(1);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let trucks = (0..config.num_trucks)
            .map(|i| {
                let is_deviating = rng.gen_bool(DEVIATION_PROBABILITY);
                TruckProfile {
                    truck_id: format!("TRK-KA-{:04}", i + 1),
                    route: i % routes.len(),
                    phase_secs: rng.gen_range(0..cycle_secs),
                    idle: rng.gen_bool(IDLE_PROBABILITY),
                    cruise_kmh: rng.gen_range(40.0..90.0),
                    cargo_liters: rng.gen_range(5_000..25_000),
                    is_deviating,
                    deviation_km: if is_deviating {
                        rng.gen_range(0.0..MAX_DEVIATION_KM)
                    } else {
                        0.0
                    },
                    ping_lag_mins: rng.gen_range(1..120),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            deviating = trucks.iter().filter(|t| t.is_deviating).count(),
            "Fleet profiles drawn"
        );

        Ok(Self {
            routes,
            trucks,
            cycle_secs,
        })
    }

    pub fn routes(&self) -> &[FleetRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Snapshot of every truck at wall-clock `time`. Idle trucks hold their position.
    pub fn positions_at(&self, time: NaiveTime) -> Vec<RoutePosition> {
        let now_secs = time.num_seconds_from_midnight();

        self.trucks
            .iter()
            .map(|truck| {
                let route = &self.routes[truck.route];
                let elapsed = if truck.idle {
                    truck.phase_secs
                } else {
                    (now_secs + truck.phase_secs) % self.cycle_secs
                };
                let progress = f64::from(elapsed) / f64::from(self.cycle_secs);
                let (lat, lon) = route.point_at(progress, truck.deviation_km);

                RoutePosition {
                    truck_id: truck.truck_id.clone(),
                    status: if truck.idle {
                        VehicleStatus::Idle
                    } else {
                        VehicleStatus::InTransit
                    },
                    origin: route.origin.clone(),
                    destination: route.destination.clone(),
                    lat,
                    lon,
                    speed_kmh: if truck.idle { 0.0 } else { truck.cruise_kmh },
                    cargo_liters: truck.cargo_liters,
                    progress_percent: progress * 100.0,
                    deviation_km: truck.deviation_km,
                    is_deviating: truck.is_deviating,
                    last_ping: time - TimeDelta::minutes(truck.ping_lag_mins),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::reference::CityLocation;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_positions_are_deterministic() {
        let config = SimulationConfig::default();
        let cities = CityDirectory::builtin();
        let a = FleetSimulator::new(&config, &cities).unwrap();
        let b = FleetSimulator::new(&config, &cities).unwrap();
        assert_eq!(a.positions_at(at(10, 30, 0)), b.positions_at(at(10, 30, 0)));
        assert_eq!(a.len(), 15);
    }

    #[test]
    fn test_fleet_invariants() {
        let config = SimulationConfig {
            num_trucks: 200,
            ..SimulationConfig::default()
        };
        let sim = FleetSimulator::new(&config, &CityDirectory::builtin()).unwrap();
        let positions = sim.positions_at(at(8, 0, 0));

        assert_eq!(positions[0].truck_id, "TRK-KA-0001");
        assert_eq!(positions[5].origin, "Bengaluru");
        assert_eq!(positions[5].destination, "Mysore");
        for p in &positions {
            assert!((0.0..100.0).contains(&p.progress_percent));
            assert!((0.0..MAX_DEVIATION_KM).contains(&p.deviation_km));
            if !p.is_deviating {
                assert_eq!(p.deviation_km, 0.0);
            }
            if p.status == VehicleStatus::Idle {
                assert_eq!(p.speed_kmh, 0.0);
            }
        }
        assert!(positions.iter().any(|p| p.is_deviating));
    }

    #[test]
    fn test_moving_trucks_advance_with_the_clock() {
        let sim = FleetSimulator::new(&SimulationConfig::default(), &CityDirectory::builtin())
            .unwrap();
        let early = sim.positions_at(at(9, 0, 0));
        let later = sim.positions_at(at(9, 1, 0));
        for (a, b) in early.iter().zip(&later) {
            if a.status == VehicleStatus::Idle {
                assert_eq!(a.progress_percent, b.progress_percent);
            } else {
                assert_ne!(a.progress_percent, b.progress_percent);
            }
        }
    }

    #[test]
    fn test_unknown_city_is_rejected() {
        let cities: CityDirectory = [(
            "bengaluru".to_string(),
            CityLocation {
                coordinates: Coordinates {
                    lat: 12.97,
                    lon: 77.59,
                },
                state: "Karnataka".into(),
            },
        )]
        .into_iter()
        .collect();

        let err = FleetSimulator::new(&SimulationConfig::default(), &cities).unwrap_err();
        assert!(matches!(err, DomainError::UnknownRoute(r) if r == "Bengaluru -> Mysore"));
    }

    #[test]
    fn test_offset_is_perpendicular() {
        let route = FleetRoute {
            origin: "A".into(),
            destination: "B".into(),
            distance_km: 111.0,
            from: Coordinates { lat: 0.0, lon: 0.0 },
            to: Coordinates { lat: 1.0, lon: 0.0 },
        };
        let (lat, lon) = route.point_at(0.5, 11.1);
        assert!((lat - 0.5).abs() < 1e-12);
        assert!((lon - 0.1).abs() < 1e-12);
    }
}
