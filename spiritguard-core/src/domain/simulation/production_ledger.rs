// spiritguard-core/src/domain/simulation/production_ledger.rs

use chrono::{NaiveDate, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::domain::compliance::production::ProductionRun;
use crate::domain::simulation::{FACTORIES, SimulationConfig};

const LITERS_PER_CARTON: f64 = 1000.0;
const DIVERSION_PROBABILITY: f64 = 0.05;

/// Daily molasses-in / spirit-out declarations for every licensed factory.
#[derive(Debug, Clone)]
pub struct ProductionLedgerGenerator {
    seed: u64,
    days: u32,
    yield_ratio: f64,
}

impl ProductionLedgerGenerator {
    pub fn new(config: &SimulationConfig, yield_ratio: f64) -> Self {
        Self {
            seed: config.seed,
            days: config.production_days,
            yield_ratio,
        }
    }

    /// One run per factory per day over the `days` days before `today`, oldest first.
    pub fn generate(&self, today: NaiveDate) -> Vec<ProductionRun> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut runs = Vec::with_capacity(FACTORIES.len() * self.days as usize);

        for factory in FACTORIES {
            for day in 0..self.days {
                let date = today - TimeDelta::days(i64::from(self.days - day));
                let input_volume = f64::from(rng.gen_range(50u32..200)) * LITERS_PER_CARTON;
                let theoretical = input_volume * self.yield_ratio;
                let waste_liters = theoretical * rng.gen_range(2.0..8.0) / 100.0;

                // Diverted runs declare only 40-70% of what the intake should yield
                let actual_output = if rng.gen_bool(DIVERSION_PROBABILITY) {
                    theoretical * rng.gen_range(0.4..0.7)
                } else {
                    theoretical - waste_liters
                };

                runs.push(ProductionRun {
                    factory_id: factory.to_string(),
                    date,
                    input_volume,
                    actual_output,
                    waste_liters,
                });
            }
        }

        info!(runs = runs.len(), "✓ Generated production ledger");
        runs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::compliance::production::{ProductionAlert, ProductionScorer};

    #[test]
    fn test_ledger_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let runs = ProductionLedgerGenerator::new(&SimulationConfig::default(), 0.8).generate(today);

        assert_eq!(runs.len(), 4 * 30);
        assert_eq!(runs[0].date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(runs[29].date, NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
        assert!(runs.iter().all(|r| r.date < today));
        assert!(
            runs.iter()
                .all(|r| (50_000.0..200_000.0).contains(&r.input_volume))
        );
    }

    #[test]
    fn test_honest_runs_never_raise_diversion() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let config = SimulationConfig {
            production_days: 200,
            ..SimulationConfig::default()
        };
        let runs = ProductionLedgerGenerator::new(&config, 0.8).generate(today);
        let records = ProductionScorer::default().score_ledger(&runs);

        for r in &records {
            let honest = r.variance_percent >= -8.0 - 1e-9;
            assert_eq!(r.alert == ProductionAlert::Normal, honest, "{:?}", r);
        }
        assert!(
            records
                .iter()
                .any(|r| r.alert == ProductionAlert::DiversionSuspected)
        );
    }

    #[test]
    fn test_same_seed_same_ledger() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let generator = ProductionLedgerGenerator::new(&SimulationConfig::default(), 0.8);
        assert_eq!(generator.generate(today), generator.generate(today));
    }
}
