// spiritguard-core/src/domain/simulation/batch_ledger.rs

use chrono::{NaiveDate, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::domain::compliance::authenticity::{BatchRecord, QrStatus, SealStatus};
use crate::domain::simulation::{FACTORIES, PRODUCTS, SimulationConfig, site_code};

const SHELF_LIFE_DAYS: i64 = 365 * 5;
const INVALID_PROBABILITY: f64 = 0.05;
const COUNTERFEIT_QR_PROBABILITY: f64 = 0.05;
const BROKEN_SEAL_PROBABILITY: f64 = 0.03;

/// Label registry: one record per batch id, ids are unique by construction.
#[derive(Debug, Clone)]
pub struct BatchLedgerGenerator {
    seed: u64,
    num_batches: usize,
}

impl BatchLedgerGenerator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            seed: config.seed,
            num_batches: config.num_batches,
        }
    }

    pub fn generate(&self, today: NaiveDate) -> Vec<BatchRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let batches: Vec<BatchRecord> = (0..self.num_batches)
            .map(|i| {
                let factory = FACTORIES[rng.gen_range(0..FACTORIES.len())];
                let product = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
                let manufacture_date = today - TimeDelta::days(rng.gen_range(1..180));

                BatchRecord {
                    batch_id: format!("BATCH-2024-{}-{:06}", site_code(factory), i + 1),
                    factory_id: factory.to_string(),
                    product: product.to_string(),
                    manufacture_date,
                    expiry_date: manufacture_date + TimeDelta::days(SHELF_LIFE_DAYS),
                    quantity_cases: rng.gen_range(100..5000),
                    is_valid: !rng.gen_bool(INVALID_PROBABILITY),
                    qr_status: if rng.gen_bool(COUNTERFEIT_QR_PROBABILITY) {
                        QrStatus::Counterfeit
                    } else {
                        QrStatus::Valid
                    },
                    seal_status: if rng.gen_bool(BROKEN_SEAL_PROBABILITY) {
                        SealStatus::Broken
                    } else {
                        SealStatus::Ok
                    },
                }
            })
            .collect();

        info!(batches = batches.len(), "✓ Generated QR batch records");
        batches
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::compliance::authenticity::BatchLedger;
    use regex::Regex;

    #[test]
    fn test_batches_load_into_a_ledger() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let batches = BatchLedgerGenerator::new(&SimulationConfig::default()).generate(today);
        assert_eq!(batches.len(), 50);

        let id = Regex::new(r"^BATCH-2024-(BLR|HUB|MYS)-\d{6}$").unwrap();
        assert!(batches.iter().all(|b| id.is_match(&b.batch_id)));
        assert!(batches[0].batch_id.ends_with("-000001"));

        for b in &batches {
            assert!(b.manufacture_date < today);
            assert_eq!((b.expiry_date - b.manufacture_date).num_days(), SHELF_LIFE_DAYS);
        }

        let ledger = BatchLedger::from_records(batches).unwrap();
        assert_eq!(ledger.len(), 50);
    }
}
