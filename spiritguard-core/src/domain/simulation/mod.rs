// spiritguard-core/src/domain/simulation/mod.rs
//
// Seeded generators standing in for the operational feeds (GPS pings,
// distillery ledgers, label registry). Same seed and same clock input,
// same output.

pub mod batch_ledger;
pub mod fleet;
pub mod production_ledger;

pub use batch_ledger::BatchLedgerGenerator;
pub use fleet::{FleetRoute, FleetSimulator};
pub use production_ledger::ProductionLedgerGenerator;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Licensed distilleries used by the production and batch generators.
pub const FACTORIES: [&str; 4] = [
    "Factory_BLR_001",
    "Factory_BLR_002",
    "Factory_HUB_001",
    "Factory_MYS_001",
];

pub const PRODUCTS: [&str; 4] = [
    "PREMIUM_WHISKY",
    "STANDARD_RUM",
    "VODKA_CLEAR",
    "BRANDY_RESERVE",
];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct SimulationConfig {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_num_trucks")]
    pub num_trucks: usize,

    #[validate(range(min = 1, max = 100_000))]
    #[serde(default = "default_num_batches")]
    pub num_batches: usize,

    #[validate(range(min = 1, max = 365))]
    #[serde(default = "default_production_days")]
    pub production_days: u32,

    /// Length of one full origin-to-destination replay, in seconds.
    #[validate(range(min = 60, max = 86_400))]
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: u32,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_num_trucks() -> usize {
    15
}
fn default_num_batches() -> usize {
    50
}
fn default_production_days() -> u32 {
    30
}
fn default_cycle_secs() -> u32 {
    4 * 3600
}
fn default_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_trucks: default_num_trucks(),
            num_batches: default_num_batches(),
            production_days: default_production_days(),
            cycle_secs: default_cycle_secs(),
            seed: default_seed(),
        }
    }
}

/// Site code embedded in a factory id: `Factory_BLR_001` -> `BLR`.
pub fn site_code(factory_id: &str) -> &str {
    factory_id.split('_').nth(1).unwrap_or(factory_id)
}
