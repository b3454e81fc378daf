// spiritguard/src/commands/mod.rs

pub mod anomalies;
pub mod batches;
pub mod fleet;
pub mod geo;
pub mod overview;
pub mod production;
pub mod states;
pub mod trends;
pub mod verify;

mod context;
mod output;
