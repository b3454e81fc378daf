// spiritguard-core/src/application/mod.rs

pub mod analytics;
pub mod anomaly_scan;
pub mod batches;
pub mod fleet;
pub mod production;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write
// `use spiritguard_core::application::{SalesAnalytics, run_anomaly_scan};`
// without knowing the file layout.

pub use analytics::SalesAnalytics;
pub use anomaly_scan::{AnomalyScan, ScoredRow, run_anomaly_scan};
pub use batches::BatchVerifier;
pub use fleet::{FleetMonitor, FleetSnapshot};
pub use production::{ProductionAudit, ProductionAuditor};
