// spiritguard-core/src/domain/compliance/mod.rs
//
// Operational scorers layered on top of the sales data: geofencing,
// production reconciliation and label authenticity.

pub mod authenticity;
pub mod config;
pub mod production;
pub mod route;

pub use authenticity::{
    AuthenticityCheck, BatchLedger, BatchRecord, LedgerStats, QrStatus, SealStatus,
    VerificationResult, VerificationStatus, verify,
};
pub use config::{ComplianceConfig, ProductionThresholds, RouteThresholds};
pub use production::{
    FactorySummary, ProductionAlert, ProductionRecord, ProductionRun, ProductionScorer,
    ProductionSummary, factory_summaries,
};
pub use route::{
    FleetSummary, RouteAlert, RouteComplianceRecord, RouteComplianceScorer, RoutePosition,
    VehicleStatus,
};
