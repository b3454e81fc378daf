// spiritguard-core/src/application/production.rs

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::compliance::{
    FactorySummary, ProductionRecord, ProductionRun, ProductionScorer, ProductionSummary,
    factory_summaries,
};
use crate::domain::project::ProjectConfig;
use crate::domain::simulation::ProductionLedgerGenerator;

#[derive(Debug, Clone, Serialize)]
pub struct ProductionAudit {
    pub summary: ProductionSummary,
    pub factories: Vec<FactorySummary>,
    pub records: Vec<ProductionRecord>,
}

/// Reconciles declared distillery output against molasses intake.
#[derive(Debug, Clone)]
pub struct ProductionAuditor {
    generator: ProductionLedgerGenerator,
    scorer: ProductionScorer,
}

impl ProductionAuditor {
    pub fn new(config: &ProjectConfig) -> Self {
        let thresholds = config.compliance.production;
        Self {
            generator: ProductionLedgerGenerator::new(&config.simulation, thresholds.yield_ratio),
            scorer: ProductionScorer::new(thresholds),
        }
    }

    /// Audits the generated ledger for the days before `today`.
    pub fn audit(&self, today: NaiveDate) -> ProductionAudit {
        self.audit_runs(&self.generator.generate(today))
    }

    #[instrument(skip_all, fields(runs = runs.len()))]
    pub fn audit_runs(&self, runs: &[ProductionRun]) -> ProductionAudit {
        let records = self.scorer.score_ledger(runs);
        let summary = ProductionSummary::from_records(&records);
        info!(
            diversion_alerts = summary.diversion_alerts,
            "✓ Reconciled production ledger"
        );

        ProductionAudit {
            factories: factory_summaries(&records),
            summary,
            records,
        }
    }
}
