// spiritguard-core/src/application/batches.rs

use chrono::NaiveDate;

use crate::domain::compliance::{BatchLedger, LedgerStats, VerificationResult, verify};
use crate::domain::error::DomainError;
use crate::domain::project::ProjectConfig;
use crate::domain::simulation::BatchLedgerGenerator;

/// Answers "is this bottle genuine?" against a batch ledger.
#[derive(Debug, Clone)]
pub struct BatchVerifier {
    ledger: BatchLedger,
}

impl BatchVerifier {
    pub fn new(ledger: BatchLedger) -> Self {
        Self { ledger }
    }

    /// Builds the verifier over the generated label registry as of `today`.
    pub fn from_config(config: &ProjectConfig, today: NaiveDate) -> Result<Self, DomainError> {
        let batches = BatchLedgerGenerator::new(&config.simulation).generate(today);
        Ok(Self::new(BatchLedger::from_records(batches)?))
    }

    pub fn verify(&self, batch_id: &str, today: NaiveDate) -> VerificationResult {
        verify(batch_id.trim(), &self.ledger, today)
    }

    pub fn ledger(&self) -> &BatchLedger {
        &self.ledger
    }

    pub fn stats(&self) -> LedgerStats {
        self.ledger.stats()
    }
}
