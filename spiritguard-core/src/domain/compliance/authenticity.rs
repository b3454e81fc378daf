// spiritguard-core/src/domain/compliance/authenticity.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrStatus {
    Valid,
    Counterfeit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealStatus {
    Ok,
    Broken,
}

impl QrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Counterfeit => "COUNTERFEIT",
        }
    }
}

impl SealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Broken => "BROKEN",
        }
    }
}

impl fmt::Display for QrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub batch_id: String,
    pub factory_id: String,
    pub product: String,
    pub manufacture_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub quantity_cases: u32,
    pub is_valid: bool,
    pub qr_status: QrStatus,
    pub seal_status: SealStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticityCheck {
    InvalidFlag,
    CounterfeitQr,
    BrokenSeal,
    Expired,
}

impl AuthenticityCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFlag => "INVALID_FLAG",
            Self::CounterfeitQr => "COUNTERFEIT_QR",
            Self::BrokenSeal => "BROKEN_SEAL",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for AuthenticityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BatchRecord {
    /// Every check that fails on `today`. Empty means authentic.
    pub fn failed_checks(&self, today: NaiveDate) -> Vec<AuthenticityCheck> {
        let mut failed = Vec::new();
        if !self.is_valid {
            failed.push(AuthenticityCheck::InvalidFlag);
        }
        if self.qr_status != QrStatus::Valid {
            failed.push(AuthenticityCheck::CounterfeitQr);
        }
        if self.seal_status != SealStatus::Ok {
            failed.push(AuthenticityCheck::BrokenSeal);
        }
        // Expires at the start of expiry_date
        if self.expiry_date <= today {
            failed.push(AuthenticityCheck::Expired);
        }
        failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Authentic,
    CounterfeitOrExpired,
    NotFound,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentic => "AUTHENTIC",
            Self::CounterfeitOrExpired => "COUNTERFEIT_OR_EXPIRED",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub batch_id: String,
    pub status: VerificationStatus,
    pub is_authentic: bool,
    pub record: Option<BatchRecord>,
    pub failed_checks: Vec<AuthenticityCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Batches indexed by their exact id. Insertion order is kept for listing.
#[derive(Debug, Clone, Default)]
pub struct BatchLedger {
    batches: Vec<BatchRecord>,
    index: HashMap<String, usize>,
}

impl BatchLedger {
    pub fn from_records(records: Vec<BatchRecord>) -> Result<Self, DomainError> {
        let mut ledger = Self::default();
        for record in records {
            ledger.insert(record)?;
        }
        Ok(ledger)
    }

    pub fn insert(&mut self, record: BatchRecord) -> Result<(), DomainError> {
        if self.index.contains_key(&record.batch_id) {
            return Err(DomainError::DuplicateBatch(record.batch_id));
        }
        self.index.insert(record.batch_id.clone(), self.batches.len());
        self.batches.push(record);
        Ok(())
    }

    pub fn get(&self, batch_id: &str) -> Option<&BatchRecord> {
        self.index.get(batch_id).map(|&i| &self.batches[i])
    }

    pub fn records(&self) -> &[BatchRecord] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn stats(&self) -> LedgerStats {
        let valid = self.batches.iter().filter(|b| b.is_valid).count();
        LedgerStats {
            total: self.batches.len(),
            valid,
            invalid: self.batches.len() - valid,
        }
    }
}

/// Exact-match lookup. A missing id is a regular `NotFound` outcome, not an error.
pub fn verify(batch_id: &str, ledger: &BatchLedger, today: NaiveDate) -> VerificationResult {
    let Some(record) = ledger.get(batch_id) else {
        return VerificationResult {
            batch_id: batch_id.to_string(),
            status: VerificationStatus::NotFound,
            is_authentic: false,
            record: None,
            failed_checks: Vec::new(),
        };
    };

    let failed_checks = record.failed_checks(today);
    let is_authentic = failed_checks.is_empty();

    VerificationResult {
        batch_id: batch_id.to_string(),
        status: if is_authentic {
            VerificationStatus::Authentic
        } else {
            VerificationStatus::CounterfeitOrExpired
        },
        is_authentic,
        record: Some(record.clone()),
        failed_checks,
    }
}
