// spiritguard-core/src/error.rs

use crate::domain::detection::DetectionError;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpiritGuardError {
    // --- DOMAIN ERRORS (business rules, ledgers) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- DETECTOR ERRORS (typed, recoverable) ---
    #[error(transparent)]
    Detection(#[from] DetectionError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for SpiritGuardError {
    fn from(err: std::io::Error) -> Self {
        SpiritGuardError::Infrastructure(InfrastructureError::Io(err))
    }
}
