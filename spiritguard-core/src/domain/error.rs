// spiritguard-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Duplicate batch id '{0}' in ledger")]
    #[diagnostic(
        code(spiritguard::domain::duplicate_batch),
        help("Batch ids are the ledger's unique key; each id may appear only once.")
    )]
    DuplicateBatch(String),

    #[error("Unknown route '{0}' in fleet definition")]
    #[diagnostic(code(spiritguard::domain::route))]
    UnknownRoute(String),
}
