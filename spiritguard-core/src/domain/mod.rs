pub mod compliance;
pub mod detection;
pub mod error;
pub mod project;
pub mod reference;
pub mod sales;
pub mod simulation;

// Re-exports to keep imports short elsewhere
pub use detection::AnomalyType;
pub use error::DomainError;
