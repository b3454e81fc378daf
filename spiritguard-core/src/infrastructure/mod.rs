// spiritguard-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod discovery;
pub mod error;
pub mod tabular;

pub use adapters::FileSalesSource;
pub use discovery::resolve_data_file;
