// spiritguard-core/src/infrastructure/adapters/mod.rs

pub mod file_source;

pub use file_source::FileSalesSource;
