// spiritguard-core/src/domain/project/mod.rs

pub mod configuration;
pub use configuration::{DEFAULT_DATA_FILE, DataConfig, DetectionConfig, ProjectConfig};
