// spiritguard-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(spiritguard::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(spiritguard::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(spiritguard::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(spiritguard::infra::validation),
        help("A threshold or count in spiritguard.yaml is out of range.")
    )]
    Validation(#[from] validator::ValidationErrors),

    // --- TABULAR ---
    #[error("CSV Parsing Error: {0}")]
    #[diagnostic(
        code(spiritguard::infra::csv),
        help("The sales export could not be tokenized as CSV.")
    )]
    Csv(#[from] csv::Error),
}
