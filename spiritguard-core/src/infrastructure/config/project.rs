// spiritguard-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["spiritguard_project_conf.yaml", "spiritguard.yaml"];

pub const ENV_DATA_FILE: &str = "SPIRITGUARD_DATA_FILE";
pub const ENV_DEFAULT_STATE: &str = "SPIRITGUARD_DEFAULT_STATE";

/// Loads the project config from `project_dir`, falling back to defaults when
/// no config file exists, then applies environment overrides and validates.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    load_project_config_with_env(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_project_config`] with an injectable environment lookup.
pub fn load_project_config_with_env<F>(
    project_dir: &Path,
    env: F,
) -> Result<ProjectConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match find_main_config(project_dir) {
        Some(path) => load_config_file(&path)?,
        None => {
            info!(root = ?project_dir, "No project config found, using defaults");
            ProjectConfig::default()
        }
    };

    apply_env_overrides(&mut config, env);
    config.validate()?;
    Ok(config)
}

/// Loads an explicitly named config file, with the same overrides and validation
/// as directory discovery.
#[instrument]
pub fn load_explicit_config(path: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let mut config = load_config_file(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Parses one config file. Unlike directory discovery, a missing file here is an error.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading project config");

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
        info!(old = ?config.data.file, new = ?val, "Overriding data file via ENV");
        config.data.file = Some(val);
    }
    if let Some(val) = env(ENV_DEFAULT_STATE).filter(|v| !v.trim().is_empty()) {
        info!(old = ?config.data.default_state, new = ?val, "Overriding default state via ENV");
        config.data.default_state = val;
    }
}
