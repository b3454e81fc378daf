// spiritguard/src/commands/context.rs
//
// Wiring shared by every command: config, data file, and the clock.
// The clock is only ever read here; the core takes time as an input.

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveTime};
use std::path::PathBuf;
use tracing::info;

use spiritguard_core::application::SalesAnalytics;
use spiritguard_core::domain::project::ProjectConfig;
use spiritguard_core::domain::sales::SalesNormalizer;
use spiritguard_core::infrastructure::config::{load_explicit_config, load_project_config};
use spiritguard_core::infrastructure::{FileSalesSource, resolve_data_file};

use crate::cli::CommonArgs;

pub fn load_config(common: &CommonArgs) -> anyhow::Result<ProjectConfig> {
    let config = match &common.config {
        Some(path) => load_explicit_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_project_config(&common.project_dir).with_context(|| {
            format!(
                "Failed to load project config in {}",
                common.project_dir.display()
            )
        })?,
    };
    info!(project = %config.name, version = %config.version, "Configuration loaded");
    Ok(config)
}

pub fn data_file(common: &CommonArgs, config: &ProjectConfig) -> PathBuf {
    match &common.data_file {
        Some(path) => path.clone(),
        None => resolve_data_file(&common.project_dir, &config.data),
    }
}

pub fn load_sales(common: &CommonArgs, config: &ProjectConfig) -> SalesAnalytics {
    let source = FileSalesSource::new(data_file(common, config));
    let normalizer = SalesNormalizer::new(config.data.default_state.clone());
    SalesAnalytics::load(&source, &normalizer)
}

pub fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub fn time_or_now(at: Option<NaiveTime>) -> NaiveTime {
    at.unwrap_or_else(|| Local::now().time())
}
