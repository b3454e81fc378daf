// spiritguard/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spiritguard")]
#[command(about = "Liquor supply-chain monitoring: sales anomalies, geofencing, diversion and label checks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Project directory (holds spiritguard.yaml and the data dir)
    #[arg(long, default_value = ".", env = "SPIRITGUARD_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Explicit config file instead of discovery in the project directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sales CSV to load, bypassing config and discovery
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📊 Headline sales KPIs and growth
    Overview {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// 📈 District-year totals with year-over-year change
    Trends {
        #[command(flatten)]
        common: CommonArgs,

        /// Only this district (case-insensitive)
        #[arg(long)]
        district: Option<String>,
    },

    /// 🗺️ Total / mean / max sales per state
    States {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// 🤖 Unsupervised outlier scan over district-year totals
    Anomalies {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of top anomalies to list (default: detection.top_k)
        #[arg(long)]
        top: Option<usize>,
    },

    /// 📍 Per-district sales for one year, joined to coordinates
    Geo {
        #[command(flatten)]
        common: CommonArgs,

        /// Year to map (default: latest year in the data)
        #[arg(long)]
        year: Option<i32>,
    },

    /// 🚛 Fleet positions and route compliance at a given time
    Fleet {
        #[command(flatten)]
        common: CommonArgs,

        /// Wall-clock time to replay, HH:MM:SS (default: now)
        #[arg(long)]
        at: Option<NaiveTime>,
    },

    /// 🏭 Input/output reconciliation of the distillery ledger
    Production {
        #[command(flatten)]
        common: CommonArgs,

        /// Only this factory id
        #[arg(long)]
        factory: Option<String>,

        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 🏷️ Lists batches in the label registry
    Batches {
        #[command(flatten)]
        common: CommonArgs,

        /// Maximum number of batches to list
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 🔍 Verifies a batch id against the label registry
    Verify {
        /// Batch id printed on the label (ex: BATCH-2024-BLR-000001)
        batch_id: String,

        #[command(flatten)]
        common: CommonArgs,

        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}
