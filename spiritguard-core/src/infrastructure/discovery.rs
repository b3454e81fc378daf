// spiritguard-core/src/infrastructure/discovery.rs

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::project::{DEFAULT_DATA_FILE, DataConfig};

/// Picks the sales CSV for a project.
///
/// Order: the configured `data.file`, then the first `*.csv` (by name) in the
/// data dir, then in the project root, then `liquor_sales_data.csv` in the
/// root. The returned path may not exist; the loader treats that as "no data".
#[instrument(skip(data), fields(root = ?project_dir))]
pub fn resolve_data_file(project_dir: &Path, data: &DataConfig) -> PathBuf {
    if let Some(file) = &data.file {
        return project_dir.join(file);
    }

    for dir in [project_dir.join(&data.dir), project_dir.to_path_buf()] {
        if let Some(found) = first_csv(&dir) {
            debug!(path = ?found, "Discovered sales CSV");
            return found;
        }
    }

    project_dir.join(DEFAULT_DATA_FILE)
}

fn first_csv(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }
    WalkDir::new(dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .find(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
}
