// spiritguard-core/src/infrastructure/adapters/file_source.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{instrument, warn};

use crate::error::SpiritGuardError;
use crate::ports::SalesSource;

/// Sales export read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSalesSource {
    path: PathBuf,
}

impl FileSalesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SalesSource for FileSalesSource {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn fetch(&self) -> Result<Option<Vec<u8>>, SpiritGuardError> {
        if !self.path.is_file() {
            warn!("Data file not found");
            return Ok(None);
        }
        Ok(Some(fs::read(&self.path)?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_absent_not_an_error() -> Result<()> {
        let dir = tempdir()?;
        let source = FileSalesSource::new(dir.path().join("nope.csv"));
        assert!(source.fetch()?.is_none());
        Ok(())
    }

    #[test]
    fn test_reads_bytes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sales.csv");
        fs::write(&path, b"district,2019\nUdupi,4\n")?;

        let bytes = FileSalesSource::new(&path).fetch()?;
        assert_eq!(bytes.as_deref(), Some(&b"district,2019\nUdupi,4\n"[..]));
        Ok(())
    }
}
