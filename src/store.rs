use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::AdminLevel;
use crate::error::GeodataError;

#[derive(Debug, Clone)]
pub struct OutputStore {
    root: Utf8PathBuf,
}

impl OutputStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn json_path(&self, level: AdminLevel) -> Utf8PathBuf {
        self.root.join(format!("{}.json", level.request_name()))
    }

    pub fn csv_path(&self, level: AdminLevel) -> Utf8PathBuf {
        self.json_path(level).with_extension("csv")
    }

    pub fn ensure_root(&self) -> Result<(), GeodataError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| GeodataError::Filesystem(err.to_string()))
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    pub fn read_to_string(path: &Utf8Path) -> Result<String, GeodataError> {
        fs::read_to_string(path.as_std_path())
            .map_err(|err| GeodataError::Filesystem(format!("read {path}: {err}")))
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), GeodataError> {
        let parent = path
            .parent()
            .ok_or_else(|| GeodataError::Filesystem("invalid destination path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| GeodataError::Filesystem(err.to_string()))?;
        let temp = tempfile::Builder::new()
            .prefix("geodata-fetch")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| GeodataError::Filesystem(err.to_string()))?;
        fs::write(temp.path(), content).map_err(|err| GeodataError::Filesystem(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| GeodataError::Filesystem(err.to_string()))?;
        Ok(())
    }
}
