//! Filesystem-backed JSON storage, one file per slot.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    storage::{KvBackend, Slot},
    utils::{self, write_atomic},
};

const SLOT_EXTENSION: &str = "json";

/// Stores each slot as `<dir>/<slot>.json`, written atomically by staging to
/// a temporary sibling and renaming over the target.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Backend rooted at the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(utils::app_data_dir().join("slots"))
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.{}", slot.key(), SLOT_EXTENSION))
    }

    pub fn base_dir(&self) -> &Path {
        &self.dir
    }
}

impl KvBackend for JsonFileBackend {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, slot: Slot, payload: &str) -> Result<()> {
        write_atomic(&self.slot_path(slot), payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend_with_temp_dir() -> (JsonFileBackend, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let backend = JsonFileBackend::new(temp.path().join("slots")).expect("json backend");
        (backend, temp)
    }

    #[test]
    fn unwritten_slot_reads_as_none() {
        let (backend, _guard) = backend_with_temp_dir();
        assert_eq!(backend.read(Slot::Expenses).unwrap(), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let (backend, _guard) = backend_with_temp_dir();
        backend.write(Slot::Stores, "[\"Conad\"]").unwrap();
        assert_eq!(
            backend.read(Slot::Stores).unwrap().as_deref(),
            Some("[\"Conad\"]")
        );
    }

    #[test]
    fn write_leaves_no_staging_file_behind() {
        let (backend, _guard) = backend_with_temp_dir();
        backend.write(Slot::Expenses, "[]").unwrap();
        let staged = utils::tmp_path(&backend.slot_path(Slot::Expenses));
        assert!(!staged.exists(), "temporary staging file was not renamed");
    }
}
