use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::Result;

use super::BookStore;

const DEFAULT_DIR_NAME: &str = ".cashbook";
const DATA_FILE: &str = "books.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.cashbook`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CASHBOOK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical path of the collection blob inside the data directory.
pub fn data_file() -> PathBuf {
    app_data_dir().join(DATA_FILE)
}

/// Filesystem-backed store keeping the whole collection in one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted at the default data directory (honors `CASHBOOK_HOME`).
    pub fn new_default() -> Self {
        Self::new(data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&self.path, blob)
    }
}

/// Stages to a temporary sibling and renames into place, so a failed write
/// never truncates the previous blob.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => path.with_extension(format!("{existing}.{TMP_SUFFIX}")),
        None => path.with_extension(TMP_SUFFIX),
    }
}
