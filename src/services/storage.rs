// JSON File Storage
// Shared load/store helpers for the data files kept between runs

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Directory holding saved texts and achievement progress.
///
/// `HUMANIZER_DATA_DIR` overrides the platform default.
pub fn default_data_dir() -> Option<PathBuf> {
    match std::env::var("HUMANIZER_DATA_DIR") {
        Ok(p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
        _ => dirs::data_local_dir().map(|p| p.join("humanizer")),
    }
}

/// Read a JSON file; a missing file yields `None`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Write pretty JSON through a sibling temp file so a crash never leaves half a file behind.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
