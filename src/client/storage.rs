use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::translate::TranslationSuccess;

use super::error::ClientError;

/// Key under which the last translation is kept.
pub const HISTORY_KEY: &str = "translationHistory";

/// String key/value store persisted as one JSON object file, the
/// command-line stand-in for browser local storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Map<String, Value>, ClientError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Always overwrites `key`. An unreadable file is replaced rather than
    /// blocking every later write.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(ClientError::Json(e)) => {
                warn!("Discarding unreadable local storage {:?}: {}", self.path, e);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), Value::String(value.to_string()));

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        // Write beside the target and rename so a crash never leaves a torn file.
        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(serde_json::to_string_pretty(&items)?.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Stored {} in {:?}", key, self.path);
        Ok(())
    }

    /// Replace the stored history; nothing is appended.
    pub fn save_history(&self, records: &[TranslationSuccess]) -> Result<(), ClientError> {
        self.set_item(HISTORY_KEY, &serde_json::to_string(records)?)
    }

    pub fn load_history(&self) -> Result<Vec<TranslationSuccess>, ClientError> {
        match self.get_item(HISTORY_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
