//! Session Snapshot - Local Key-Value Persistence
//!
//! The whole session (language, theme, layout, record) is stored as one JSON
//! object under a fixed key. Loading merges persisted record fields over the
//! compiled-in defaults so fields added in newer versions always have a value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::i18n::Language;
use crate::record::{RecordField, SignatureRecord};
use crate::templates::{Layout, Theme};

pub const STORAGE_KEY: &str = "emailSignatureWizardState";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError>;
    fn remove(&mut self, key: &str) -> Result<(), SnapshotError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SnapshotError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SnapshotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SnapshotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SnapshotError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Full session state as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub lang: Language,
    pub theme: Theme,
    pub layout: Layout,
    pub signature_data: SignatureRecord,
}

impl Snapshot {
    pub fn with_defaults(defaults: &SignatureRecord) -> Self {
        Self {
            lang: Language::default(),
            theme: Theme::default(),
            layout: Layout::default(),
            signature_data: defaults.clone(),
        }
    }
}

/// On-disk shape: every entry optional and read independently, so a bad or
/// unknown value drops only itself.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    lang: Option<Language>,
    #[serde(default, deserialize_with = "lenient")]
    theme: Option<Theme>,
    #[serde(default, deserialize_with = "lenient")]
    layout: Option<Layout>,
    #[serde(default, deserialize_with = "lenient")]
    signature_data: Option<Map<String, Value>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable saved value");
            Ok(None)
        }
    }
}

/// Overlay every saved string field on `defaults`; other values are skipped.
fn merge_saved_fields(defaults: &SignatureRecord, saved: &Map<String, Value>) -> SignatureRecord {
    let mut record = defaults.clone();
    for field in RecordField::ALL {
        match saved.get(field.wire_name()) {
            Some(Value::String(value)) => record.set(*field, value.as_str()),
            Some(Value::Null) | None => {}
            Some(other) => warn!(%field, value = %other, "ignoring non-text saved field"),
        }
    }
    record
}

/// Read the snapshot, merging it over `defaults`.
///
/// A missing or unreadable snapshot yields the defaults; corruption is logged
/// and never blocks loading.
pub fn load_snapshot(store: &dyn KeyValueStore, defaults: &SignatureRecord) -> Snapshot {
    let fallback = Snapshot::with_defaults(defaults);

    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(err) => {
            warn!(error = %err, "failed to read saved state");
            return fallback;
        }
    };

    let stored: StoredSnapshot = match serde_json::from_str(&raw) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(error = %err, "failed to parse saved state");
            return fallback;
        }
    };

    let signature_data = match &stored.signature_data {
        Some(saved) => merge_saved_fields(defaults, saved),
        None => defaults.clone(),
    };

    debug!("loaded saved state");
    Snapshot {
        lang: stored.lang.unwrap_or_default(),
        theme: stored.theme.unwrap_or_default(),
        layout: stored.layout.unwrap_or_default(),
        signature_data,
    }
}

pub fn save_snapshot(store: &mut dyn KeyValueStore, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let json = serde_json::to_string(snapshot)?;
    store.set(STORAGE_KEY, &json)
}

/// Forget everything except the interface language.
pub fn reset_snapshot(store: &mut dyn KeyValueStore, lang: Language) -> Result<(), SnapshotError> {
    store.remove(STORAGE_KEY)?;
    let json = serde_json::to_string(&serde_json::json!({ "lang": lang }))?;
    store.set(STORAGE_KEY, &json)
}
