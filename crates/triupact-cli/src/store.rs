//! Session file backend for the shared session store.
//!
//! The file holds a flat JSON object of string values, the same keys the
//! browser keeps in local storage.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;
use triupact_core::StorageError;
use triupact_core::storage::KeyValueStore;

const SESSION_DIR: &str = ".triupact";
const SESSION_FILE: &str = "session.json";
/// Owner read/write only; the file holds a bearer token.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Default session file: `$HOME/.triupact/session.json`, or the working directory without `HOME`.
pub(crate) fn default_session_path() -> PathBuf {
    session_path_in(std::env::var_os("HOME").map(PathBuf::from))
}

fn session_path_in(home: Option<PathBuf>) -> PathBuf {
    home.filter(|home| !home.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

/// Key/value store persisted as a JSON file.
#[derive(Debug, Clone)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "session file unreadable");
                return Map::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "session file is not a JSON object");
            Map::new()
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> io::Result<()> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(map).map_err(io::Error::other)?;
        write_private(&self.path, text.as_bytes())
    }
}

/// Write `contents`, restricting the file to its owner on unix.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SESSION_FILE_MODE);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation; tighten files left by older writes.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;
    }
    file.write_all(contents)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
            .map_err(|err| StorageError::new(key, format!("{}: {err}", self.path.display())))
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_none() {
            return;
        }
        if let Err(err) = self.write_map(&map) {
            warn!(path = %self.path.display(), key, error = %err, "failed to update session file");
        }
    }
}
