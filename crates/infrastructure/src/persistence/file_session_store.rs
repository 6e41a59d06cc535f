//! JSON file backed session storage
//!
//! The whole map is rewritten on every change: serialized into a temporary
//! file next to the target, then renamed over it.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use integration_portal::{ACCESS_TOKEN_KEY, SessionStore, SessionStoreError};
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

pub struct FileSessionStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("path", &self.path)
            .field("keys", &self.values.lock().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FileSessionStore {
    /// Open the store at `path`; a missing file is an empty session
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] if the file cannot be read and
    /// [`SessionStoreError::Corrupt`] if it is not a JSON object of strings.
    #[instrument(skip_all)]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SessionStoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No session file yet");
                BTreeMap::new()
            },
            Err(e) => return Err(io_error(&path, &e)),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SessionStoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, &e))?;

        let json = serde_json::to_vec_pretty(values)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| io_error(&dir, &e))?;
        tmp.write_all(&json)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| io_error(tmp.path(), &e))?;
        tmp.persist(&self.path)
            .map_err(|e| io_error(&self.path, &e.error))?;

        debug!(path = %self.path.display(), keys = values.len(), "Session saved");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut values = self.values.lock();
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&values) {
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let mut values = self.values.lock();
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&values) {
            // A removed token must not go out again, even if the file still holds it
            if key == ACCESS_TOKEN_KEY {
                warn!(error = %e, "Access token cleared in memory but still on disk");
            } else {
                values.insert(key.to_string(), previous);
            }
            return Err(e);
        }
        Ok(())
    }
}

fn io_error(path: &Path, error: &io::Error) -> SessionStoreError {
    SessionStoreError::Io(format!("{}: {error}", path.display()))
}
