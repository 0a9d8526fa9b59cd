//! Filesystem storage for session state.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use paceline_core::error::StorageError;
use paceline_core::{KeyValueStore, Result};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Name of the data file inside the store directory.
const DATA_FILE: &str = "storage.json";

/// Name of the lock file guarding read-modify-write cycles.
const LOCK_FILE: &str = "storage.lock";

type Entries = BTreeMap<String, String>;

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// A JSON object of strings kept in a single file.
///
/// Every write replaces the file atomically (temporary file, then rename)
/// while holding an exclusive lock on a sidecar lock file, so two processes
/// sharing a directory never lose each other's keys. On Unix the data file
/// is readable only by its owner.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store in `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the data file path.
    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn read_entries(&self) -> Result<Entries> {
        let path = self.data_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(io_error(&path, e).into()),
        };

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|source| {
            StorageError::Corrupt {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let path = self.data_path();
        let temp_path = self.root.join(format!(".{}.{}.tmp", DATA_FILE, Uuid::new_v4()));

        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                path: path.display().to_string(),
                source,
            }
        })?;

        let mut options = OpenOptions::new();
        options.create_new(true).write(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&temp_path)
            .map_err(|e| io_error(&temp_path, e))?;
        let written = file
            .write_all(content.as_bytes())
            .and_then(|_| file.sync_data())
            .and_then(|_| fs::rename(&temp_path, &path));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error(&path, e).into());
        }

        // Tighten permissions left by older versions of the file.
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&path)
                .map_err(|e| io_error(&path, e))?
                .permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms).map_err(|e| io_error(&path, e))?;
            }
        }

        Ok(())
    }

    /// Run `update` on the entries under the exclusive lock and write the
    /// result back if it reports a change.
    fn modify(&self, update: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| io_error(&self.root, e))?;

        let lock_path = self.lock_path();
        let lock_file: File = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_error(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| io_error(&lock_path, e))?;

        let result = self.read_entries().and_then(|mut entries| {
            if update(&mut entries) {
                self.write_entries(&entries)
            } else {
                Ok(())
            }
        });

        lock_file.unlock().map_err(|e| io_error(&lock_path, e))?;

        result
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.read_entries()?.remove(key);
        trace!(found = value.is_some(), "Read key");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(root = %self.root.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })?;
        debug!("Stored key");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| entries.remove(key).is_some())?;
        debug!("Removed key");
        Ok(())
    }
}
