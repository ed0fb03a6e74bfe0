//! Durable key-value storage underneath the journal store.
//!
//! A key maps to one string value. `FileStorage` keeps each key in its own
//! JSON file and replaces it atomically; `MemoryStorage` is an in-process
//! stand-in.

use crate::constants::STORAGE_FILE_EXTENSION;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

/// Whole-value reads and writes by key.
pub trait KeyValueStorage {
    /// Returns `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the value for `key`.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, STORAGE_FILE_EXTENSION))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if self.dir.exists() {
            return Ok(());
        }

        fs::create_dir_all(&self.dir)?;

        // Owner-only: entries embed personal photos.
        #[cfg(unix)]
        {
            use crate::constants::DEFAULT_DIR_PERMISSIONS;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS))?;
            debug!("Set 0o700 permissions on data directory");
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;

        // Write beside the target then rename, so readers never see a torn file.
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use crate::constants::DEFAULT_FILE_PERMISSIONS;
            fs::set_permissions(
                temp.path(),
                fs::Permissions::from_mode(DEFAULT_FILE_PERMISSIONS),
            )?;
        }

        let path = self.path_for(key);
        temp.persist(&path).map_err(|e| e.error)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory storage. Can be told to reject writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every write fails, as a full disk would.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Storage whose every read fails, as an unreadable file would.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Sets a raw value, bypassing any encoding.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::Other, "permission denied"));
        }
        let values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "no space left on device",
            ));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
