use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::{PermissionError, Result};

/// Persistent boolean flags backing the priming gate.
pub trait PrimingStore: Send + Sync + fmt::Debug {
    /// Read `key`, or `default` if it was never written.
    ///
    /// # Errors
    /// Returns [`PermissionError::Store`] if the backing storage fails.
    fn get(&self, key: &str, default: bool) -> Result<bool>;

    /// Write `key`.
    ///
    /// # Errors
    /// Returns [`PermissionError::Store`] if the backing storage fails.
    fn set(&self, key: &str, value: bool) -> Result<()>;

    /// Read `key` (defaulting to `true`) and clear it, as one step.
    ///
    /// Concurrent callers see `true` at most once per key.
    ///
    /// # Errors
    /// Returns [`PermissionError::Store`] if the backing storage fails.
    fn take(&self, key: &str) -> Result<bool>;
}

/// Whether the priming message under `key` should be shown.
///
/// True the first time it is asked, false afterwards.
///
/// # Errors
/// Returns [`PermissionError::Store`] if the store fails.
pub fn should_show_priming(store: &dyn PrimingStore, key: &str) -> Result<bool> {
    store.take(key)
}

/// Flags kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPrimingStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl MemoryPrimingStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrimingStore for MemoryPrimingStore {
    fn get(&self, key: &str, default: bool) -> Result<bool> {
        let flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(flags.get(key).copied().unwrap_or(default))
    }

    fn set(&self, key: &str, value: bool) -> Result<()> {
        let mut flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        flags.insert(key.to_owned(), value);
        Ok(())
    }

    fn take(&self, key: &str) -> Result<bool> {
        let mut flags = self.flags.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(flags.insert(key.to_owned(), false).unwrap_or(true))
    }
}

/// Flags persisted as a JSON object in a file.
#[derive(Debug)]
pub struct FilePrimingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePrimingStore {
    /// A store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// A store in the user's configuration directory.
    ///
    /// # Errors
    /// Returns [`PermissionError::Store`] if the platform has no such directory.
    pub fn in_config_dir() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| PermissionError::Store("no configuration directory".into()))?;
        Ok(Self::new(dir.join("grantkit").join("priming.json")))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, bool>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                PermissionError::Store(format!("parse {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(PermissionError::Store(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, flags: &HashMap<String, bool>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PermissionError::Store(format!("create {}: {e}", parent.display()))
            })?;
        }
        let text = serde_json::to_string_pretty(flags)
            .map_err(|e| PermissionError::Store(format!("serialize flags: {e}")))?;
        fs::write(&self.path, text)
            .map_err(|e| PermissionError::Store(format!("write {}: {e}", self.path.display())))
    }
}

impl PrimingStore for FilePrimingStore {
    fn get(&self, key: &str, default: bool) -> Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.get(key).copied().unwrap_or(default))
    }

    fn set(&self, key: &str, value: bool) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut flags = self.load()?;
        flags.insert(key.to_owned(), value);
        debug!("priming flag {key} = {value} in {}", self.path.display());
        self.save(&flags)
    }

    fn take(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut flags = self.load()?;
        let show = flags.insert(key.to_owned(), false).unwrap_or(true);
        if show {
            debug!("priming flag {key} consumed in {}", self.path.display());
            self.save(&flags)?;
        }
        Ok(show)
    }
}
