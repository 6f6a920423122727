//! Persisted session flag and the context handed to pages and the route guard.
//! Only a single `isAuthenticated` boolean is stored; no token or identity ever
//! touches disk.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tracing::{debug, warn};

/// Storage key of the persisted flag.
pub const SESSION_FLAG_KEY: &str = "isAuthenticated";

/// Backing storage for the session flag.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Reads the flag; an absent flag reads as `false`.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] when the store cannot be read.
    fn load(&self) -> Result<bool, AppError>;

    /// Writes the flag.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] when the store cannot be written.
    fn store(&self, authenticated: bool) -> Result<(), AppError>;

    /// Removes the flag entirely.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] when the store cannot be written.
    fn clear(&self) -> Result<(), AppError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(rename = "isAuthenticated", default)]
    is_authenticated: Option<bool>,
}

/// Flag persisted as a small JSON document, durable across runs.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self, document: &SessionDocument) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| storage_error(&self.path, &err))?;
        }
        let payload = serde_json::to_vec_pretty(document)
            .map_err(|err| AppError::Serialization(format!("Failed to encode session: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|err| storage_error(&tmp, &err))?;
        fs::rename(&tmp, &self.path).map_err(|err| storage_error(&self.path, &err))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<bool, AppError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(storage_error(&self.path, &err)),
        };
        let document: SessionDocument = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::Parse(format!("Corrupt session file: {err}")))?;
        Ok(document.is_authenticated.unwrap_or(false))
    }

    fn store(&self, authenticated: bool) -> Result<(), AppError> {
        debug!(path = %self.path.display(), authenticated, "writing session flag");
        self.write_document(&SessionDocument {
            is_authenticated: Some(authenticated),
        })
    }

    fn clear(&self) -> Result<(), AppError> {
        debug!(path = %self.path.display(), "clearing session flag");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(&self.path, &err)),
        }
    }
}

fn storage_error(path: &Path, err: &io::Error) -> AppError {
    AppError::Storage(format!("{}: {err}", path.display()))
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    flag: AtomicBool,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<bool, AppError> {
        Ok(self.flag.load(Ordering::SeqCst))
    }

    fn store(&self, authenticated: bool) -> Result<(), AppError> {
        self.flag.store(authenticated, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.flag.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Application-level session handle passed explicitly to pages and the guard.
#[derive(Clone, Debug)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    /// Session persisted at `path`.
    #[must_use]
    pub fn persisted(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSessionStore::new(path)))
    }

    /// Reads the flag; unreadable state counts as signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.load().unwrap_or_else(|err| {
            warn!("Unable to read session flag, treating as signed out: {err}");
            false
        })
    }

    /// Records a successful login.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] if the flag cannot be persisted.
    pub fn mark_authenticated(&self) -> Result<(), AppError> {
        self.store.store(true)
    }

    /// Removes the flag so protected routes redirect to login again.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] if the flag cannot be removed.
    pub fn clear(&self) -> Result<(), AppError> {
        self.store.clear()
    }
}
