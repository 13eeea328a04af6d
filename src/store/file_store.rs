use crate::core::session::Session;
use crate::store::snapshot::SessionSnapshot;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "potsplit.json";

/// Errors arising from reading or writing the session file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access session file: {0}")]
    Io(#[from] io::Error),
    #[error("session file is not a valid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Saves and loads a session as a single JSON snapshot on disk.
///
/// Persistence is a convenience, never a gatekeeper: the `try_` variants
/// surface errors for callers that want to report them, while [`load`],
/// [`save`] and [`clear`] absorb failures with a logged warning so a
/// corrupt or unwritable file cannot take the session down with it.
///
/// [`load`]: FileStore::load
/// [`save`]: FileStore::save
/// [`clear`]: FileStore::clear
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_STORE_PATH`] in the working directory.
    pub fn default_location() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if there is one.
    ///
    /// A missing file means no session has been saved yet and is not an
    /// error; an unreadable or malformed file is.
    pub fn try_load(&self) -> Result<Option<Session>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: SessionSnapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot.restore()))
    }

    /// Load the saved session, falling back to a fresh one if the file is
    /// missing, unreadable, or malformed.
    pub fn load(&self) -> Session {
        match self.try_load() {
            Ok(Some(session)) => {
                log::debug!("loaded session from {}", self.path.display());
                session
            }
            Ok(None) => Session::new(),
            Err(e) => {
                log::warn!(
                    "could not load session from {}: {e}; starting fresh",
                    self.path.display()
                );
                Session::new()
            }
        }
    }

    /// Write the session to disk, replacing any previous snapshot.
    pub fn try_save(&self, session: &Session) -> Result<(), StoreError> {
        let snapshot = SessionSnapshot::capture(session);
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)?;
        log::debug!("saved session to {}", self.path.display());
        Ok(())
    }

    /// Write the session to disk; on failure, log and keep going. The
    /// in-memory session is unaffected either way.
    pub fn save(&self, session: &Session) {
        if let Err(e) = self.try_save(session) {
            log::warn!("could not save session to {}: {e}", self.path.display());
        }
    }

    /// Delete the snapshot file. Deleting a file that is not there is
    /// already done, not an error.
    pub fn try_clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the snapshot file; on failure, log and keep going.
    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            log::warn!("could not clear session at {}: {e}", self.path.display());
        }
    }
}
