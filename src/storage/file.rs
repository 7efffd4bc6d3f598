//! JSON file storage
//!
//! The whole database is one JSON document shared by every process that opens
//! it. A commit takes an exclusive lock on a `.lock` file next to the
//! database, re-reads the document, validates the batch against what is on
//! disk, then writes a fresh image to a per-process temp file, syncs it and
//! renames it over the database. A crash leaves either the old or the new
//! image; a commit from a stale handle fails with a version conflict instead
//! of overwriting newer records.

use super::error::Result;
use super::tables::{Snapshot, Tables};
use super::{Storage, StorageError, Versioned, WriteBatch};
use crate::core::{GameId, GameState, Player, PlayerId};
use fd_lock::RwLock as FileLock;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage persisted to a single JSON file
///
/// Reads are served from the image loaded at `open` or at the last commit.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl JsonFileStorage {
    /// Open the database at `path`, starting empty if the file does not exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = read_tables(&path)?;

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Location of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension(format!("json.{}.tmp", std::process::id()))
    }

    fn open_lock_file(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?)
    }

    /// Write `tables` next to the database and rename it into place
    ///
    /// Must be called with the file lock held.
    fn persist(&self, tables: &Tables) -> Result<()> {
        let temp_path = self.temp_path();
        let bytes = serde_json::to_vec_pretty(&tables.to_snapshot())?;

        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved database to {}", self.path.display());
        Ok(())
    }
}

/// Load the database image, empty if the file does not exist yet
fn read_tables(path: &Path) -> Result<Tables> {
    match fs::read(path) {
        Ok(bytes) => {
            let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
            tracing::debug!("Loaded database from {}", path.display());
            Ok(Tables::from_snapshot(snapshot))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No database at {}, starting empty", path.display());
            Ok(Tables::default())
        }
        Err(err) => Err(err.into()),
    }
}

impl Storage for JsonFileStorage {
    fn load_game(&self, id: GameId) -> Result<Versioned<GameState>> {
        let tables = self.tables.read().map_err(|_| StorageError::LockPoisoned)?;
        tables.game(id)
    }

    fn load_player(&self, id: PlayerId) -> Result<Versioned<Player>> {
        let tables = self.tables.read().map_err(|_| StorageError::LockPoisoned)?;
        tables.player(id)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;

        let mut lock = FileLock::new(self.open_lock_file()?);
        let _guard = lock.write()?;

        // Other processes may have committed since this handle last looked
        let current = read_tables(&self.path)?;
        let mut next = current.clone();
        if let Err(err) = next.apply(batch) {
            *tables = current;
            return Err(err);
        }

        self.persist(&next)?;
        *tables = next;
        Ok(())
    }
}
