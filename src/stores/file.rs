//! Implements a key-value store backed by JSON files in a directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, stores::KeyValueStore};

/// Stores each record as `<key>.json` in a data directory.
///
/// Writes go to a temporary file that is then renamed over the record, so a
/// crash during a write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Create a store that keeps its records in `directory`.
    ///
    /// The directory is created on the first write if it does not exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The file that holds the record for `key`.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }

    /// The directory the records are kept in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.record_path(key);

        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Error::StorageError(format!(
                "could not read {}: {error}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.record_path(key);
        let temp_path = path.with_extension("tmp");

        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.directory)?;
            fs::write(&temp_path, value)?;
            fs::rename(&temp_path, &path)
        };

        write().map_err(|error| {
            tracing::error!("Could not write {}: {error}", path.display());
            Error::StorageError(format!("could not write {}: {error}", path.display()))
        })?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());

        Ok(())
    }
}
