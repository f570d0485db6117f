use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;

pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    fn store_static_file(&self, path: &Path, contents: String) -> Result<(), Self::Error>;
}

/// Writes files below an output directory.
///
/// Files are written to a temporary sibling first and renamed into place, so
/// a failed write never leaves a truncated file behind.
pub struct DiskStorage {
    output_path: PathBuf,
}

impl DiskStorage {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl Store for DiskStorage {
    type Error = io::Error;

    fn store_static_file(&self, path: &Path, contents: String) -> Result<(), Self::Error> {
        let output_path = self.output_path.join(path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let staging_path = staging_path(&output_path);
        let written = File::create(&staging_path).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });

        if let Err(err) = written.and_then(|_| fs::rename(&staging_path, &output_path)) {
            let _ = fs::remove_file(&staging_path);
            return Err(err);
        }

        debug!("wrote {}", output_path.display());

        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut filename = OsString::from(".");
    filename.push(path.file_name().unwrap_or_default());
    filename.push(".tmp");
    path.with_file_name(filename)
}

pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new(storage: Arc<RwLock<HashMap<String, String>>>) -> Self {
        Self { storage }
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.storage.read().ok()?.get(&key(path)).cloned()
    }
}

#[derive(Error, Debug)]
pub enum InMemoryStorageError {
    #[error("poisoned")]
    Poisoned,
}

impl Store for InMemoryStorage {
    type Error = InMemoryStorageError;

    fn store_static_file(&self, path: &Path, contents: String) -> Result<(), Self::Error> {
        self.storage
            .write()
            .map_err(|_| InMemoryStorageError::Poisoned)?
            .insert(key(path), contents);

        Ok(())
    }
}

fn key(path: &Path) -> String {
    format!("/{}", path.to_string_lossy().trim_start_matches('/'))
}
