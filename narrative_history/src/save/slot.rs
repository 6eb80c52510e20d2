//! Save slots - named places a save document can be kept.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors from reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("invalid slot key `{0}`")]
    InvalidKey(String),

    #[error("slot `{key}` I/O error: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Key/value storage for save documents.
pub trait SaveSlot: fmt::Debug {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Store a document under `key`, replacing what was there.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), SlotError>;

    /// Remove the document under `key`. Returns whether one existed.
    fn erase(&mut self, key: &str) -> Result<bool, SlotError>;

    /// Read and remove the document under `key`.
    fn take(&mut self, key: &str) -> Result<Option<String>, SlotError> {
        let contents = self.read(key)?;
        if contents.is_some() {
            self.erase(key)?;
        }
        Ok(contents)
    }
}

/// In-process slots, the stand-in for browser-local storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SaveSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), SlotError> {
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn erase(&mut self, key: &str) -> Result<bool, SlotError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Slots backed by files in one directory, one file per key.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.ends_with(".tmp")
            && !key.contains(['/', '\\']);
        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(SlotError::InvalidKey(key.to_string()))
        }
    }
}

impl SaveSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key, source)),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        write_text_atomic(&path, contents).map_err(|source| io_error(key, source))?;
        info!(path = %path.display(), bytes = contents.len(), "wrote save slot");
        Ok(())
    }

    fn erase(&mut self, key: &str) -> Result<bool, SlotError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "erased save slot");
                Ok(true)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(io_error(key, source)),
        }
    }
}

fn io_error(key: &str, source: io::Error) -> SlotError {
    SlotError::Io {
        key: key.to_string(),
        source,
    }
}

/// Write to a sibling temp file, then rename it over `path`.
///
/// `fs::rename` replaces an existing file in one step, so readers see either
/// the old text or the new one.
fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;

    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("save");
    path.with_file_name(format!("{file_name}.tmp"))
}
