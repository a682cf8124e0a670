//! Destinations for produced files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Receives finished files at paths relative to the output root.
pub trait AssetSink {
    fn write(&mut self, relative: &Path, bytes: &[u8]) -> Result<()>;
}

/// Writes under a root directory, creating parent folders as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSink for DirectorySink {
    fn write(&mut self, relative: &Path, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
        debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Keeps files in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(relative.as_ref()).map(Vec::as_slice)
    }
}

impl AssetSink for MemorySink {
    fn write(&mut self, relative: &Path, bytes: &[u8]) -> Result<()> {
        self.files.insert(relative.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
