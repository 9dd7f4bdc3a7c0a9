//! Feature-archive navigation.
//!
//! A feature is a zip archive whose root holds zero or more component
//! `.jar` archives, plus an optional subsystem manifest at
//! `OSGI-INF/SUBSYSTEM.MF`. The navigator owns the archive handle for the
//! duration of a resolution pass and releases it on drop.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Fixed archive path of the subsystem manifest, matched case-insensitively.
pub const SUBSYSTEM_MANIFEST_PATH: &str = "OSGI-INF/SUBSYSTEM.MF";

/// Scoped handle over one feature archive.
#[derive(Debug)]
pub struct ArchiveNavigator {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ArchiveNavigator {
    /// Open a feature archive for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
        let archive = ZipArchive::new(file).map_err(|source| Error::InvalidArchive {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(archive = %path.display(), entries = archive.len(), "opened feature archive");
        Ok(Self { path, archive })
    }

    /// The filesystem path this navigator was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the component archives: `.jar` entries directly at the
    /// archive root. Sorted so downstream processing order is stable
    /// regardless of how the archive was written. Empty is legal, a feature
    /// may carry no components.
    pub fn component_entries(&self) -> Vec<String> {
        let mut entries: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| !name.contains('/') && name.ends_with(".jar"))
            .map(str::to_string)
            .collect();
        entries.sort();
        entries
    }

    /// The subsystem manifest entry's exact name, if the archive has one.
    pub fn subsystem_entry(&self) -> Option<String> {
        self.archive
            .file_names()
            .find(|name| name.eq_ignore_ascii_case(SUBSYSTEM_MANIFEST_PATH))
            .map(str::to_string)
    }

    /// Read a named entry's full contents.
    pub fn read_entry(&mut self, entry: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(entry)
            .map_err(|e| Error::EntryRead {
                path: self.path.clone(),
                entry: entry.to_string(),
                reason: e.to_string(),
            })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| Error::EntryRead {
            path: self.path.clone(),
            entry: entry.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes)
    }
}
