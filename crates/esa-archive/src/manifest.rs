//! JAR-style manifest reading and `Require-Capability` extraction.
//!
//! Component manifests live inside archives that are themselves entries of
//! the outer feature archive. The inner archive is decoded straight from
//! the entry's byte buffer, so extraction never materializes a temporary
//! file and leaves nothing behind on any exit path.

use std::collections::BTreeMap;
use std::io::Cursor;

use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::navigator::ArchiveNavigator;

/// The header this engine consumes.
pub const REQUIRE_CAPABILITY: &str = "Require-Capability";

/// Standard manifest entry path inside a component archive.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Main-section attributes of a manifest, with case-insensitive lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Manifest {
    attributes: BTreeMap<String, String>,
}

impl Manifest {
    /// Look up a main-section attribute by name, ignoring ASCII case.
    fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Parse the main section of a manifest.
///
/// The main section runs to the first blank line. Continuation lines begin
/// with a single space and are unfolded by direct concatenation, since the
/// 72-byte line wrap may split a value mid-word.
fn parse_main_section(text: &str) -> std::result::Result<Manifest, String> {
    let mut attributes = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            // End of main section.
            break;
        }

        if let Some(continuation) = line.strip_prefix(' ') {
            match current.as_mut() {
                Some((_, value)) => value.push_str(continuation),
                None => return Err("continuation line before any header".to_string()),
            }
            continue;
        }

        if let Some((name, value)) = current.take() {
            attributes.insert(name.to_ascii_lowercase(), value);
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| format!("header line without separator: '{line}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("header line without name: '{line}'"));
        }
        current = Some((name.to_string(), value.trim_start().to_string()));
    }

    if let Some((name, value)) = current.take() {
        attributes.insert(name.to_ascii_lowercase(), value);
    }

    if attributes.is_empty() {
        return Err("manifest has no main-section attributes".to_string());
    }
    Ok(Manifest { attributes })
}

/// Extract a component archive's `Require-Capability` value.
///
/// The component entry's bytes are read from the outer archive and decoded
/// in memory. A component that is not a readable archive or lacks a
/// manifest is an error; a component whose manifest simply has no
/// `Require-Capability` header yields `Ok(None)`.
pub fn component_require_capability(
    navigator: &mut ArchiveNavigator,
    entry: &str,
) -> Result<Option<String>> {
    let path = navigator.path().to_path_buf();
    let bytes = navigator.read_entry(entry)?;

    let mut inner = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        Error::missing_manifest(&path, entry, format!("not a readable archive: {e}"))
    })?;
    let manifest_bytes = {
        let mut file = inner.by_name(MANIFEST_ENTRY).map_err(|e| {
            Error::missing_manifest(&path, entry, format!("no {MANIFEST_ENTRY}: {e}"))
        })?;
        let mut buffer = Vec::new();
        std::io::Read::read_to_end(&mut file, &mut buffer)
            .map_err(|e| Error::missing_manifest(&path, entry, e.to_string()))?;
        buffer
    };

    let text = String::from_utf8_lossy(&manifest_bytes);
    let manifest =
        parse_main_section(&text).map_err(|reason| Error::missing_manifest(&path, entry, reason))?;
    Ok(manifest.get(REQUIRE_CAPABILITY).map(str::to_string))
}

/// Extract the subsystem manifest's `Require-Capability` value, reading the
/// entry stream directly from the outer archive.
///
/// Returns `Ok(None)` when the archive has no subsystem manifest entry or
/// the manifest has no `Require-Capability` header.
pub fn subsystem_require_capability(navigator: &mut ArchiveNavigator) -> Result<Option<String>> {
    let Some(entry) = navigator.subsystem_entry() else {
        return Ok(None);
    };
    let path = navigator.path().to_path_buf();
    let bytes = navigator.read_entry(&entry)?;
    let text = String::from_utf8_lossy(&bytes);
    let manifest = parse_main_section(&text)
        .map_err(|reason| Error::missing_manifest(&path, &entry, reason))?;
    Ok(manifest.get(REQUIRE_CAPABILITY).map(str::to_string))
}
