//! Shared fixtures for building feature archives in tests.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build an in-memory component archive with the given manifest text.
/// `None` produces an archive with no manifest entry at all.
pub fn jar_bytes(manifest: Option<&str>) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    if let Some(manifest) = manifest {
        writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
        writer.write_all(manifest.as_bytes()).unwrap();
    }
    writer
        .start_file("com/example/Placeholder.class", options)
        .unwrap();
    writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
    writer.finish().unwrap().into_inner()
}

/// Manifest text carrying a `Require-Capability` header.
pub fn manifest_with_requirement(requirement: &str) -> String {
    format!("Manifest-Version: 1.0\r\nRequire-Capability: {requirement}\r\n")
}

/// Write a feature archive to `dir` with the given named entries and an
/// optional subsystem manifest, returning its path.
pub fn write_feature(dir: &Path, entries: &[(&str, Vec<u8>)], subsystem: Option<&str>) -> PathBuf {
    let path = dir.join("feature.esa");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    if let Some(manifest) = subsystem {
        writer.start_file("OSGI-INF/SUBSYSTEM.MF", options).unwrap();
        writer.write_all(manifest.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}
