//! End-to-end resolution tests against real nested archives on disk.
//!
//! Each test writes a feature archive (zip of component jars plus an
//! optional subsystem manifest), runs a full resolution pass, and checks
//! what landed on the feature resource.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use esa_resolver::{Error, FeatureResource, resolve_feature};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn jar_with_requirement(requirement: Option<&str>) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
    let mut manifest = String::from("Manifest-Version: 1.0\r\n");
    if let Some(requirement) = requirement {
        manifest.push_str(&format!("Require-Capability: {requirement}\r\n"));
    }
    writer.write_all(manifest.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_feature(dir: &Path, components: &[(&str, Vec<u8>)], subsystem: Option<&str>) -> PathBuf {
    let path = dir.join("feature.esa");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, bytes) in components {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    if let Some(manifest) = subsystem {
        writer.start_file("OSGI-INF/SUBSYSTEM.MF", options).unwrap();
        writer
            .write_all(format!("Subsystem-SymbolicName: com.example.feature\r\n{manifest}").as_bytes())
            .unwrap();
    }
    writer.finish().unwrap();
    path
}

fn ee_requirement(terms: &str) -> String {
    format!("osgi.ee;filter:=\"(&(osgi.ee=JavaSE){terms})\"")
}

fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_single_component_narrows_to_java_7() {
    let temp = TempDir::new().unwrap();
    let requirement = ee_requirement("(version>=1.7)(version<=1.11)");
    let path = write_feature(
        temp.path(),
        &[("a.jar", jar_with_requirement(Some(&requirement)))],
        None,
    );

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();

    assert_eq!(resource.minimum_java_version(), Some("1.7"));
    let per_source = resource.per_source_requirements().unwrap();
    assert_eq!(per_source.len(), 1);
    assert_eq!(per_source.get("a.jar").map(String::as_str), Some(requirement.as_str()));
}

#[test]
fn test_second_component_narrows_to_java_9() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(
        temp.path(),
        &[
            (
                "a.jar",
                jar_with_requirement(Some(&ee_requirement("(version>=1.7)(version<=1.11)"))),
            ),
            (
                "b.jar",
                jar_with_requirement(Some(&ee_requirement("(version>=1.9)(version<=1.11)"))),
            ),
        ],
        None,
    );

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();

    assert_eq!(resource.minimum_java_version(), Some("1.9"));
    assert_eq!(resource.per_source_requirements().map(|m| m.len()), Some(2));
}

#[test]
fn test_conflicting_component_fails_and_mutates_nothing() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(
        temp.path(),
        &[(
            "old.jar",
            jar_with_requirement(Some(&ee_requirement("(version>=1.0)(version<=1.1)"))),
        )],
        None,
    );

    let mut resource = FeatureResource::new("com.example.feature");
    let err = resolve_feature(&path, &mut resource).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("com.example.feature"));
    assert!(message.contains("old.jar"));
    assert!(message.contains("Java 6") && message.contains("Java 11"));

    assert!(resource.minimum_java_version().is_none());
    assert!(resource.per_source_requirements().is_none());
}

#[test]
fn test_empty_feature_resolves_to_java_6_with_absent_map() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(temp.path(), &[], None);

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();

    assert_eq!(resource.minimum_java_version(), Some("1.6"));
    assert!(resource.per_source_requirements().is_none());
}

#[test]
fn test_subsystem_manifest_alone_narrows() {
    let temp = TempDir::new().unwrap();
    let requirement = ee_requirement("(version>=1.8)");
    let path = write_feature(
        temp.path(),
        &[],
        Some(&format!("Require-Capability: {requirement}\r\n")),
    );

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();

    assert_eq!(resource.minimum_java_version(), Some("1.8"));
    let per_source = resource.per_source_requirements().unwrap();
    assert_eq!(
        per_source.get("OSGI-INF/SUBSYSTEM.MF").map(String::as_str),
        Some(requirement.as_str())
    );
}

#[test]
fn test_component_without_manifest_is_fatal_and_mutates_nothing() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(temp.path(), &[("broken.jar", b"not a jar".to_vec())], None);

    let mut resource = FeatureResource::new("com.example.feature");
    let err = resolve_feature(&path, &mut resource).unwrap_err();

    assert!(matches!(
        err,
        Error::Archive(esa_archive::Error::MissingManifest { .. })
    ));
    assert!(resource.minimum_java_version().is_none());
}

#[test]
fn test_extraction_leaves_the_filesystem_clean() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(
        temp.path(),
        &[
            (
                "good.jar",
                jar_with_requirement(Some(&ee_requirement("(version>=1.7)(version<=1.11)"))),
            ),
            ("broken.jar", b"not a jar".to_vec()),
        ],
        None,
    );
    let before = dir_entries(temp.path());

    // Fails on the malformed component, and leaves no extraction debris
    // behind either way.
    let mut resource = FeatureResource::new("com.example.feature");
    assert!(resolve_feature(&path, &mut resource).is_err());
    assert_eq!(dir_entries(temp.path()), before);

    let valid = write_feature(
        temp.path(),
        &[(
            "good.jar",
            jar_with_requirement(Some(&ee_requirement("(version>=1.7)(version<=1.11)"))),
        )],
        None,
    );
    let before = dir_entries(temp.path());
    resolve_feature(&valid, &mut resource).unwrap();
    assert_eq!(dir_entries(temp.path()), before);
}

#[test]
fn test_wrapped_manifest_header_resolves() {
    // Manifest values wrap at 72 bytes with a leading-space continuation;
    // the header must survive unfolding before parsing.
    let temp = TempDir::new().unwrap();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
    writer
        .write_all(
            b"Manifest-Version: 1.0\r\n\
              Require-Capability: osgi.ee;filter:=\"(&(osgi.ee=JavaSE)(version>=1.\r\n 8))\"\r\n",
        )
        .unwrap();
    let jar = writer.finish().unwrap().into_inner();
    let path = write_feature(temp.path(), &[("wrapped.jar", jar)], None);

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();
    assert_eq!(resource.minimum_java_version(), Some("1.8"));
}

#[test]
fn test_resource_serializes_for_the_catalog() {
    let temp = TempDir::new().unwrap();
    let path = write_feature(
        temp.path(),
        &[(
            "a.jar",
            jar_with_requirement(Some(&ee_requirement("(version>=1.7)(version<=1.11)"))),
        )],
        None,
    );

    let mut resource = FeatureResource::new("com.example.feature");
    resolve_feature(&path, &mut resource).unwrap();

    let json = serde_json::to_value(&resource).unwrap();
    assert_eq!(json["name"], "com.example.feature");
    assert_eq!(json["minimum_java_version"], "1.7");
    assert!(json["per_source_requirements"]["a.jar"].is_string());
}
