//! The writable feature-resource object the catalog pipeline publishes.

use std::collections::BTreeMap;

use serde::Serialize;

/// A feature as the catalog sees it, restricted to the fields this engine
/// owns: a display name plus the Java version-requirement fields.
///
/// The requirement fields are set together by the orchestrator after a
/// successful resolution, or not at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureResource {
    name: String,
    minimum_java_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_source_requirements: Option<BTreeMap<String, String>>,
}

impl FeatureResource {
    /// Create a resource with no version requirements recorded.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimum_java_version: None,
            per_source_requirements: None,
        }
    }

    /// Display name used in conflict messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set both version-requirement fields in one step.
    ///
    /// `per_source` is `None` when no source constrained the result, which
    /// the catalog distinguishes from an empty map.
    pub fn set_java_requirements(
        &mut self,
        minimum_version: String,
        per_source: Option<BTreeMap<String, String>>,
    ) {
        self.minimum_java_version = Some(minimum_version);
        self.per_source_requirements = per_source;
    }

    /// The resolved minimum Java version, if resolution has run.
    pub fn minimum_java_version(&self) -> Option<&str> {
        self.minimum_java_version.as_deref()
    }

    /// Raw requirement headers keyed by source, if any source narrowed.
    pub fn per_source_requirements(&self) -> Option<&BTreeMap<String, String>> {
        self.per_source_requirements.as_ref()
    }
}
