//! One-pass resolution for a feature archive.

use std::path::Path;

use esa_archive::collect_requirements;

use crate::error::Result;
use crate::resolver::resolve;
use crate::resource::FeatureResource;

/// Resolve a feature archive's execution-environment requirements and
/// record them on the resource.
///
/// On success, both version-requirement fields are set in one step. On any
/// failure — archive I/O, missing manifest, parse error, or conflict — the
/// resource is left untouched and the error surfaces with the feature
/// identity.
pub fn resolve_feature(archive: &Path, resource: &mut FeatureResource) -> Result<()> {
    tracing::debug!(
        feature = resource.name(),
        archive = %archive.display(),
        "resolving execution-environment requirements"
    );

    let requirements = collect_requirements(archive)?;
    let resolution = resolve(resource.name(), &requirements)?;

    let per_source = if resolution.per_source_requirements.is_empty() {
        None
    } else {
        Some(resolution.per_source_requirements)
    };
    resource.set_java_requirements(resolution.minimum_version, per_source);
    Ok(())
}
