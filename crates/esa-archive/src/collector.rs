//! Requirement collection across one feature archive.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::manifest::{component_require_capability, subsystem_require_capability};
use crate::navigator::ArchiveNavigator;

/// Source id under which the subsystem manifest's requirement is recorded.
/// Component requirements are keyed by their archive-relative entry names,
/// which cannot collide with this.
pub const SUBSYSTEM_SOURCE_ID: &str = "OSGI-INF/SUBSYSTEM.MF";

/// Gather every `Require-Capability` value in the feature, keyed by source.
///
/// Reads each component archive at the feature root plus the subsystem
/// manifest if present; sources without the header are skipped. The map is
/// ordered by source id so narrowing and diagnostics are deterministic.
pub fn collect_requirements(path: &Path) -> Result<BTreeMap<String, String>> {
    let mut navigator = ArchiveNavigator::open(path)?;
    let mut requirements = BTreeMap::new();

    for entry in navigator.component_entries() {
        if let Some(raw) = component_require_capability(&mut navigator, &entry)? {
            tracing::debug!(source = %entry, "collected component requirement");
            requirements.insert(entry, raw);
        }
    }

    if let Some(raw) = subsystem_require_capability(&mut navigator)? {
        tracing::debug!(source = SUBSYSTEM_SOURCE_ID, "collected subsystem requirement");
        requirements.insert(SUBSYSTEM_SOURCE_ID.to_string(), raw);
    }

    Ok(requirements)
}
