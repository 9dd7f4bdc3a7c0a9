//! Nested feature-archive reading for ESA publishing
//!
//! Opens a feature archive, enumerates its component archives, and pulls
//! each source's `Require-Capability` header out of the relevant manifest.
//! All handles are scoped; nothing is written to disk during extraction.

pub mod collector;
pub mod error;
pub mod manifest;
pub mod navigator;

#[cfg(test)]
pub(crate) mod test_support;

pub use collector::{SUBSYSTEM_SOURCE_ID, collect_requirements};
pub use error::{Error, Result};
pub use manifest::{
    MANIFEST_ENTRY, REQUIRE_CAPABILITY, component_require_capability,
    subsystem_require_capability,
};
pub use navigator::{ArchiveNavigator, SUBSYSTEM_MANIFEST_PATH};
