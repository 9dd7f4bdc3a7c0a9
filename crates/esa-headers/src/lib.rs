//! Manifest header value parsing for ESA publishing
//!
//! Provides the textual building blocks of capability-requirement
//! resolution: OSGi-style versions and version ranges, `Require-Capability`
//! clause parsing, and filter-expression parsing. All parsers are strict:
//! malformed input is an error, never a silently skipped constraint.

pub mod error;
pub mod filter;
pub mod requirement;
pub mod version;

pub use error::{Error, Result};
pub use filter::{FilterExpression, parse_filter};
pub use requirement::{RequirementClause, parse_requirement};
pub use version::{Version, VersionRange};
