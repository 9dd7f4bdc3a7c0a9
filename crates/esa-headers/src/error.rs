//! Error types for esa-headers

/// Result type for header parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing manifest header values.
///
/// All of these are fatal to the resolution that triggered the parse:
/// silently skipping an unparsable constraint would under-constrain the
/// published result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid version range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("malformed requirement header '{header}': {reason}")]
    MalformedRequirement { header: String, reason: String },

    #[error("malformed filter expression '{filter}': {reason}")]
    MalformedFilter { filter: String, reason: String },
}

impl Error {
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_range(range: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.into(),
            reason: reason.into(),
        }
    }
}
