//! Error types for esa-resolver

use crate::resolver::DiagnosticEntry;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a feature's resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Archive I/O failure, including unreadable component manifests.
    #[error(transparent)]
    Archive(#[from] esa_archive::Error),

    /// A collected requirement header or filter could not be parsed.
    #[error(transparent)]
    Header(#[from] esa_headers::Error),

    /// Narrowing eliminated every candidate environment.
    #[error(
        "feature '{feature}' has no execution environment matching all component requirements: {}",
        format_trail(.diagnostics)
    )]
    Conflict {
        feature: String,
        diagnostics: Vec<DiagnosticEntry>,
    },
}

/// Render the diagnostic trail in encounter order as one message.
fn format_trail(diagnostics: &[DiagnosticEntry]) -> String {
    let entries: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    entries.join("; ")
}
