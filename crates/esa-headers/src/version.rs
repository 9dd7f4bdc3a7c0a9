//! OSGi-style version and version-range types.
//!
//! Versions are dotted numeric strings (`1`, `1.2`, `1.10`) compared
//! segment-wise and numerically, so `1.9 < 1.10`. Ranges carry inclusive or
//! exclusive bounds and support intersection, the single algebraic
//! operation the resolution engine needs.
//!
//! # Examples
//!
//! ```
//! use esa_headers::VersionRange;
//!
//! let range = VersionRange::parse("[1.2,1.8]").unwrap();
//! assert_eq!(range.upper().unwrap().to_string(), "1.8");
//!
//! let other = VersionRange::parse("[1.7,1.11]").unwrap();
//! assert!(range.intersect(&other).is_some());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A dotted numeric version with its original text preserved for display.
///
/// Equality and ordering treat missing trailing segments as zero, so
/// `1.8` and `1.8.0` compare equal while each displays as written.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    raw: String,
}

impl Version {
    /// Parse a version string like `1`, `1.2` or `9.0.1`.
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text.trim();
        if raw.is_empty() {
            return Err(Error::invalid_version(text, "empty version"));
        }

        let mut segments = Vec::new();
        for segment in raw.split('.') {
            let value = segment.parse::<u64>().map_err(|_| {
                Error::invalid_version(raw, format!("non-numeric segment '{segment}'"))
            })?;
            segments.push(value);
        }

        Ok(Self {
            segments,
            raw: raw.to_string(),
        })
    }

    /// The numeric segments, as parsed.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An interval of versions with per-bound inclusivity.
///
/// The textual grammar accepts `[a,b]`, `(a,b)`, mixed brackets, and a bare
/// version `a` meaning `[a, infinity)`. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRange {
    low: Version,
    low_inclusive: bool,
    high: Option<Version>,
    high_inclusive: bool,
}

impl VersionRange {
    /// Parse a version range string.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_range(text, "empty range"));
        }

        let low_inclusive = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            // A bare version is an unbounded minimum.
            _ => {
                let low = Version::parse(trimmed)?;
                return Ok(Self {
                    low,
                    low_inclusive: true,
                    high: None,
                    high_inclusive: false,
                });
            }
        };

        let high_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(Error::invalid_range(trimmed, "unterminated bracket")),
        };

        let inner = &trimmed[1..trimmed.len() - 1];
        let mut bounds = inner.split(',');
        let (low_text, high_text) = match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(low), Some(high), None) => (low, high),
            _ => {
                return Err(Error::invalid_range(
                    trimmed,
                    "expected exactly two comma-separated bounds",
                ));
            }
        };

        let low = Version::parse(low_text)?;
        let high = Version::parse(high_text)?;
        if low > high {
            return Err(Error::invalid_range(trimmed, "lower bound above upper bound"));
        }

        Ok(Self {
            low,
            low_inclusive,
            high: Some(high),
            high_inclusive,
        })
    }

    /// The lower bound.
    pub fn lower(&self) -> &Version {
        &self.low
    }

    /// The upper bound, `None` when unbounded.
    pub fn upper(&self) -> Option<&Version> {
        self.high.as_ref()
    }

    /// Intersect two ranges.
    ///
    /// Returns `None` when the intervals do not overlap. Neither input is
    /// modified; the result is a fresh range.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let (low, low_inclusive) = match self.low.cmp(&other.low) {
            Ordering::Greater => (self.low.clone(), self.low_inclusive),
            Ordering::Less => (other.low.clone(), other.low_inclusive),
            Ordering::Equal => (self.low.clone(), self.low_inclusive && other.low_inclusive),
        };

        let (high, high_inclusive) = match (&self.high, &other.high) {
            (None, None) => (None, false),
            (Some(h), None) => (Some(h.clone()), self.high_inclusive),
            (None, Some(h)) => (Some(h.clone()), other.high_inclusive),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Less => (Some(a.clone()), self.high_inclusive),
                Ordering::Greater => (Some(b.clone()), other.high_inclusive),
                Ordering::Equal => (Some(a.clone()), self.high_inclusive && other.high_inclusive),
            },
        };

        if let Some(h) = &high {
            match low.cmp(h) {
                Ordering::Greater => return None,
                Ordering::Equal if !(low_inclusive && high_inclusive) => return None,
                _ => {}
            }
        }

        Some(Self {
            low,
            low_inclusive,
            high,
            high_inclusive,
        })
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.high {
            None => write!(f, "{}", self.low),
            Some(high) => write!(
                f,
                "{}{},{}{}",
                if self.low_inclusive { '[' } else { '(' },
                self.low,
                high,
                if self.high_inclusive { ']' } else { ')' },
            ),
        }
    }
}
