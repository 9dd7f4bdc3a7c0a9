//! Requirement filter parsing.
//!
//! Filters use a simplified LDAP-style grammar: a conjunction of
//! parenthesized `key op value` terms, e.g.
//! `(&(osgi.ee=JavaSE)(version>=1.7)(version<=1.11))`. The parsed form is a
//! flat attribute map; paired `version>=` / `version<=` comparisons are
//! folded into a single range text (`[1.7,1.11]`) so the `version` entry can
//! be handed straight to [`VersionRange::parse`](crate::VersionRange::parse).

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A parsed filter: attribute name to expected value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpression {
    terms: BTreeMap<String, String>,
}

impl FilterExpression {
    /// Look up an attribute's expected value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.terms.get(key).map(String::as_str)
    }

    /// Whether the filter constrains the given attribute at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.terms.contains_key(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Gte,
    Lte,
}

/// Parse a filter directive value into a [`FilterExpression`].
///
/// Only conjunctions and the `=`, `>=`, `<=` operators are supported;
/// anything else is a fatal parse error rather than a silent skip.
pub fn parse_filter(value: &str) -> Result<FilterExpression> {
    let malformed = |reason: String| Error::MalformedFilter {
        filter: value.to_string(),
        reason,
    };

    let mut raw_terms = Vec::new();
    collect_terms(value, value.trim(), &mut raw_terms)?;

    let mut terms = BTreeMap::new();
    let mut version_low: Option<String> = None;
    let mut version_high: Option<String> = None;
    for (key, op, term_value) in raw_terms {
        match (key.as_str(), op) {
            ("version", CompareOp::Gte) => version_low = Some(term_value),
            ("version", CompareOp::Lte) => version_high = Some(term_value),
            (_, CompareOp::Eq) => {
                terms.insert(key, term_value);
            }
            (_, _) => {
                return Err(malformed(format!(
                    "comparison operator not supported for attribute '{key}'"
                )));
            }
        }
    }

    // Fold version comparisons into range text.
    match (version_low, version_high) {
        (Some(low), Some(high)) => {
            terms.insert("version".to_string(), format!("[{low},{high}]"));
        }
        (Some(low), None) => {
            terms.insert("version".to_string(), low);
        }
        (None, Some(high)) => {
            terms.insert("version".to_string(), format!("[0,{high}]"));
        }
        (None, None) => {}
    }

    Ok(FilterExpression { terms })
}

/// Recursively collect `(key op value)` terms from a filter expression.
fn collect_terms(
    original: &str,
    text: &str,
    out: &mut Vec<(String, CompareOp, String)>,
) -> Result<()> {
    let malformed = |reason: String| Error::MalformedFilter {
        filter: original.to_string(),
        reason,
    };

    let text = text.trim();
    let inner = text
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| malformed(format!("expected parenthesized term, found '{text}'")))?
        .trim();

    if let Some(conjuncts) = inner.strip_prefix('&') {
        for group in split_balanced_groups(original, conjuncts)? {
            collect_terms(original, group, out)?;
        }
        return Ok(());
    }
    if inner.starts_with('|') || inner.starts_with('!') {
        return Err(malformed("only conjunctive filters are supported".to_string()));
    }

    let (key, op, value) = if let Some(idx) = inner.find(">=") {
        (&inner[..idx], CompareOp::Gte, &inner[idx + 2..])
    } else if let Some(idx) = inner.find("<=") {
        (&inner[..idx], CompareOp::Lte, &inner[idx + 2..])
    } else if let Some(idx) = inner.find('=') {
        (&inner[..idx], CompareOp::Eq, &inner[idx + 1..])
    } else {
        return Err(malformed(format!("term '{inner}' has no operator")));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(malformed(format!("term '{inner}' has no attribute name")));
    }
    out.push((key.to_string(), op, value.trim().to_string()));
    Ok(())
}

/// Split `(a)(b)(c)` into its balanced top-level groups.
fn split_balanced_groups<'a>(original: &str, text: &'a str) -> Result<Vec<&'a str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| Error::MalformedFilter {
                    filter: original.to_string(),
                    reason: "unbalanced parentheses".to_string(),
                })?;
                if depth == 0 {
                    groups.push(&text[start..=i]);
                }
            }
            c if depth == 0 && !c.is_whitespace() => {
                return Err(Error::MalformedFilter {
                    filter: original.to_string(),
                    reason: format!("unexpected character '{c}' between terms"),
                });
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::MalformedFilter {
            filter: original.to_string(),
            reason: "unbalanced parentheses".to_string(),
        });
    }
    Ok(groups)
}
