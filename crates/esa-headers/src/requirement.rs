//! `Require-Capability` header parsing.
//!
//! A header value is a comma-separated list of clauses. Each clause names a
//! namespace followed by `;`-separated parameters: `key:=value` directives
//! and `key=value` attributes. Directive values are often quoted and may
//! contain commas and semicolons, so clause splitting must respect quotes:
//!
//! ```text
//! osgi.ee;filter:="(&(osgi.ee=JavaSE)(version>=1.7))",osgi.service;...
//! ```

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// One structured clause of a `Require-Capability` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementClause {
    /// The capability namespace, e.g. `osgi.ee`.
    pub namespace: String,
    /// `key=value` attributes.
    pub attributes: BTreeMap<String, String>,
    /// `key:=value` directives, quotes stripped.
    pub directives: BTreeMap<String, String>,
}

/// Parse a raw `Require-Capability` value into its clauses, in order.
pub fn parse_requirement(raw: &str) -> Result<Vec<RequirementClause>> {
    let mut clauses = Vec::new();
    for clause_text in split_outside_quotes(raw, ',') {
        let clause_text = clause_text.trim();
        if clause_text.is_empty() {
            return Err(Error::MalformedRequirement {
                header: raw.to_string(),
                reason: "empty clause".to_string(),
            });
        }
        clauses.push(parse_clause(raw, clause_text)?);
    }
    Ok(clauses)
}

fn parse_clause(header: &str, clause: &str) -> Result<RequirementClause> {
    let malformed = |reason: String| Error::MalformedRequirement {
        header: header.to_string(),
        reason,
    };

    let mut parts = split_outside_quotes(clause, ';').into_iter();
    let namespace = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("missing namespace".to_string()))?;
    if namespace.contains('=') {
        return Err(malformed(format!(
            "clause '{clause}' starts with a parameter instead of a namespace"
        )));
    }

    let mut attributes = BTreeMap::new();
    let mut directives = BTreeMap::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some(idx) = part.find(":=") {
            let key = part[..idx].trim();
            let value = unquote(part[idx + 2..].trim());
            directives.insert(key.to_string(), value.to_string());
        } else if let Some(idx) = part.find('=') {
            let key = part[..idx].trim();
            let value = unquote(part[idx + 1..].trim());
            attributes.insert(key.to_string(), value.to_string());
        } else {
            return Err(malformed(format!("parameter '{part}' has no value")));
        }
    }

    Ok(RequirementClause {
        namespace,
        attributes,
        directives,
    })
}

/// Split on `separator`, ignoring separators inside double-quoted spans.
fn split_outside_quotes(text: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in text.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c == separator && !in_quotes => {
                parts.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}
