//! The narrowing engine.
//!
//! Each collected requirement narrows the fixed candidate table: the first
//! `osgi.ee` clause of a source whose filter names `JavaSE` and a version
//! contributes one range, and every surviving candidate whose own range has
//! an empty intersection with it is eliminated. Survivors keep their
//! original bounds for later rounds. When nothing survives, the accumulated
//! diagnostics say exactly which source eliminated which environment.

use std::collections::BTreeMap;
use std::fmt;

use esa_headers::{VersionRange, parse_filter, parse_requirement};

use crate::environments::{
    ExecutionEnvironment, FILTER_DIRECTIVE, JAVA_FILTER_VALUE, OSGI_EE_NAMESPACE,
    VERSION_FILTER_KEY, execution_environments,
};
use crate::error::{Error, Result};

/// One candidate elimination, recorded in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEntry {
    /// Archive-relative path of the component, or the subsystem source id.
    pub source_id: String,
    /// The range the source asked for.
    pub attempted_range: VersionRange,
    /// Label of the environment the range ruled out.
    pub eliminated_label: &'static str,
}

impl fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "manifest from {} with range {} caused {} to be removed",
            self.source_id, self.attempted_range, self.eliminated_label
        )
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Resolution {
    /// Upper bound of the lowest surviving environment.
    pub minimum_version: String,
    /// Raw header values of the sources that eliminated at least one
    /// candidate. Empty when no source constrained the result.
    pub per_source_requirements: BTreeMap<String, String>,
}

/// Narrow the candidate table using every collected requirement.
///
/// `requirements` maps source id to raw `Require-Capability` value, in the
/// stable source order the collector produced. Parse failures are fatal;
/// a source without an `osgi.ee` clause, without a `filter` directive, or
/// whose filter does not constrain `JavaSE` contributes nothing.
pub fn resolve(feature: &str, requirements: &BTreeMap<String, String>) -> Result<Resolution> {
    let mut survivors: Vec<&ExecutionEnvironment> = execution_environments().iter().collect();
    let mut diagnostics: Vec<DiagnosticEntry> = Vec::new();
    let mut narrowing_sources: BTreeMap<String, String> = BTreeMap::new();

    for (source_id, raw) in requirements {
        let Some(range) = requirement_range(raw)? else {
            tracing::debug!(source = %source_id, "no JavaSE constraint, skipping");
            continue;
        };

        // Retain pass: survivors with an empty intersection are dropped,
        // the rest keep their original bounds for subsequent rounds.
        let mut retained = Vec::with_capacity(survivors.len());
        let mut eliminated_any = false;
        for env in survivors {
            if env.range.intersect(&range).is_some() {
                retained.push(env);
            } else {
                tracing::debug!(
                    source = %source_id,
                    range = %range,
                    environment = env.label,
                    "candidate eliminated"
                );
                eliminated_any = true;
                diagnostics.push(DiagnosticEntry {
                    source_id: source_id.clone(),
                    attempted_range: range.clone(),
                    eliminated_label: env.label,
                });
            }
        }
        survivors = retained;

        if eliminated_any {
            narrowing_sources.insert(source_id.clone(), raw.clone());
        }
    }

    match survivors.first() {
        None => Err(Error::Conflict {
            feature: feature.to_string(),
            diagnostics,
        }),
        // Environments are cumulative, so only the lowest surviving level
        // needs publishing; no upper bound is ever recorded.
        Some(first) => Ok(Resolution {
            minimum_version: first.maximum().to_string(),
            per_source_requirements: narrowing_sources,
        }),
    }
}

/// Extract the version range a raw requirement asks for, if any.
///
/// Only the first `osgi.ee` clause is consulted; later clauses on the same
/// source are ignored even if more restrictive. The filter must name both
/// `osgi.ee=JavaSE` and a `version` key to count.
fn requirement_range(raw: &str) -> Result<Option<VersionRange>> {
    let clauses = parse_requirement(raw)?;
    let Some(clause) = clauses
        .into_iter()
        .find(|clause| clause.namespace == OSGI_EE_NAMESPACE)
    else {
        return Ok(None);
    };
    let Some(filter_text) = clause.directives.get(FILTER_DIRECTIVE) else {
        return Ok(None);
    };

    let filter = parse_filter(filter_text)?;
    if filter.get(OSGI_EE_NAMESPACE) != Some(JAVA_FILTER_VALUE) {
        return Ok(None);
    }
    let Some(version_text) = filter.get(VERSION_FILTER_KEY) else {
        return Ok(None);
    };

    Ok(Some(VersionRange::parse(version_text)?))
}
