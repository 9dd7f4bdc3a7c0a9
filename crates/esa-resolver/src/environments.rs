//! The fixed execution-environment candidate table.

use std::sync::LazyLock;

use esa_headers::{Version, VersionRange};

/// Namespace of execution-environment requirement clauses.
pub const OSGI_EE_NAMESPACE: &str = "osgi.ee";

/// Filter value identifying a Java SE environment requirement.
pub const JAVA_FILTER_VALUE: &str = "JavaSE";

/// Filter key carrying the requested version range.
pub const VERSION_FILTER_KEY: &str = "version";

/// Directive key whose value is the clause's filter expression.
pub const FILTER_DIRECTIVE: &str = "filter";

/// One candidate runtime level a feature may be published against.
#[derive(Debug, Clone)]
pub struct ExecutionEnvironment {
    pub label: &'static str,
    pub range: VersionRange,
}

impl ExecutionEnvironment {
    /// Upper bound of this environment's range. Every table entry is
    /// bounded, so this never falls back.
    pub fn maximum(&self) -> &Version {
        self.range
            .upper()
            .expect("execution environment ranges are bounded")
    }
}

static EXECUTION_ENVIRONMENTS: LazyLock<Vec<ExecutionEnvironment>> = LazyLock::new(|| {
    [
        ("Java 6", "[1.2,1.6]"),
        ("Java 7", "[1.2,1.7]"),
        ("Java 8", "[1.2,1.8]"),
        ("Java 9", "[1.2,1.9]"),
        ("Java 10", "[1.2,1.10]"),
        ("Java 11", "[1.2,1.11]"),
    ]
    .into_iter()
    .map(|(label, range)| ExecutionEnvironment {
        label,
        range: VersionRange::parse(range).expect("static execution environment table"),
    })
    .collect()
});

/// The candidate table, ascending by upper bound.
///
/// Ascending order is load-bearing: environments are cumulative, so after
/// narrowing the first survivor is the lowest satisfying level and the one
/// that gets published. The table is built once and never mutated;
/// narrowing works on a borrowed subset.
pub fn execution_environments() -> &'static [ExecutionEnvironment] {
    &EXECUTION_ENVIRONMENTS
}
