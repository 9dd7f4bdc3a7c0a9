//! Execution-environment resolution for feature archives
//!
//! The constraint-solving core of the catalog-publishing pipeline: takes
//! the requirements collected from a feature archive, narrows the fixed
//! table of Java execution environments, and publishes the minimum
//! compatible version onto a feature resource, or fails with a diagnostic
//! trail explaining which source eliminated which environment.

pub mod environments;
pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod resource;

pub use environments::{ExecutionEnvironment, execution_environments};
pub use error::{Error, Result};
pub use orchestrator::resolve_feature;
pub use resolver::{DiagnosticEntry, Resolution, resolve};
pub use resource::FeatureResource;
