//! Compilation errors.

use crate::enforcement::StructureViolation;
use thiserror::Error;

/// Errors that abort a compilation. No partial result is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("No tag corresponding to '{0}'")]
    UnrecognizedTag(String),

    #[error("Element '{parent}' has a machine among its children")]
    NestedMachine { parent: String },

    #[error("Element '{tag}' compiled to a fragment where a machine was expected")]
    ExpectedMachine { tag: String },

    #[error("Component failed: {0}")]
    ComponentFailed(String),

    #[error("Ambiguous structure ({} violations): {}", .0.len(), describe(.0))]
    AmbiguousStructure(Vec<StructureViolation>),
}

fn describe(violations: &[StructureViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
