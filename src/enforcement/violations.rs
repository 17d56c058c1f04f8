//! Structural ambiguities among sibling fragments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sibling collisions that compile by fold order unless rejected
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureViolation {
    #[error("Duplicate state id '{id}' ({count} siblings)")]
    DuplicateStateId { id: String, count: usize },

    #[error("Duplicate transition event '{event}' ({count} siblings)")]
    DuplicateEvent { event: String, count: usize },

    #[error("Multiple invoke blocks ({count}); only the first is used")]
    MultipleInvokes { count: usize },

    #[error("State without an id cannot be keyed")]
    MissingStateId,

    #[error("Transition without an event cannot be keyed")]
    MissingEvent,
}

/// How sibling collisions are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Resolve by fold order, log at debug level
    #[default]
    Permissive,

    /// Resolve by fold order, log a warning
    Warn,

    /// Abort compilation with every violation found
    Reject,
}
