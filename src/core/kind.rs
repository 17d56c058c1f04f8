//! Fragment discriminants and state node categories.
//!
//! Discriminants are routing metadata only: they decide which merge a
//! fragment takes part in and never appear in the compiled configuration.

use super::fragment::StateNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification attached to every compiled fragment.
///
/// # Example
///
/// ```rust
/// use statechart_markup::core::Discriminant;
///
/// assert_eq!(Discriminant::State.name(), "state");
/// assert_eq!("invoke".parse::<Discriminant>(), Ok(Discriminant::Invoke));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Discriminant {
    State,
    Transition,
    /// Part of the tag vocabulary; no builtin fragment carries it.
    ChildConfig,
    Invoke,
}

impl Discriminant {
    /// Get the discriminant's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Transition => "transition",
            Self::ChildConfig => "childConfig",
            Self::Invoke => "invoke",
        }
    }
}

impl std::str::FromStr for Discriminant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(Self::State),
            "transition" => Ok(Self::Transition),
            "childConfig" => Ok(Self::ChildConfig),
            "invoke" => Ok(Self::Invoke),
            _ => Err(()),
        }
    }
}

/// Conceptual category of a state node.
///
/// - An atomic node has no child states.
/// - A compound node has child states and an `initial` key naming one of them.
/// - A parallel node has two or more child states active at once and no `initial`.
/// - A final node is a terminal leaf.
/// - A history node resolves to its parent's most recently visited child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Atomic,
    Compound,
    Parallel,
    Final,
    History,
}

impl StateKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Compound => "compound",
            Self::Parallel => "parallel",
            Self::Final => "final",
            Self::History => "history",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "atomic" => Some(Self::Atomic),
            "compound" => Some(Self::Compound),
            "parallel" => Some(Self::Parallel),
            "final" => Some(Self::Final),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

/// Infer the category of a state node.
///
/// An explicit `type` attribute wins, then a boolean marker attribute
/// (`compound`, `parallel`, `final`, `history`). Without markers the
/// category follows from structure: nested states make a compound node,
/// no nested states an atomic one. Returns `None` when the `type`
/// attribute names no known category.
pub fn infer_kind(node: &StateNode) -> Option<StateKind> {
    if let Some(explicit) = node.attributes.get("type") {
        return explicit.as_str().and_then(StateKind::parse);
    }

    let marked = [
        StateKind::Compound,
        StateKind::Parallel,
        StateKind::Final,
        StateKind::History,
    ]
    .into_iter()
    .find(|kind| node.attributes.get(kind.name()) == Some(&Value::Bool(true)));

    if marked.is_some() {
        return marked;
    }

    match &node.states {
        Some(states) if !states.is_empty() => Some(StateKind::Compound),
        _ => Some(StateKind::Atomic),
    }
}

/// Check whether a node's category carries child states.
pub fn has_child_states(node: &StateNode) -> bool {
    matches!(
        infer_kind(node),
        Some(StateKind::Compound | StateKind::Parallel | StateKind::History)
    )
}
