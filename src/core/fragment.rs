//! Compiled fragments.
//!
//! Every node of a markup tree compiles to one [`Fragment`]. Parents
//! inspect the discriminants of their already-compiled children and merge
//! them into the aggregate structures of the configuration.

use super::kind::Discriminant;
use crate::options::OptionsRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered attribute map, as written in markup.
pub type Attributes = Map<String, Value>;

/// Result of compiling one node below the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    State(StateNode),
    Transition(TransitionNode),
    Invoke(InvokeNode),
    /// Untagged record folded into its parent by shallow union.
    Record(Attributes),
    /// Explicitly marked options child of a machine.
    Options(OptionsRecord),
}

impl Fragment {
    /// The routing discriminant, if the fragment has one.
    ///
    /// Records and options are untagged; their parents fold them by shape.
    pub fn discriminant(&self) -> Option<Discriminant> {
        match self {
            Self::State(_) => Some(Discriminant::State),
            Self::Transition(_) => Some(Discriminant::Transition),
            Self::Invoke(_) => Some(Discriminant::Invoke),
            Self::Record(_) | Self::Options(_) => None,
        }
    }

    pub fn as_state(&self) -> Option<&StateNode> {
        match self {
            Self::State(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&TransitionNode> {
        match self {
            Self::Transition(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_invoke(&self) -> Option<&InvokeNode> {
        match self {
            Self::Invoke(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Attributes> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_state(self) -> Option<StateNode> {
        match self {
            Self::State(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_transition(self) -> Option<TransitionNode> {
        match self {
            Self::Transition(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_invoke(self) -> Option<InvokeNode> {
        match self {
            Self::Invoke(node) => Some(node),
            _ => None,
        }
    }
}

impl From<OptionsRecord> for Fragment {
    fn from(options: OptionsRecord) -> Self {
        Fragment::Options(options)
    }
}

/// Configuration of one state node.
///
/// The `id` is identity within the parent's `states` map and is never
/// serialized as part of the node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    #[serde(skip)]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<Value>,

    /// Transition table keyed by event name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<IndexMap<String, TransitionConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoke: Option<Attributes>,

    /// Nested states keyed by id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<IndexMap<String, StateNode>>,

    /// Passthrough attributes (`initial`, `type`, ...)
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// A transition as declared, before its parent keys it by event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionNode {
    pub event: Option<String>,
    pub target: Option<Value>,
    /// Passthrough attributes such as guard or action references
    pub attributes: Attributes,
}

impl TransitionNode {
    /// The entry stored under this transition's event in the `on` table.
    pub fn config(&self) -> TransitionConfig {
        TransitionConfig {
            target: self.target.clone(),
            attributes: self.attributes.clone(),
        }
    }

    pub fn into_config(self) -> TransitionConfig {
        TransitionConfig {
            target: self.target,
            attributes: self.attributes,
        }
    }
}

/// One entry of a state's `on` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,

    #[serde(flatten)]
    pub attributes: Attributes,
}

/// An invoke block: the service attributes plus merged child records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvokeNode {
    pub config: Attributes,
}

/// Render a markup attribute as a map key.
pub(crate) fn key_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
