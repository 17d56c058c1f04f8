//! Machine configuration and options handed to the constructor.

use crate::core::{Attributes, Implementations, StateNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level machine configuration.
///
/// Raw configuration keys that have no dedicated field are kept in
/// `extra` and serialized alongside the known keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Initial extended state
    #[serde(default)]
    pub context: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Value>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<IndexMap<String, StateNode>>,

    #[serde(flatten)]
    pub extra: Attributes,
}

impl MachineConfig {
    /// The configuration as the runtime's JSON shape.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Look up a nested state by its path of ids.
    pub fn state(&self, path: &[&str]) -> Option<&StateNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.states.as_ref()?.get(*first)?;
        for id in rest {
            node = node.states.as_ref()?.get(*id)?;
        }
        Some(node)
    }
}

/// Implementations handed to the constructor next to the config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineOptions {
    pub actions: Implementations,
    pub guards: Implementations,
    pub activities: Implementations,
    pub delays: Implementations,
    pub services: Implementations,
}
