//! The boundary to the state machine runtime.
//!
//! Compilation ends by handing a [`MachineConfig`] and [`MachineOptions`]
//! to a [`MachineConstructor`]; whatever it returns is the result of the
//! whole compilation. Context mutators are wrapped through a
//! [`PatchActionCreator`] supplied by the same runtime.

mod config;

pub use config::{MachineConfig, MachineOptions};

use serde_json::{json, Value};

/// Turns a config and its implementations into a machine value.
///
/// Any `Fn(MachineConfig, MachineOptions) -> M` is a constructor.
pub trait MachineConstructor {
    type Machine;

    fn construct(&self, config: MachineConfig, options: MachineOptions) -> Self::Machine;
}

impl<F, M> MachineConstructor for F
where
    F: Fn(MachineConfig, MachineOptions) -> M,
{
    type Machine = M;

    fn construct(&self, config: MachineConfig, options: MachineOptions) -> M {
        self(config, options)
    }
}

/// Creates the runtime action that applies a context patch immutably.
pub trait PatchActionCreator: Send + Sync {
    fn create(&self, patch: Value) -> Value;
}

impl<F> PatchActionCreator for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn create(&self, patch: Value) -> Value {
        self(patch)
    }
}

/// Default patch action: `{"type": "assign", "patch": <patch>}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmutablePatch;

impl PatchActionCreator for ImmutablePatch {
    fn create(&self, patch: Value) -> Value {
        json!({ "type": "assign", "patch": patch })
    }
}

/// The config/options pair as compiled, without building a machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineBlueprint {
    pub config: MachineConfig,
    pub options: MachineOptions,
}

/// Constructor that returns the compiled [`MachineBlueprint`] itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blueprint;

impl MachineConstructor for Blueprint {
    type Machine = MachineBlueprint;

    fn construct(&self, config: MachineConfig, options: MachineOptions) -> MachineBlueprint {
        MachineBlueprint { config, options }
    }
}
