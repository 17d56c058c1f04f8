//! The options record of a machine.
//!
//! A machine's leading child may carry the cross-cutting definitions the
//! markup refers to by name: context, guards, actions, mutations,
//! services, activities and delays, plus raw configuration merged into
//! the top-level machine config.

use crate::core::{Attributes, Fragment, Implementation, Implementations};
use crate::machine::PatchActionCreator;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Cross-cutting definitions supplied as a machine's first child.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsRecord {
    pub context: Option<Value>,
    pub guards: Implementations,
    pub actions: Implementations,
    /// Context mutators, turned into patch actions at compile time
    pub mutations: Implementations,
    pub activities: Implementations,
    pub delays: Implementations,
    pub services: Implementations,
    /// Raw configuration merged into the machine config
    pub config: Attributes,
}

impl OptionsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial extended state.
    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.guards.insert(name.into(), Implementation::new(predicate));
        self
    }

    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Implementation::new(action));
        self
    }

    /// Add a context mutator: a pure function from action arguments to a
    /// context patch.
    pub fn mutation<F>(mut self, name: impl Into<String>, mutator: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.mutations.insert(name.into(), Implementation::new(mutator));
        self
    }

    pub fn activity<F>(mut self, name: impl Into<String>, activity: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.activities
            .insert(name.into(), Implementation::new(activity));
        self
    }

    /// Add a named delay, either fixed (`Implementation::constant`) or computed.
    pub fn delay(mut self, name: impl Into<String>, delay: Implementation) -> Self {
        self.delays.insert(name.into(), delay);
        self
    }

    pub fn service<F>(mut self, name: impl Into<String>, service: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.services.insert(name.into(), Implementation::new(service));
        self
    }

    /// Merge raw configuration keys into the machine config.
    pub fn config(mut self, config: Attributes) -> Self {
        self.config.extend(config);
        self
    }
}

/// Split a machine's children into its options record and the rest.
///
/// Only a leading [`Fragment::Options`] counts as the options record. An
/// options fragment anywhere else is dropped.
pub fn split_options(children: Vec<Fragment>) -> (Option<OptionsRecord>, Vec<Fragment>) {
    let mut children = children.into_iter();
    let mut rest = Vec::new();

    let options = match children.next() {
        Some(Fragment::Options(options)) => Some(options),
        Some(first) => {
            rest.push(first);
            None
        }
        None => None,
    };

    for child in children {
        match child {
            Fragment::Options(_) => warn!("ignoring options record that is not the first child"),
            other => rest.push(other),
        }
    }

    (options, rest)
}

/// Turn context mutators into runtime actions.
///
/// Each derived action calls its mutator with the action's arguments and
/// hands the resulting patch to `patcher`. Nothing is called here.
pub fn mutations_to_actions(
    mutations: &Implementations,
    patcher: &Arc<dyn PatchActionCreator>,
) -> Implementations {
    mutations
        .iter()
        .map(|(name, mutator)| {
            debug!("deriving patch action '{}'", name);
            let mutator = mutator.clone();
            let patcher = Arc::clone(patcher);
            let action = Implementation::new(move |args| patcher.create(mutator.call(args)));
            (name.clone(), action)
        })
        .collect()
}
