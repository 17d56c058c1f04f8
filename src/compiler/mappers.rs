//! One transformation per builtin tag.
//!
//! Each mapper takes the node's attributes and its already-compiled
//! children and produces the node's fragment. The machine mapper produces
//! the config/options pair handed to the constructor.

use crate::compiler::CompileError;
use crate::core::{key_of, Attributes, Discriminant, Fragment, InvokeNode, StateNode, TransitionNode};
use crate::enforcement::{enforce, DuplicatePolicy, MACHINE_CHECKS, STATE_CHECKS};
use crate::machine::{MachineConfig, MachineOptions, PatchActionCreator};
use crate::merge::{by_discriminant, merge_invoke, merge_records, merge_states, merge_transitions};
use crate::options::{mutations_to_actions, split_options};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{json, Value};
use std::sync::Arc;

/// `<state>`: rename entry/exit hooks and merge transitions, the first
/// invoke and nested states.
pub fn state(
    mut attributes: Attributes,
    children: Vec<Fragment>,
    policy: DuplicatePolicy,
) -> Result<Fragment, CompileError> {
    let id = attributes.shift_remove("id").map(|id| key_of(&id));
    enforce(&children, STATE_CHECKS, policy, id.as_deref().unwrap_or("state"))?;

    // A literal `entry`/`exit` attribute overrides the renamed hook
    let on_entry = attributes.shift_remove("on-entry");
    let on_exit = attributes.shift_remove("on-exit");
    let entry = attributes.shift_remove("entry").or(on_entry);
    let exit = attributes.shift_remove("exit").or(on_exit);

    let (states, rest): (Vec<_>, Vec<_>) = children
        .into_iter()
        .partition(by_discriminant(Discriminant::State));
    let (transitions, rest): (Vec<_>, Vec<_>) = rest
        .into_iter()
        .partition(by_discriminant(Discriminant::Transition));

    let on = merge_transitions(transitions);
    let invoke = merge_invoke(rest);
    let states = merge_states(states);

    for (key, merged) in [
        ("on", on.is_some()),
        ("invoke", invoke.is_some()),
        ("states", states.is_some()),
    ] {
        if merged {
            attributes.shift_remove(key);
        }
    }

    Ok(Fragment::State(StateNode {
        id,
        entry,
        exit,
        on,
        invoke,
        states,
        attributes,
    }))
}

/// `<transition>`: the attributes as they are, tagged.
pub fn transition(mut attributes: Attributes) -> Fragment {
    let event = attributes.shift_remove("event").map(|event| key_of(&event));
    let target = attributes.shift_remove("target");

    Fragment::Transition(TransitionNode {
        event,
        target,
        attributes,
    })
}

/// `<invoke>`: the attributes unioned with the child records.
pub fn invoke(mut attributes: Attributes, children: Vec<Fragment>) -> Fragment {
    attributes.extend(merge_records(children));
    Fragment::Invoke(InvokeNode { config: attributes })
}

pub fn on_done(attributes: Attributes) -> Fragment {
    wrap("onDone", attributes)
}

pub fn on_error(attributes: Attributes) -> Fragment {
    wrap("onError", attributes)
}

fn wrap(key: &str, attributes: Attributes) -> Fragment {
    let mut record = Attributes::new();
    record.insert(key.to_string(), Value::Object(attributes));
    Fragment::Record(record)
}

/// `<machine>`: assemble the top-level config and the options.
///
/// Malformed input (missing `initial`, no states) is passed through for
/// the constructor to judge.
pub fn machine(
    mut attributes: Attributes,
    children: Vec<Fragment>,
    patcher: &Arc<dyn PatchActionCreator>,
    policy: DuplicatePolicy,
) -> Result<(MachineConfig, MachineOptions), CompileError> {
    let (options, rest) = split_options(children);
    let options = options.unwrap_or_default();

    let name = attributes
        .get("id")
        .map(key_of)
        .unwrap_or_else(|| "machine".to_string());
    enforce(&rest, MACHINE_CHECKS, policy, &name)?;

    let mut extra = match attributes.shift_remove("config") {
        Some(Value::Object(config)) => config,
        Some(other) => {
            warn!("{}: ignoring config attribute that is not a record: {}", name, other);
            Attributes::new()
        }
        None => Attributes::new(),
    };
    extra.extend(options.config.clone());

    let configured_id = extra.shift_remove("id");
    let configured_context = extra.shift_remove("context");
    let configured_initial = extra.shift_remove("initial");
    let configured_type = extra.shift_remove("type");

    let id = attributes.shift_remove("id").or(configured_id);
    let initial = attributes.shift_remove("initial").or(configured_initial);
    let machine_type = attributes.shift_remove("type").or(configured_type);
    let context = options
        .context
        .clone()
        .or(configured_context)
        .unwrap_or_else(|| json!({}));

    let states = match merge_states(rest) {
        Some(states) => {
            extra.shift_remove("states");
            Some(states)
        }
        None => match extra
            .get("states")
            .cloned()
            .map(serde_json::from_value::<IndexMap<String, StateNode>>)
        {
            Some(Ok(states)) => {
                extra.shift_remove("states");
                Some(states)
            }
            _ => None,
        },
    };

    for key in attributes.keys() {
        debug!("{}: ignoring machine attribute '{}'", name, key);
    }

    let mut actions = options.actions.clone();
    for (action, derived) in mutations_to_actions(&options.mutations, patcher) {
        if actions.insert(action.clone(), derived).is_some() {
            debug!("{}: mutation '{}' replaces an action", name, action);
        }
    }

    let config = MachineConfig {
        id,
        context,
        initial,
        machine_type,
        states,
        extra,
    };
    let options = MachineOptions {
        actions,
        guards: options.guards,
        activities: options.activities,
        delays: options.delays,
        services: options.services,
    };

    debug!(
        "{}: assembled {} top-level states, {} actions",
        name,
        config.states.as_ref().map_or(0, |states| states.len()),
        options.actions.len()
    );

    Ok((config, options))
}
