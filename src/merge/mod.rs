//! Folding sibling fragments into aggregate structures.
//!
//! Each merge selects the children carrying one discriminant and folds
//! them left to right in declaration order:
//!
//! - states are keyed by id, a later sibling replacing an earlier one
//!   with the same id (the key keeps its first position);
//! - transitions are keyed by event with the same last-wins rule;
//! - only the first invoke is kept;
//! - plain records are unioned, later keys overriding earlier ones.
//!
//! A merge that selects nothing returns `None` so the parent can omit the
//! key entirely. Policies for reporting collisions live in
//! [`crate::enforcement`].

use crate::core::{Attributes, Discriminant, Fragment, StateNode, TransitionConfig};
use indexmap::IndexMap;
use log::{debug, warn};

/// Predicate selecting fragments tagged with `kind`.
pub fn by_discriminant(kind: Discriminant) -> impl Fn(&Fragment) -> bool {
    move |fragment: &Fragment| fragment.discriminant() == Some(kind)
}

/// Fold state children into a map keyed by id.
///
/// States without an id cannot be keyed and are skipped.
pub fn merge_states(children: Vec<Fragment>) -> Option<IndexMap<String, StateNode>> {
    let states = children
        .into_iter()
        .filter_map(Fragment::into_state)
        .fold(IndexMap::new(), |mut acc, node| {
            match node.id.clone() {
                Some(id) => {
                    if acc.insert(id.clone(), node).is_some() {
                        debug!("state '{}' replaced by a later sibling", id);
                    }
                }
                None => warn!("skipping state without an id"),
            }
            acc
        });

    (!states.is_empty()).then_some(states)
}

/// Fold transition children into an `on` table keyed by event.
///
/// Transitions without an event cannot be keyed and are skipped.
pub fn merge_transitions(children: Vec<Fragment>) -> Option<IndexMap<String, TransitionConfig>> {
    let on = children
        .into_iter()
        .filter_map(Fragment::into_transition)
        .fold(IndexMap::new(), |mut acc, transition| {
            match transition.event.clone() {
                Some(event) => {
                    if acc.insert(event.clone(), transition.into_config()).is_some() {
                        debug!("transition on '{}' replaced by a later sibling", event);
                    }
                }
                None => warn!("skipping transition without an event"),
            }
            acc
        });

    (!on.is_empty()).then_some(on)
}

/// The first invoke block among the children.
pub fn merge_invoke(children: Vec<Fragment>) -> Option<Attributes> {
    children
        .into_iter()
        .find_map(Fragment::into_invoke)
        .map(|invoke| invoke.config)
}

/// Shallow union of the plain records among the children.
pub fn merge_records(children: Vec<Fragment>) -> Attributes {
    children.into_iter().fold(Attributes::new(), |mut acc, child| {
        match child {
            Fragment::Record(record) => acc.extend(record),
            other => warn!(
                "ignoring {} child where only records merge",
                other.discriminant().map_or("options", |d| d.name())
            ),
        }
        acc
    })
}
