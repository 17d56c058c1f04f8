//! Sibling checks using Validation.

use crate::compiler::CompileError;
use crate::core::Fragment;
use crate::enforcement::violations::{DuplicatePolicy, StructureViolation};
use indexmap::IndexMap;
use log::{debug, warn};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for sibling check functions
pub type SiblingCheck = fn(&[Fragment]) -> Validation<(), NonEmptyVec<StructureViolation>>;

/// Checks applied to the children of a state.
pub const STATE_CHECKS: &[SiblingCheck] = &[unique_state_ids, unique_events, single_invoke];

/// Checks applied to the state children of a machine.
pub const MACHINE_CHECKS: &[SiblingCheck] = &[unique_state_ids];

fn accumulate(violations: Vec<StructureViolation>) -> Validation<(), NonEmptyVec<StructureViolation>> {
    let checks: Vec<Validation<(), NonEmptyVec<StructureViolation>>> = violations
        .into_iter()
        .map(|violation| Validation::fail(violation))
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn count_keys<'a>(keys: impl Iterator<Item = &'a String>) -> IndexMap<&'a String, usize> {
    keys.fold(IndexMap::new(), |mut counts, key| {
        *counts.entry(key).or_insert(0) += 1;
        counts
    })
}

/// Every state child has an id no sibling shares.
pub fn unique_state_ids(children: &[Fragment]) -> Validation<(), NonEmptyVec<StructureViolation>> {
    let states: Vec<_> = children.iter().filter_map(Fragment::as_state).collect();

    let mut violations: Vec<StructureViolation> = states
        .iter()
        .filter(|node| node.id.is_none())
        .map(|_| StructureViolation::MissingStateId)
        .collect();

    violations.extend(
        count_keys(states.iter().filter_map(|node| node.id.as_ref()))
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| StructureViolation::DuplicateStateId {
                id: id.clone(),
                count,
            }),
    );

    accumulate(violations)
}

/// Every transition child has an event no sibling shares.
pub fn unique_events(children: &[Fragment]) -> Validation<(), NonEmptyVec<StructureViolation>> {
    let transitions: Vec<_> = children.iter().filter_map(Fragment::as_transition).collect();

    let mut violations: Vec<StructureViolation> = transitions
        .iter()
        .filter(|transition| transition.event.is_none())
        .map(|_| StructureViolation::MissingEvent)
        .collect();

    violations.extend(
        count_keys(transitions.iter().filter_map(|t| t.event.as_ref()))
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(event, count)| StructureViolation::DuplicateEvent {
                event: event.clone(),
                count,
            }),
    );

    accumulate(violations)
}

/// At most one invoke child.
pub fn single_invoke(children: &[Fragment]) -> Validation<(), NonEmptyVec<StructureViolation>> {
    let count = children.iter().filter_map(Fragment::as_invoke).count();

    if count > 1 {
        Validation::fail(StructureViolation::MultipleInvokes { count })
    } else {
        Validation::success(())
    }
}

/// Run `checks` over `children` and apply `policy` to the violations.
///
/// `node` names the parent for log messages.
pub fn enforce(
    children: &[Fragment],
    checks: &[SiblingCheck],
    policy: DuplicatePolicy,
    node: &str,
) -> Result<(), CompileError> {
    let results: Vec<_> = checks.iter().map(|check| check(children)).collect();

    match Validation::all_vec(results) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => match policy {
            DuplicatePolicy::Permissive => {
                for violation in errors.iter() {
                    debug!("{}: {}", node, violation);
                }
                Ok(())
            }
            DuplicatePolicy::Warn => {
                for violation in errors.iter() {
                    warn!("{}: {}", node, violation);
                }
                Ok(())
            }
            DuplicatePolicy::Reject => Err(CompileError::AmbiguousStructure(
                errors.iter().cloned().collect(),
            )),
        },
    }
}
