//! Builder API for markup trees.
//!
//! One constructor function per builtin tag returns an [`Element`] that
//! is refined with `.attr(..)` and `.child(..)` and finally handed to
//! [`Compiler::evaluate`](crate::compiler::Compiler::evaluate) or
//! [`Compiler::build`](crate::compiler::Compiler::build).

pub mod element;
pub mod macros;

pub use element::{Element, Node};

use crate::compiler::{Builtin, CompileError, Output, Props, Tag};
use serde_json::Value;

/// `<machine id initial>`
///
/// # Example
///
/// ```
/// use statechart_markup::builder::{machine, state, transition};
/// use statechart_markup::compiler::Compiler;
///
/// let compiler = Compiler::blueprint();
/// let blueprint = compiler
///     .build(
///         machine("light", "green")
///             .child(state("green").child(transition("TIMER", "red")))
///             .child(state("red").child(transition("TIMER", "green"))),
///     )
///     .unwrap();
///
/// assert_eq!(blueprint.config.states.unwrap().len(), 2);
/// ```
pub fn machine<M>(id: impl Into<String>, initial: impl Into<String>) -> Element<M> {
    Element::new(Builtin::Machine)
        .attr("id", Value::String(id.into()))
        .attr("initial", Value::String(initial.into()))
}

/// `<state id>`
pub fn state<M>(id: impl Into<String>) -> Element<M> {
    Element::new(Builtin::State).attr("id", Value::String(id.into()))
}

/// `<transition event target>`
pub fn transition<M>(event: impl Into<String>, target: impl Into<String>) -> Element<M> {
    Element::new(Builtin::Transition)
        .attr("event", Value::String(event.into()))
        .attr("target", Value::String(target.into()))
}

/// `<invoke src>`
pub fn invoke<M>(src: impl Into<String>) -> Element<M> {
    Element::new(Builtin::Invoke).attr("src", Value::String(src.into()))
}

pub fn on_done<M>() -> Element<M> {
    Element::new(Builtin::OnDone)
}

pub fn on_error<M>() -> Element<M> {
    Element::new(Builtin::OnError)
}

/// An element backed by a user component.
pub fn component<M, F>(component: F) -> Element<M>
where
    F: Fn(Props) -> Result<Output<M>, CompileError> + Send + Sync + 'static,
{
    Element::new(Tag::custom(component))
}
