//! Core fragment types.
//!
//! This module contains the values flowing through a compilation:
//! - Fragments produced by each tag, tagged with a routing discriminant
//! - State node categories and their inference
//! - Named implementations referenced from markup
//!
//! Everything here is plain data; compilation is a pure function of it.

mod fragment;
mod implementation;
mod kind;

pub(crate) use fragment::key_of;
pub use fragment::{Attributes, Fragment, InvokeNode, StateNode, TransitionConfig, TransitionNode};
pub use implementation::{Implementation, Implementations};
pub use kind::{has_child_states, infer_kind, Discriminant, StateKind};
