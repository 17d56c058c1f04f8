//! Statechart Markup: compile nested markup into state machine configs
//!
//! State machines are authored as a tree of tagged nodes (`machine`,
//! `state`, `transition`, `invoke`, `on-done`, `on-error`) instead of nested
//! configuration literals. Each node compiles to a fragment once its
//! children have compiled; parents fold their children's fragments into
//! state maps, transition tables and invoke blocks. The `machine` node
//! assembles the final configuration and options and hands them to an
//! external machine constructor.
//!
//! # Core Concepts
//!
//! - **Fragments**: Tagged compilation results, one per node
//! - **Merges**: Ordered folds of sibling fragments into aggregates
//! - **Compiler**: Tag dispatch to builtin mappers or user components
//! - **Builder**: Value-returning constructors for markup trees
//!
//! # Example
//!
//! ```rust
//! use statechart_markup::builder::{invoke, machine, on_done, on_error, state, transition};
//! use statechart_markup::compiler::Compiler;
//! use statechart_markup::options::OptionsRecord;
//! use serde_json::json;
//!
//! let tree = machine("fetcher", "idle")
//!     .options(
//!         OptionsRecord::new()
//!             .context(json!({"retries": 0}))
//!             .mutation("retry", |_| json!({"retries": 1})),
//!     )
//!     .child(state("idle").child(transition("FETCH", "loading")))
//!     .child(
//!         state("loading").child(
//!             invoke("fetchData")
//!                 .child(on_done().attr("target", "success"))
//!                 .child(on_error().attr("target", "idle").attr("actions", "retry")),
//!         ),
//!     )
//!     .child(state("success").attr("type", "final"));
//!
//! let blueprint = Compiler::blueprint().build(tree).unwrap();
//!
//! assert_eq!(blueprint.config.context, json!({"retries": 0}));
//! assert_eq!(
//!     blueprint.config.to_json()["states"]["loading"]["invoke"]["onDone"],
//!     json!({"target": "success"})
//! );
//! assert!(blueprint.options.actions.contains_key("retry"));
//! ```

pub mod builder;
pub mod compiler;
pub mod core;
pub mod enforcement;
pub mod machine;
pub mod merge;
pub mod options;

pub use serde_json;

// Re-export commonly used types
pub use builder::{Element, Node};
pub use compiler::{Builtin, CompileError, Compiler, Output, Props, Tag};
pub use self::core::{Attributes, Discriminant, Fragment, Implementation, StateKind, StateNode};
pub use enforcement::{CompileConfig, DuplicatePolicy};
pub use machine::{
    Blueprint, MachineBlueprint, MachineConfig, MachineConstructor, MachineOptions,
    PatchActionCreator,
};
pub use options::OptionsRecord;
