//! Tag dispatch.
//!
//! [`Compiler::compile`] is the entry point for one node: given a tag, the
//! node's attributes and its already-compiled children, it routes to the
//! builtin mapper for the tag or hands everything to a user component.
//! Trees are compiled bottom-up, either by nesting `compile` calls or by
//! building an [`Element`] tree and calling [`Compiler::evaluate`].

pub mod error;
pub mod mappers;

pub use error::CompileError;

use crate::builder::{Element, Node};
use crate::core::{Attributes, Fragment};
use crate::enforcement::CompileConfig;
use crate::machine::{Blueprint, ImmutablePatch, MachineConstructor, PatchActionCreator};
use log::trace;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The builtin tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Machine,
    State,
    Transition,
    Invoke,
    OnDone,
    OnError,
}

impl Builtin {
    pub const ALL: [Builtin; 6] = [
        Builtin::Machine,
        Builtin::State,
        Builtin::Transition,
        Builtin::Invoke,
        Builtin::OnDone,
        Builtin::OnError,
    ];

    /// The tag as written in markup.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::State => "state",
            Self::Transition => "transition",
            Self::Invoke => "invoke",
            Self::OnDone => "on-done",
            Self::OnError => "on-error",
        }
    }
}

impl FromStr for Builtin {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.name() == s)
            .ok_or_else(|| CompileError::UnrecognizedTag(s.to_string()))
    }
}

/// What a component receives: its attributes plus its compiled children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub attributes: Attributes,
    pub children: Vec<Fragment>,
}

/// User-defined tag layered over the builtins.
pub type Component<M> = Arc<dyn Fn(Props) -> Result<Output<M>, CompileError> + Send + Sync>;

/// A tag: one of the builtins or a user component.
pub enum Tag<M> {
    Builtin(Builtin),
    Custom(Component<M>),
}

impl<M> Tag<M> {
    pub fn custom<F>(component: F) -> Self
    where
        F: Fn(Props) -> Result<Output<M>, CompileError> + Send + Sync + 'static,
    {
        Tag::Custom(Arc::new(component))
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Builtin(builtin) => builtin.name(),
            Tag::Custom(_) => "component",
        }
    }
}

impl<M> Clone for Tag<M> {
    fn clone(&self) -> Self {
        match self {
            Tag::Builtin(builtin) => Tag::Builtin(*builtin),
            Tag::Custom(component) => Tag::Custom(Arc::clone(component)),
        }
    }
}

impl<M> fmt::Debug for Tag<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Tag::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<M> From<Builtin> for Tag<M> {
    fn from(builtin: Builtin) -> Self {
        Tag::Builtin(builtin)
    }
}

impl<M> FromStr for Tag<M> {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Tag::Builtin)
    }
}

/// Result of compiling one node.
#[derive(Clone, Debug, PartialEq)]
pub enum Output<M> {
    Fragment(Fragment),
    Machine(M),
}

impl<M> Output<M> {
    pub fn into_fragment(self) -> Option<Fragment> {
        match self {
            Output::Fragment(fragment) => Some(fragment),
            Output::Machine(_) => None,
        }
    }

    pub fn into_machine(self) -> Option<M> {
        match self {
            Output::Machine(machine) => Some(machine),
            Output::Fragment(_) => None,
        }
    }
}

/// Compiles markup nodes, ending in a call to the machine constructor.
pub struct Compiler<C> {
    constructor: C,
    patcher: Arc<dyn PatchActionCreator>,
    config: CompileConfig,
}

impl Compiler<Blueprint> {
    /// A compiler whose machines are the compiled config/options pairs.
    pub fn blueprint() -> Self {
        Self::new(Blueprint)
    }
}

impl<C: MachineConstructor> Compiler<C> {
    pub fn new(constructor: C) -> Self {
        Self {
            constructor,
            patcher: Arc::new(ImmutablePatch),
            config: CompileConfig::default(),
        }
    }

    /// Use the runtime's own patch action creator for mutations.
    pub fn with_patcher<P>(mut self, patcher: P) -> Self
    where
        P: PatchActionCreator + 'static,
    {
        self.patcher = Arc::new(patcher);
        self
    }

    pub fn with_config(mut self, config: CompileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile one node whose children are already compiled.
    pub fn compile(
        &self,
        tag: Tag<C::Machine>,
        attributes: Attributes,
        children: Vec<Fragment>,
    ) -> Result<Output<C::Machine>, CompileError> {
        trace!("compiling <{}> with {} children", tag.name(), children.len());

        let builtin = match tag {
            Tag::Custom(component) => {
                return component(Props {
                    attributes,
                    children,
                })
            }
            Tag::Builtin(builtin) => builtin,
        };

        let policy = self.config.duplicates;
        let fragment = match builtin {
            Builtin::Machine => {
                let (config, options) =
                    mappers::machine(attributes, children, &self.patcher, policy)?;
                return Ok(Output::Machine(self.constructor.construct(config, options)));
            }
            Builtin::State => mappers::state(attributes, children, policy)?,
            Builtin::Transition => mappers::transition(attributes),
            Builtin::Invoke => mappers::invoke(attributes, children),
            Builtin::OnDone => mappers::on_done(attributes),
            Builtin::OnError => mappers::on_error(attributes),
        };

        Ok(Output::Fragment(fragment))
    }

    /// Compile a node tagged by name. Unknown names fail with
    /// [`CompileError::UnrecognizedTag`].
    pub fn compile_named(
        &self,
        tag: &str,
        attributes: Attributes,
        children: Vec<Fragment>,
    ) -> Result<Output<C::Machine>, CompileError> {
        let builtin: Builtin = tag.parse()?;
        self.compile(Tag::Builtin(builtin), attributes, children)
    }

    /// Compile a whole tree, children before parents.
    pub fn evaluate(&self, root: Element<C::Machine>) -> Result<Output<C::Machine>, CompileError> {
        let Element {
            tag,
            attributes,
            children,
        } = root;

        let children = children
            .into_iter()
            .map(|child| {
                let output = match child {
                    Node::Fragment(fragment) => return Ok(fragment),
                    Node::Element(element) => self.evaluate(element)?,
                };
                match output {
                    Output::Fragment(fragment) => Ok(fragment),
                    Output::Machine(_) => Err(CompileError::NestedMachine {
                        parent: tag.name().to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.compile(tag, attributes, children)
    }

    /// Compile a tree that must produce a machine.
    pub fn build(&self, root: Element<C::Machine>) -> Result<C::Machine, CompileError> {
        let tag = root.tag.name().to_string();
        self.evaluate(root)?
            .into_machine()
            .ok_or(CompileError::ExpectedMachine { tag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::builder::{component, machine, state};
    use crate::machine::{MachineBlueprint, MachineConfig, MachineOptions};
    use crate::options::OptionsRecord;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn builtin_names_parse() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.name().parse::<Builtin>().unwrap(), builtin);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let compiler = Compiler::blueprint();

        let result = compiler.compile_named("bogus", attrs! {"id" => "x"}, Vec::new());

        assert!(matches!(result, Err(CompileError::UnrecognizedTag(ref t)) if t == "bogus"));
        assert!("State".parse::<Tag<MachineBlueprint>>().is_err());
    }

    #[test]
    fn custom_tag_is_called_once_with_props() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let compiler = Compiler::blueprint();

        let tag = Tag::custom(|props: Props| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Output::Fragment(Fragment::Record(props.attributes)))
        });
        let children = vec![Fragment::Record(attrs! {"k" => 1})];

        let output = compiler
            .compile(tag, attrs! {"label" => "x"}, children)
            .unwrap();

        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(
            output,
            Output::Fragment(Fragment::Record(attrs! {"label" => "x"}))
        );
    }

    #[test]
    fn custom_tag_errors_propagate() {
        let compiler = Compiler::blueprint();
        let tag = Tag::custom(|_| Err(CompileError::ComponentFailed("nope".to_string())));

        assert!(matches!(
            compiler.compile(tag, Attributes::new(), Vec::new()),
            Err(CompileError::ComponentFailed(_))
        ));
    }

    #[test]
    fn machine_goes_through_constructor() {
        let compiler = Compiler::new(|config: MachineConfig, _options: MachineOptions| {
            config.id.unwrap_or_default()
        });

        let output = compiler
            .compile(Builtin::Machine.into(), attrs! {"id" => "light"}, Vec::new())
            .unwrap();

        assert_eq!(output.into_machine(), Some(json!("light")));
    }

    #[test]
    fn custom_patcher_wraps_mutations() {
        let compiler = Compiler::blueprint().with_patcher(|patch: Value| json!({ "custom": patch }));
        let options = OptionsRecord::new().mutation("set", |_| json!({"a": 1}));

        let blueprint = compiler
            .compile(
                Builtin::Machine.into(),
                Attributes::new(),
                vec![Fragment::Options(options)],
            )
            .unwrap()
            .into_machine()
            .unwrap();

        assert_eq!(
            blueprint.options.actions["set"].call(&[]),
            json!({"custom": {"a": 1}})
        );
    }

    #[test]
    fn component_can_supply_leading_options() {
        let compiler = Compiler::blueprint();
        let shared = component(|_props: Props| {
            Ok(Output::Fragment(Fragment::Options(
                OptionsRecord::new()
                    .context(json!({"theme": "dark"}))
                    .guard("ready", |_| json!(true)),
            )))
        });

        let blueprint = compiler
            .build(machine("m", "a").child(shared).child(state("a")))
            .unwrap();

        assert_eq!(blueprint.config.context, json!({"theme": "dark"}));
        assert!(blueprint.options.guards.contains_key("ready"));
        assert_eq!(blueprint.config.states.unwrap().len(), 1);
    }
}
