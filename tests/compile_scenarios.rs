//! End-to-end compilation of markup trees.
//!
//! Trees are built the way a markup front-end would emit them: nested
//! `compile_named` calls, innermost first.

use serde_json::{json, Value};
use statechart_markup::attrs;
use statechart_markup::builder::{component, invoke, machine, on_done, state, transition};
use statechart_markup::compiler::{CompileError, Compiler, Output, Props, Tag};
use statechart_markup::core::{has_child_states, infer_kind, Attributes, Fragment, StateKind};
use statechart_markup::enforcement::{CompileConfig, DuplicatePolicy, StructureViolation};
use statechart_markup::machine::{MachineBlueprint, MachineConfig, MachineOptions};
use statechart_markup::options::OptionsRecord;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn compile(
    compiler: &Compiler<statechart_markup::Blueprint>,
    tag: &str,
    attributes: Attributes,
    children: Vec<Fragment>,
) -> Fragment {
    compiler
        .compile_named(tag, attributes, children)
        .unwrap()
        .into_fragment()
        .unwrap()
}

fn to_json(fragment: &Fragment) -> Value {
    serde_json::to_value(fragment.as_state().unwrap()).unwrap()
}

#[test]
fn state_with_one_transition() {
    init_logging();
    let c = Compiler::blueprint();

    let fragment = compile(
        &c,
        "state",
        attrs! {"id" => "idle"},
        vec![compile(
            &c,
            "transition",
            attrs! {"event" => "START", "target" => "running"},
            vec![],
        )],
    );

    let node = fragment.as_state().unwrap();
    assert_eq!(node.id.as_deref(), Some("idle"));
    assert_eq!(node.entry, None);
    assert_eq!(node.exit, None);
    assert_eq!(to_json(&fragment), json!({"on": {"START": {"target": "running"}}}));
}

#[test]
fn invoke_with_done_and_error_handlers() {
    init_logging();
    let c = Compiler::blueprint();

    let fragment = compile(
        &c,
        "invoke",
        attrs! {"src" => "fetchData"},
        vec![
            compile(&c, "on-done", attrs! {"target" => "success"}, vec![]),
            compile(&c, "on-error", attrs! {"target" => "failure"}, vec![]),
        ],
    );

    assert_eq!(
        Value::Object(fragment.as_invoke().unwrap().config.clone()),
        json!({
            "src": "fetchData",
            "onDone": {"target": "success"},
            "onError": {"target": "failure"}
        })
    );
}

#[test]
fn machine_without_options_child() {
    init_logging();
    let c = Compiler::blueprint();

    let idle = compile(&c, "state", attrs! {"id" => "idle"}, vec![]);
    let running = compile(&c, "state", attrs! {"id" => "running"}, vec![]);

    let blueprint = c
        .compile_named("machine", attrs! {"id" => "m", "initial" => "idle"}, vec![idle, running])
        .unwrap()
        .into_machine()
        .unwrap();

    let states = blueprint.config.states.as_ref().unwrap();
    assert_eq!(states.keys().collect::<Vec<_>>(), vec!["idle", "running"]);
    assert_eq!(blueprint.config.context, json!({}));
    assert_eq!(
        blueprint.config.to_json(),
        json!({
            "id": "m",
            "context": {},
            "initial": "idle",
            "states": {"idle": {}, "running": {}}
        })
    );
}

#[test]
fn state_without_transitions_has_no_table() {
    let c = Compiler::blueprint();

    let fragment = compile(
        &c,
        "state",
        attrs! {"id" => "s", "on-entry" => "enter"},
        vec![compile(&c, "state", attrs! {"id" => "child"}, vec![])],
    );

    let node = fragment.as_state().unwrap();
    assert!(node.on.is_none());
    assert_eq!(to_json(&fragment), json!({"entry": "enter", "states": {"child": {}}}));
}

#[test]
fn later_transition_overrides_earlier_for_same_event() {
    let c = Compiler::blueprint();

    let fragment = compile(
        &c,
        "state",
        attrs! {"id" => "s"},
        vec![
            compile(&c, "transition", attrs! {"event" => "START", "target" => "a"}, vec![]),
            compile(
                &c,
                "transition",
                attrs! {"event" => "START", "target" => "b", "cond" => "ready"},
                vec![],
            ),
        ],
    );

    assert_eq!(
        to_json(&fragment)["on"]["START"],
        json!({"target": "b", "cond": "ready"})
    );
}

#[test]
fn only_first_invoke_is_merged() {
    let c = Compiler::blueprint();

    let fragment = compile(
        &c,
        "state",
        attrs! {"id" => "s"},
        vec![
            compile(&c, "invoke", attrs! {"src" => "first"}, vec![]),
            compile(&c, "invoke", attrs! {"src" => "second"}, vec![]),
        ],
    );

    assert_eq!(to_json(&fragment), json!({"invoke": {"src": "first"}}));
}

#[test]
fn unrecognized_tag_fails_regardless_of_input() {
    let c = Compiler::blueprint();
    let child = compile(&c, "state", attrs! {"id" => "a"}, vec![]);

    for (attributes, children) in [
        (attrs! {}, vec![]),
        (attrs! {"id" => "x", "initial" => "a"}, vec![child]),
    ] {
        let result = c.compile_named("bogus", attributes, children);
        assert!(matches!(result, Err(CompileError::UnrecognizedTag(ref t)) if t == "bogus"));
    }
}

#[test]
fn custom_tag_is_pure_delegation() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let c = Compiler::blueprint();

    let child = compile(&c, "transition", attrs! {"event" => "GO", "target" => "x"}, vec![]);
    let expected_children = vec![child.clone()];

    let tag = Tag::custom(move |props: Props| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        assert_eq!(props.attributes, attrs! {"label" => "hello"});
        assert_eq!(props.children, expected_children);
        Ok(Output::Fragment(Fragment::Record(attrs! {"sentinel" => true})))
    });

    let output = c.compile(tag, attrs! {"label" => "hello"}, vec![child]).unwrap();

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(
        output,
        Output::Fragment(Fragment::Record(attrs! {"sentinel" => true}))
    );
}

#[test]
fn composite_component_builds_on_builtins() {
    let toggle = |props: Props| {
        let id = props.attributes.get("id").cloned().unwrap_or(json!("toggle"));
        let c = Compiler::blueprint();
        let on = compile(&c, "transition", attrs! {"event" => "TOGGLE", "target" => "on"}, vec![]);
        let off = compile(&c, "transition", attrs! {"event" => "TOGGLE", "target" => "off"}, vec![]);
        let mut children = vec![
            compile(&c, "state", attrs! {"id" => "off"}, vec![on]),
            compile(&c, "state", attrs! {"id" => "on"}, vec![off]),
        ];
        children.extend(props.children);
        c.compile_named("state", attrs! {"id" => id, "initial" => "off"}, children)
    };

    let blueprint = Compiler::blueprint()
        .build(
            machine("switch", "light")
                .child(component(toggle).attr("id", "light"))
                .child(state("broken")),
        )
        .unwrap();

    let light = blueprint.config.state(&["light"]).unwrap();
    assert_eq!(infer_kind(light), Some(StateKind::Compound));
    assert!(has_child_states(light));
    assert_eq!(
        blueprint.config.to_json()["states"]["light"],
        json!({
            "states": {
                "off": {"on": {"TOGGLE": {"target": "on"}}},
                "on": {"on": {"TOGGLE": {"target": "off"}}}
            },
            "initial": "off"
        })
    );
}

#[test]
fn options_feed_context_and_machine_options() {
    init_logging();
    let options = OptionsRecord::new()
        .context(json!({"count": 0}))
        .action("log", |_| json!("logged"))
        .mutation("increment", |args| {
            json!({"count": args.first().and_then(Value::as_i64).unwrap_or(0) + 1})
        })
        .guard("canIncrement", |_| json!(true))
        .service("fetchData", |_| json!("promise"))
        .activity("beep", |_| Value::Null)
        .config(attrs! {"predictableActionArguments" => true});

    let blueprint = Compiler::blueprint()
        .build(
            machine("counter", "active")
                .options(options)
                .child(state("active").child(
                    transition("INC", "active").attr("actions", "increment"),
                )),
        )
        .unwrap();

    let config = &blueprint.config;
    assert_eq!(config.context, json!({"count": 0}));
    assert_eq!(config.extra["predictableActionArguments"], json!(true));

    let opts = &blueprint.options;
    assert_eq!(
        opts.actions.keys().collect::<Vec<_>>(),
        vec!["log", "increment"]
    );
    assert_eq!(
        opts.actions["increment"].call(&[json!(4)]),
        json!({"type": "assign", "patch": {"count": 5}})
    );
    assert!(opts.guards.contains_key("canIncrement"));
    assert!(opts.services.contains_key("fetchData"));
    assert!(opts.activities.contains_key("beep"));
    assert!(opts.delays.is_empty());
}

#[test]
fn constructor_receives_config_and_options() {
    let compiler = Compiler::new(|config: MachineConfig, options: MachineOptions| {
        format!(
            "{}:{}:{}",
            config.id.unwrap_or_default(),
            config.states.map_or(0, |s| s.len()),
            options.actions.len()
        )
    });

    let summary = compiler
        .build(machine("m", "a").child(state("a")).child(state("b")))
        .unwrap();

    assert_eq!(summary, "\"m\":2:0");
}

#[test]
fn reject_policy_surfaces_every_collision() {
    let compiler = Compiler::blueprint()
        .with_config(CompileConfig::new().duplicates(DuplicatePolicy::Reject));

    let tree = machine("m", "a").child(
        state("a")
            .child(transition("GO", "b"))
            .child(transition("GO", "c"))
            .child(invoke("one"))
            .child(invoke("two")),
    );

    match compiler.build(tree) {
        Err(CompileError::AmbiguousStructure(violations)) => {
            assert_eq!(violations.len(), 2);
            assert!(violations.contains(&StructureViolation::DuplicateEvent {
                event: "GO".to_string(),
                count: 2
            }));
            assert!(violations.contains(&StructureViolation::MultipleInvokes { count: 2 }));
        }
        other => panic!("Expected ambiguous structure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn reject_policy_checks_machine_level_ids() {
    let compiler = Compiler::blueprint()
        .with_config(CompileConfig::new().duplicates(DuplicatePolicy::Reject));

    let result = compiler.build(machine("m", "a").child(state("a")).child(state("a")));

    assert!(matches!(result, Err(CompileError::AmbiguousStructure(_))));
}

#[test]
fn permissive_policy_keeps_fold_semantics() {
    let compiler = Compiler::blueprint()
        .with_config(CompileConfig::new().duplicates(DuplicatePolicy::Warn));

    let blueprint = compiler
        .build(
            machine("m", "a")
                .child(state("a").attr("on-entry", "first"))
                .child(state("a").attr("on-entry", "second")),
        )
        .unwrap();

    let states = blueprint.config.states.unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states["a"].entry, Some(json!("second")));
}

#[test]
fn deep_nesting_is_addressable() {
    let blueprint: MachineBlueprint = Compiler::blueprint()
        .build(
            machine("deep", "l1").child(
                state("l1")
                    .attr("initial", "l2")
                    .child(state("l2").attr("initial", "l3").child(state("l3").attr("type", "final"))),
            ),
        )
        .unwrap();

    let leaf = blueprint.config.state(&["l1", "l2", "l3"]).unwrap();
    assert_eq!(infer_kind(leaf), Some(StateKind::Final));
    assert_eq!(
        infer_kind(blueprint.config.state(&["l1"]).unwrap()),
        Some(StateKind::Compound)
    );
}

#[test]
fn recompiling_is_idempotent() {
    let build = || {
        Compiler::blueprint()
            .build(
                machine("m", "idle")
                    .child(state("idle").child(transition("GO", "busy")))
                    .child(state("busy").child(invoke("work").child(on_done().attr("target", "idle")))),
            )
            .unwrap()
            .config
    };

    assert_eq!(build(), build());
    assert_eq!(build().to_json(), build().to_json());
}
