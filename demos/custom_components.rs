//! Custom Components
//!
//! This example layers user-defined tags over the builtins and shows the
//! duplicate policies.
//!
//! Key concepts:
//! - A component receives its attributes and compiled children
//! - Components may compile builtins themselves
//! - `DuplicatePolicy::Reject` reports every sibling collision at once
//!
//! Run with: cargo run --example custom_components

use serde_json::Value;
use statechart_markup::builder::{component, machine, state, transition};
use statechart_markup::compiler::{Builtin, CompileError, Compiler, Output, Props};
use statechart_markup::enforcement::{CompileConfig, DuplicatePolicy};
use statechart_markup::{attrs, Fragment, MachineBlueprint};

/// `<toggle id on off>`: a compound state flipping between two children.
fn toggle(props: Props) -> Result<Output<MachineBlueprint>, CompileError> {
    let compiler = Compiler::blueprint();
    let get = |key: &str| props.attributes.get(key).cloned().unwrap_or_default();
    let (on, off) = (get("on"), get("off"));

    let leaf = |id: &Value, target: &Value| -> Result<Output<MachineBlueprint>, CompileError> {
        let flip = compiler
            .compile_named("transition", attrs! {"event" => "TOGGLE", "target" => target.clone()}, vec![])?
            .into_fragment();
        compiler.compile_named("state", attrs! {"id" => id.clone()}, flip.into_iter().collect())
    };

    let children: Vec<Fragment> = [leaf(&off, &on)?, leaf(&on, &off)?]
        .into_iter()
        .filter_map(Output::into_fragment)
        .collect();

    compiler.compile(
        Builtin::State.into(),
        attrs! {"id" => get("id"), "initial" => off},
        children,
    )
}

fn main() {
    println!("=== Custom Components ===\n");

    let markup = machine("switchboard", "lamp")
        .child(component(toggle).attrs(attrs! {"id" => "lamp", "on" => "lit", "off" => "dark"}))
        .child(state("fan").child(transition("POWER", "lamp")));

    let blueprint = Compiler::blueprint().build(markup).unwrap();
    let lamp_states: Vec<&String> = blueprint
        .config
        .state(&["lamp"])
        .and_then(|lamp| lamp.states.as_ref())
        .map(|states| states.keys().collect())
        .unwrap_or_default();
    println!("Lamp states: {:?}", lamp_states);
    println!(
        "dark --TOGGLE--> {}\n",
        blueprint.config.to_json()["states"]["lamp"]["states"]["dark"]["on"]["TOGGLE"]["target"]
    );

    println!("Duplicate siblings under each policy:");
    for policy in [DuplicatePolicy::Permissive, DuplicatePolicy::Warn, DuplicatePolicy::Reject] {
        let compiler = Compiler::blueprint().with_config(CompileConfig::new().duplicates(policy));
        let markup = machine("m", "a")
            .child(state("a").child(transition("GO", "b")).child(transition("GO", "c")))
            .child(state("a"));

        match compiler.build(markup) {
            Ok(blueprint) => println!(
                "  {:?}: compiled, a.on = {}",
                policy,
                blueprint.config.to_json()["states"]["a"]["on"]
            ),
            Err(error) => println!("  {:?}: {}", policy, error),
        }
    }

    println!("\n=== Example Complete ===");
}
