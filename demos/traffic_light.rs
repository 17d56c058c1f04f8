//! Traffic Light Markup
//!
//! This example compiles a cyclic traffic light written as nested markup
//! into a machine configuration.
//!
//! Key concepts:
//! - One builder function per tag (`machine`, `state`, `transition`)
//! - Children compile before their parents
//! - The `Blueprint` constructor returns the compiled config and options
//!
//! Run with: cargo run --example traffic_light

use statechart_markup::builder::{machine, state, transition};
use statechart_markup::compiler::Compiler;

fn main() {
    println!("=== Traffic Light Markup ===\n");

    let markup = machine("light", "red")
        .child(state("red").child(transition("TIMER", "green")))
        .child(state("green").child(transition("TIMER", "yellow")))
        .child(state("yellow").child(transition("TIMER", "red")));

    let blueprint = Compiler::blueprint().build(markup).unwrap();

    let text = |value: &Option<serde_json::Value>| {
        value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string()
    };

    println!("Machine id: {}", text(&blueprint.config.id));
    println!("Initial state: {}\n", text(&blueprint.config.initial));

    println!("Transition table:");
    for (id, node) in blueprint.config.states.iter().flatten() {
        for (event, config) in node.on.iter().flatten() {
            println!("  {:<7} --{}--> {}", id, event, text(&config.target));
        }
    }

    println!("\nCompiled configuration:");
    println!(
        "{}",
        serde_json::to_string_pretty(&blueprint.config.to_json()).unwrap()
    );

    println!("\n=== Example Complete ===");
}
