//! Fetching With Options
//!
//! This example shows a machine whose first child is an options record,
//! an invoked service with done/error handlers, and a custom machine
//! constructor standing in for a statechart runtime.
//!
//! Key concepts:
//! - Context, guards, services and delays supplied by name
//! - Mutations compiled into patch actions
//! - `invoke` with `on-done` / `on-error` children
//! - Any `Fn(MachineConfig, MachineOptions) -> M` is a constructor
//!
//! Run with: cargo run --example fetch_with_options

use serde_json::{json, Value};
use statechart_markup::builder::{invoke, machine, on_done, on_error, state, transition};
use statechart_markup::compiler::Compiler;
use statechart_markup::core::Implementation;
use statechart_markup::machine::{MachineConfig, MachineOptions};
use statechart_markup::options::OptionsRecord;

/// What a runtime might keep after construction.
struct Summary {
    id: Value,
    states: Vec<String>,
    actions: Vec<String>,
    services: Vec<String>,
}

fn main() {
    println!("=== Fetching With Options ===\n");

    let options = OptionsRecord::new()
        .context(json!({"retries": 0, "data": null}))
        .guard("canRetry", |args| {
            json!(args.first().and_then(|ctx| ctx["retries"].as_i64()).unwrap_or(0) < 3)
        })
        .mutation("countRetry", |args| {
            let retries = args.first().and_then(|ctx| ctx["retries"].as_i64()).unwrap_or(0);
            json!({"retries": retries + 1})
        })
        .service("fetchData", |_| json!({"status": "pending"}))
        .delay("backoff", Implementation::constant(json!(500)));

    let markup = machine("fetcher", "idle")
        .options(options)
        .child(state("idle").child(transition("FETCH", "loading")))
        .child(
            state("loading").child(
                invoke("fetchData")
                    .child(on_done().attr("target", "success"))
                    .child(
                        on_error()
                            .attr("target", "idle")
                            .attr("actions", "countRetry")
                            .attr("cond", "canRetry"),
                    ),
            ),
        )
        .child(state("success").attr("type", "final"));

    let compiler = Compiler::new(|config: MachineConfig, options: MachineOptions| Summary {
        id: config.id.clone().unwrap_or_default(),
        states: config.states.iter().flatten().map(|(id, _)| id.clone()).collect(),
        actions: options.actions.keys().cloned().collect(),
        services: options.services.keys().cloned().collect(),
    });

    let summary = compiler.build(markup).unwrap();
    println!("Constructed machine {}", summary.id);
    println!("  states:   {:?}", summary.states);
    println!("  actions:  {:?}", summary.actions);
    println!("  services: {:?}\n", summary.services);

    // The same markup compiled to a blueprint exposes the derived actions
    let blueprint = Compiler::blueprint()
        .build(
            machine("fetcher", "idle")
                .options(OptionsRecord::new().mutation("countRetry", |_| json!({"retries": 1})))
                .child(state("idle")),
        )
        .unwrap();

    println!("Derived patch action for countRetry:");
    println!("  {}", blueprint.options.actions["countRetry"].call(&[json!({"retries": 0})]));

    println!("\n=== Example Complete ===");
}
