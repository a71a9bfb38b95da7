//! Traffic Light State Machine
//!
//! This example demonstrates a flat cyclic machine.
//!
//! Key concepts:
//! - Handlers naming their target state by id
//! - Entry hooks reacting to each switch
//! - Transition history
//!
//! Run with: cargo run --example traffic_light

use statenest::{Handler, State, StateMachine};

fn light(id: &'static str, next: &'static str, meaning: &'static str) -> State {
    State::builder(id)
        .on("tick", Handler::to(next))
        .on_entry(move |ctx| {
            let from = ctx.from().map_or("<off>", State::id);
            println!("  {from:>6} -> {id:<6} ({meaning})");
        })
        .build()
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let machine = StateMachine::builder()
        .label("traffic-light")
        .state(light("Red", "Green", "Stop"))
        .state(light("Green", "Yellow", "Go!"))
        .state(light("Yellow", "Red", "Caution"))
        .build()
        .unwrap();

    println!("Transition sequence:");
    machine.init(None);
    for _ in 0..4 {
        machine.emit("tick", ());
    }

    println!("\nCurrent state: {:?}", machine.current_id());
    println!("Path: {:?}", machine.history().get_path());

    println!("\nKey Characteristics:");
    println!("- No final state (cycles indefinitely)");
    println!("- Unknown events are ignored");

    machine.emit("honk", ());
    println!("\nAfter 'honk': {:?}", machine.current_id());

    println!("\n=== Example Complete ===");
}
