//! Media Player State Machine
//!
//! This example demonstrates nested and parallel states.
//!
//! Key concepts:
//! - Parallel regions that all see every event
//! - A composite state whose child machine runs while it is active
//! - Guards over the event payload
//! - Follow-up events emitted from hooks
//! - Routing engine diagnostics into `tracing`
//!
//! Run with: cargo run --example media_player

use statenest::logger::{self, TracingLogger};
use statenest::{Guard, Handler, State, StateMachine};

#[derive(Debug, Default)]
struct Command {
    volume: u8,
}

fn main() {
    println!("=== Media Player State Machine ===\n");
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .init();
    logger::set_logger(TracingLogger);

    let track = StateMachine::builder()
        .label("track")
        .state(State::builder("Intro").on("next", Handler::to("Chorus")).build())
        .state(State::builder("Chorus").on("next", Handler::to("Outro")).build())
        .state(State::leaf("Outro"))
        .build()
        .unwrap();

    let playback = StateMachine::builder()
        .label("playback")
        .state(
            State::builder("Playing")
                .composite(track)
                .on("pause", Handler::to("Paused"))
                .build(),
        )
        .state(State::builder("Paused").on("pause", Handler::to("Playing")).build())
        .build()
        .unwrap();

    let audio = StateMachine::builder()
        .label("audio")
        .state(
            State::builder("Normal")
                .on(
                    "volume",
                    Handler::to("Loud").guard(Guard::on_data(|cmd: &Command| cmd.volume > 80)),
                )
                .build(),
        )
        .state(
            State::builder("Loud")
                .on(
                    "volume",
                    Handler::to("Normal").guard(Guard::on_data(|cmd: &Command| cmd.volume <= 80)),
                )
                .build(),
        )
        .build()
        .unwrap();

    let player = StateMachine::builder()
        .label("player")
        .state(State::builder("Stopped").on("play", Handler::to("Active")).build())
        .state(
            State::builder("Active")
                .parallel(vec![playback, audio])
                .on("eject", Handler::to("Ejecting"))
                .build(),
        )
        .state(
            State::builder("Ejecting")
                .on("reset", Handler::to("Stopped"))
                .on_entry(|ctx| {
                    println!("  ejecting, reset queued behind the current event");
                    ctx.emit("reset", Command::default());
                })
                .build(),
        )
        .build()
        .unwrap();

    player.init(None);
    println!("Initial: {:?}", player.configuration().leaves());

    player.emit("play", Command::default());
    println!("After play: {:?}", player.configuration().leaves());

    player.emit("next", Command::default());
    println!("After next: {:?}", player.configuration().leaves());

    player.emit("volume", Command { volume: 95 });
    println!("After volume 95: {:?}", player.configuration().leaves());

    // Only the playback region handles "pause"; the audio region ignores it.
    player.emit("pause", Command::default());
    println!("After pause: {:?}", player.configuration().leaves());

    println!("\nSnapshot:");
    match player.configuration().to_json() {
        Ok(json) => println!("  {json}"),
        Err(err) => println!("  failed to serialize: {err}"),
    }

    player.emit("eject", Command::default());
    println!("\nAfter eject: {:?}", player.configuration().leaves());

    println!("\n=== Example Complete ===");
}
