//! Headless demo host
//!
//! Plays the role the real host engine would: a fixed 120 Hz timer, keyboard
//! chatter routed through the key bindings, and a channel as the score sink.
//! Runs a scripted rally for a few simulated seconds and prints the tally.

use std::sync::mpsc;

use duel_pong::consts::SIM_DT;
use duel_pong::KeyBindings;
use duel_pong::sim::{InputEvent, MatchSimulator, PlayerSide};

/// Scripted keyboard chatter: (frame, key, pressed)
const SCRIPT: &[(u64, char, bool)] = &[
    (30, 'q', true),
    (60, 'l', true),
    (90, 'q', false),
    (120, 'a', true),
    (200, 'l', false),
    (240, 'a', false),
    (260, 'p', true),
    (400, 'p', false),
    (500, 'q', true),
    (700, 'q', false),
    (720, 'l', true),
    (900, 'l', false),
];

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xD0E1);
    let frames: u64 = 120 * 30; // 30 simulated seconds

    let bindings = KeyBindings::default();
    let (tx, rx) = mpsc::channel();
    let mut sim = MatchSimulator::new(seed, move |event| {
        // The sink must not fail the tick; a closed channel just drops events
        let _ = tx.send(event);
    });

    log::info!("match start: seed={seed}, {frames} frames at 120 Hz");

    let mut left_points = 0u32;
    let mut right_points = 0u32;

    for frame in 0..frames {
        // Keyboard events arrive between ticks, exactly like a host queueing
        // key_down/key_up callbacks to the frame boundary
        for &(at, key, pressed) in SCRIPT {
            if at != frame {
                continue;
            }
            if let Some(control) = bindings.control_for(key) {
                sim.apply_input(if pressed {
                    InputEvent::Pressed(control)
                } else {
                    InputEvent::Released(control)
                });
            }
        }

        sim.tick(SIM_DT);

        // Drain this frame's score events, as a host would before rendering
        for event in rx.try_iter() {
            match event.scorer() {
                PlayerSide::Left => left_points += 1,
                PlayerSide::Right => right_points += 1,
            }
        }
    }

    let ball = sim.ball();
    log::info!(
        "match end: ball at ({:.3}, {:.3}), paddles at {:.3}/{:.3}",
        ball.pos.x,
        ball.pos.y,
        sim.paddle(PlayerSide::Left).pos.y,
        sim.paddle(PlayerSide::Right).pos.y,
    );
    println!("final score: left {left_points} - right {right_points}");
}
