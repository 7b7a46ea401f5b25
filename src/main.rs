//! Highway Dash headless frame driver
//!
//! Demonstrates the core's calling contract: one `tick` per frame with a
//! clamped delta-time, edge-triggered input cleared after every tick, and the
//! read-only snapshot consumed between ticks. A windowed front end replaces
//! the scripted input and the log lines with real key events and rendering.

use highway_dash::consts::MAX_FRAME_DT;
use highway_dash::sim::{GameMode, GameState, tick};
use highway_dash::{InputState, Key};

use std::time::Instant;

/// Frames of scripted demo before the driver gives up
const MAX_FRAMES: u64 = 60 * 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xDA5B);
    log::info!("highway dash demo, seed {seed}");

    let mut state = GameState::new(seed);
    let mut input = InputState::new();

    // Script: start a race from the menu, hold the throttle, steer back
    // toward center when drifting wide.
    input.key_down(Key::Start);

    let mut last_frame = Instant::now();
    let mut last_report = 0u32;

    for frame in 0..MAX_FRAMES {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_DT);
        last_frame = now;

        tick(&mut state, &input, dt);
        input.end_tick();

        match state.mode {
            GameMode::Racing => {
                input.key_down(Key::Throttle);

                // Simple center-seeking steering for the demo driver
                let x = state.player().pos.x;
                if x > 30.0 {
                    input.key_down(Key::SteerLeft);
                    input.key_up(Key::SteerRight);
                } else if x < -30.0 {
                    input.key_down(Key::SteerRight);
                    input.key_up(Key::SteerLeft);
                } else {
                    input.key_up(Key::SteerLeft);
                    input.key_up(Key::SteerRight);
                }

                let snapshot = state.snapshot();
                let second = snapshot.hud.race_elapsed as u32;
                if second > last_report {
                    last_report = second;
                    log::info!(
                        "lap {}/{} pos {}/{} speed {} mph, {}m to go, {} coins",
                        snapshot.hud.current_lap,
                        snapshot.hud.total_laps,
                        snapshot.hud.position,
                        snapshot.hud.car_count,
                        snapshot.hud.speed_mph,
                        snapshot.hud.distance_remaining as u32,
                        snapshot.hud.coins,
                    );
                }
            }
            GameMode::Finished | GameMode::GameComplete => {
                let won = state.races_won > 0;
                log::info!(
                    "race over after {frame} frames: {} (player time {:.2}s, {} coins)",
                    if state.player().crashed {
                        "crashed"
                    } else if won {
                        "won"
                    } else {
                        "finished"
                    },
                    state.player().race_time,
                    state.coins_collected,
                );
                // Back out to the menu, then quit
                input.key_up(Key::Throttle);
                input.key_down(Key::Cancel);
            }
            GameMode::Menu => {
                if frame > 0 {
                    // Release first so the press registers a fresh edge
                    input.key_up(Key::Cancel);
                    input.key_down(Key::Cancel);
                }
            }
            _ => {}
        }

        if state.quit_requested {
            break;
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => log::debug!("final snapshot: {json}"),
        Err(err) => log::warn!("snapshot serialization failed: {err}"),
    }
    log::info!(
        "session end: level {}, {} races won, {} coins",
        state.level,
        state.races_won,
        state.coins_collected
    );
}
