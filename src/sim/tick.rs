//! Per-frame simulation tick
//!
//! The single entry point the frame driver calls: samples input, advances the
//! mode state machine, runs the collision pass and car updates, and evaluates
//! the race outcome. `tick` is the sole mutator of [`GameState`].

use crate::consts::*;
use crate::input::{InputState, Key};

use super::collision::{cars_collide, collect_coins};
use super::state::{Difficulty, GameMode, GameState};

/// Advance the game by one frame. `dt` is wall-clock seconds since the last
/// frame; it is clamped to [`MAX_FRAME_DT`] so a stall never produces a huge
/// integration step.
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);
    state.time_ticks += 1;

    // Day/night is render-only and orthogonal to the state machine
    if input.was_pressed(Key::Night) {
        state.night_mode = !state.night_mode;
        log::debug!("night mode {}", if state.night_mode { "on" } else { "off" });
    }

    if state.mode == GameMode::GameComplete {
        tick_game_complete(state, input, dt);
        return;
    }

    // Unconditional restart from any other state
    if input.was_pressed(Key::Restart) {
        state.start_race(state.total_laps);
        return;
    }

    match state.mode {
        GameMode::Menu => {
            if input.was_pressed(Key::Start) {
                state.start_race(1);
            } else if input.was_pressed(Key::CustomMenu) {
                state.mode = GameMode::CustomRaceMenu;
            } else if input.was_pressed(Key::Cancel) {
                log::info!("quit requested from menu");
                state.quit_requested = true;
            }
        }

        GameMode::CustomRaceMenu => {
            if input.was_pressed(Key::LapsShort) {
                state.settings.laps = 1;
            }
            if input.was_pressed(Key::LapsMedium) {
                state.settings.laps = 3;
            }
            if input.was_pressed(Key::LapsLong) {
                state.settings.laps = 5;
            }
            if input.was_pressed(Key::DifficultyEasy) {
                state.settings.difficulty = Difficulty::Easy;
            }
            if input.was_pressed(Key::DifficultyMedium) {
                state.settings.difficulty = Difficulty::Medium;
            }
            if input.was_pressed(Key::DifficultyHard) {
                state.settings.difficulty = Difficulty::Hard;
            }

            if input.was_pressed(Key::Start) {
                let laps = state.settings.laps;
                state.start_race(laps);
            } else if input.was_pressed(Key::Cancel) {
                state.mode = GameMode::Menu;
            }
        }

        GameMode::Racing => {
            if input.was_pressed(Key::Pause) {
                state.mode = GameMode::Paused;
            } else if input.was_pressed(Key::Cancel) {
                state.mode = GameMode::Menu;
            } else {
                if input.was_pressed(Key::Camera) {
                    state.first_person = !state.first_person;
                }
                run_race_tick(state, input, dt);
            }
        }

        GameMode::Paused => {
            if input.was_pressed(Key::Pause) {
                state.mode = GameMode::Racing;
            } else if input.was_pressed(Key::Cancel) {
                state.mode = GameMode::Menu;
            }
        }

        GameMode::Finished => {
            if input.was_pressed(Key::Cancel) {
                state.mode = GameMode::Menu;
            }
        }

        // Handled before the match
        GameMode::GameComplete => {}
    }
}

/// Game Complete screen: the auto-restart timer or an explicit Start
/// acknowledge perform the full new-game reset; any other key returns to the
/// menu with session counters intact.
fn tick_game_complete(state: &mut GameState, input: &InputState, dt: f32) {
    state.complete_elapsed += dt;

    if state.complete_elapsed >= AUTO_RESTART_SECONDS || input.was_pressed(Key::Start) {
        state.reset_to_new_game();
        return;
    }

    let other_key = Key::ALL
        .iter()
        .any(|&k| k != Key::Night && k != Key::Start && input.was_pressed(k));
    if other_key {
        state.complete_elapsed = 0.0;
        state.mode = GameMode::Menu;
    }
}

/// One tick of active racing: player controls, collision pass, car updates,
/// coin collection, outcome evaluation.
fn run_race_tick(state: &mut GameState, input: &InputState, dt: f32) {
    state.race_elapsed += dt;

    // Player controls from held key state
    let steer_left = input.is_held(Key::SteerLeft);
    let steer_right = input.is_held(Key::SteerRight);
    let player = state.player_mut();
    if input.is_held(Key::Throttle) {
        player.accelerate();
    }
    if input.is_held(Key::Brake) {
        player.brake();
    }
    if steer_left {
        player.steer_left();
    }
    if steer_right {
        player.steer_right();
    }
    if !steer_left && !steer_right {
        player.center_rotation();
    }

    // Pairwise collision pass over non-crashed cars. A player crash ends the
    // race immediately and skips the rest of the tick.
    for i in 0..state.cars.len() {
        for j in (i + 1)..state.cars.len() {
            if state.cars[i].crashed || state.cars[j].crashed {
                continue;
            }
            if cars_collide(&state.cars[i], &state.cars[j]) {
                state.cars[i].crashed = true;
                state.cars[j].crashed = true;
                log::info!("cars {i} and {j} collided");
                if state.cars[i].is_player || state.cars[j].is_player {
                    state.mode = GameMode::Finished;
                    return;
                }
            }
        }
    }

    let total_laps = state.total_laps;
    let race_elapsed = state.race_elapsed;
    let difficulty = state.settings.difficulty;
    let level = state.level;

    let newly_collected;
    {
        let GameState {
            cars, track, rng, ai, ..
        } = state;

        // Player: kinematics then coin pickup (after position integration)
        cars[0].update(dt, track, total_laps, race_elapsed, rng);
        newly_collected = collect_coins(&cars[0], &mut track.coins);

        // AI cars share the same kinematics update; crashed or finished cars
        // are skipped entirely
        for (i, car) in cars.iter_mut().enumerate().skip(1) {
            if car.finished || car.crashed {
                continue;
            }
            ai.drive(i - 1, car, difficulty, level);
            car.update(dt, track, total_laps, race_elapsed, rng);
        }
    }
    state.coins_collected += newly_collected;

    if !state.player().finished {
        state.current_lap = state.player().laps_completed + 1;
    }

    if state.player().finished {
        evaluate_race_outcome(state);
    }
}

/// The player wins iff no finished, non-crashed AI car recorded a strictly
/// lower race time. A win advances the level; past the last level the session
/// enters Game Complete.
fn evaluate_race_outcome(state: &mut GameState) {
    let player_time = state.player().race_time;
    let beaten = state
        .ai_cars()
        .iter()
        .any(|c| c.finished && !c.crashed && c.race_time < player_time);

    if !beaten {
        state.races_won += 1;
        state.level += 1;
        log::info!("race won in {player_time:.2}s, advancing to level {}", state.level);

        if state.level > MAX_LEVEL {
            // Display clamps at the last level while the complete screen shows
            state.level = MAX_LEVEL;
            state.complete_elapsed = 0.0;
            state.mode = GameMode::GameComplete;
            log::info!("all levels complete");
            return;
        }
    } else {
        log::info!("race lost, player time {player_time:.2}s");
    }

    state.mode = GameMode::Finished;
}
