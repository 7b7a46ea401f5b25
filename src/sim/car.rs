//! Car entity and per-tick kinematics
//!
//! One car, player or AI. Motion is explicit Euler integration with isotropic
//! air-resistance damping. Control primitives mutate velocity and rotation
//! only; position changes exclusively through [`Car::update`].

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::track::Track;
use crate::consts::*;

/// Per-car tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarTuning {
    /// Scalar speed cap enforced by [`Car::accelerate`]
    pub max_speed: f32,
    /// Forward velocity added per accelerate call
    pub acceleration: f32,
    /// Multiplicative velocity damping per brake call
    pub braking: f32,
    /// Lateral steering strength
    pub steering: f32,
}

impl CarTuning {
    pub fn player() -> Self {
        Self {
            max_speed: 18.0,
            acceleration: 1.2,
            braking: 0.8,
            steering: 3.0,
        }
    }

    pub fn ai() -> Self {
        Self {
            max_speed: 15.0,
            ..Self::player()
        }
    }
}

/// One vehicle. `x` is lateral (0 = road center), `y` is longitudinal
/// (0 = start line), `z` is fixed render height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub pos: Vec3,
    /// (lateral, longitudinal) velocity
    pub vel: Vec2,
    /// Heading in degrees, clamped to ±[`MAX_ROTATION`]
    pub rotation: f32,
    /// Always the Euclidean norm of `vel`, recomputed at the end of every
    /// update and never stored independently
    pub speed: f32,
    /// RGB body color for the renderer
    pub color: [f32; 3],
    pub is_player: bool,
    pub tuning: CarTuning,
    /// Terminal: once set the car is frozen and excluded from collisions
    pub crashed: bool,
    /// Set once when the lap target is reached
    pub finished: bool,
    pub laps_completed: u32,
    /// Simulated seconds from race start to finish, set with `finished`
    pub race_time: f32,
}

impl Car {
    pub fn new(pos: Vec3, color: [f32; 3], is_player: bool) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            speed: 0.0,
            color,
            is_player,
            tuning: if is_player {
                CarTuning::player()
            } else {
                CarTuning::ai()
            },
            crashed: false,
            finished: false,
            laps_completed: 0,
            race_time: 0.0,
        }
    }

    /// Reset to a start position for a new race. The only operation allowed
    /// to clear `crashed`/`finished`.
    pub fn reset_for_race(&mut self, pos: Vec3) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.speed = 0.0;
        self.crashed = false;
        self.finished = false;
        self.laps_completed = 0;
        self.race_time = 0.0;
    }

    /// Advance one tick: damping, integration, edge bounce, lap/finish.
    ///
    /// `race_elapsed` is the simulated time since race start, recorded as
    /// `race_time` if this update completes the final lap. A crashed car is
    /// frozen at its point of impact.
    pub fn update(
        &mut self,
        dt: f32,
        track: &Track,
        total_laps: u32,
        race_elapsed: f32,
        rng: &mut Pcg32,
    ) {
        if self.crashed {
            return;
        }

        self.vel *= AIR_RESISTANCE;
        self.pos.x += self.vel.x * dt * TIME_SCALE;
        self.pos.y += self.vel.y * dt * TIME_SCALE;

        // Edge bounce: clamp, invert and damp lateral velocity, halve speed.
        // The speed loss scales the whole velocity vector so that `speed`
        // stays the exact norm of `vel`.
        let edge = ROAD_WIDTH / 2.0 - EDGE_MARGIN;
        if self.pos.x.abs() > edge {
            self.pos.x = self.pos.x.clamp(-edge, edge);
            self.vel.x *= BOUNCE_DAMPING;
            self.vel *= BOUNCE_SPEED_LOSS;
        }

        self.speed = self.vel.length();

        if self.pos.y >= track.finish_line && !self.finished {
            self.laps_completed += 1;
            if self.laps_completed >= total_laps {
                self.finished = true;
                self.race_time = race_elapsed;
            } else if self.is_player {
                self.pos.y = LAP_RESET_Y;
            } else {
                self.pos.y = rng.random_range(AI_LAP_RESET_MIN_Y..AI_LAP_RESET_MAX_Y);
            }
        }
    }

    /// Add forward acceleration, capped at `max_speed`.
    pub fn accelerate(&mut self) {
        if !self.crashed && self.speed < self.tuning.max_speed {
            self.vel.y += self.tuning.acceleration;
        }
    }

    /// Multiplicatively damp both velocity components.
    pub fn brake(&mut self) {
        if !self.crashed && self.speed > MIN_BRAKE_SPEED {
            self.vel *= self.tuning.braking;
        }
    }

    /// Steer toward the left edge. No effect near standstill.
    pub fn steer_left(&mut self) {
        if !self.crashed && self.speed > MIN_STEER_SPEED {
            self.vel.x -= self.tuning.steering * STEER_VELOCITY_FACTOR;
            self.rotation = (self.rotation - STEER_ROTATION_STEP).max(-MAX_ROTATION);
        }
    }

    /// Steer toward the right edge. No effect near standstill.
    pub fn steer_right(&mut self) {
        if !self.crashed && self.speed > MIN_STEER_SPEED {
            self.vel.x += self.tuning.steering * STEER_VELOCITY_FACTOR;
            self.rotation = (self.rotation + STEER_ROTATION_STEP).min(MAX_ROTATION);
        }
    }

    /// Relax rotation toward zero; called when no steering key is held.
    pub fn center_rotation(&mut self) {
        if self.rotation > 0.0 {
            self.rotation = (self.rotation - CENTER_ROTATION_STEP).max(0.0);
        } else if self.rotation < 0.0 {
            self.rotation = (self.rotation + CENTER_ROTATION_STEP).min(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn test_track() -> Track {
        Track::for_level(1)
    }

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_speed_is_velocity_norm() {
        let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
        car.vel = Vec2::new(3.0, 4.0);
        car.update(DT, &test_track(), 1, 0.0, &mut test_rng());
        assert_eq!(car.speed, car.vel.length());
    }

    #[test]
    fn test_crashed_car_is_frozen() {
        let mut car = Car::new(Vec3::new(12.0, 345.0, 5.0), [0.0, 1.0, 0.0], false);
        car.vel = Vec2::new(2.0, 9.0);
        car.rotation = -7.0;
        car.crashed = true;

        let before = car.clone();
        for _ in 0..100 {
            car.update(DT, &test_track(), 3, 50.0, &mut test_rng());
        }
        assert_eq!(car, before);
    }

    #[test]
    fn test_edge_bounce_clamps_and_damps() {
        let mut car = Car::new(Vec3::new(190.0, 500.0, 5.0), [1.0, 0.0, 0.0], true);
        car.vel = Vec2::new(10.0, 10.0);
        car.update(DT, &test_track(), 1, 0.0, &mut test_rng());

        let edge = ROAD_WIDTH / 2.0 - EDGE_MARGIN;
        assert_eq!(car.pos.x, edge);
        // Lateral velocity inverted
        assert!(car.vel.x < 0.0);
        assert_eq!(car.speed, car.vel.length());
    }

    #[test]
    fn test_finish_crossing_single_lap() {
        let track = test_track();
        let mut car = Car::new(Vec3::new(0.0, track.finish_line - 1.0, 5.0), [1.0, 0.0, 0.0], true);
        car.vel = Vec2::new(0.0, 20.0);

        car.update(DT, &track, 1, 12.5, &mut test_rng());

        assert!(car.finished);
        assert_eq!(car.laps_completed, 1);
        assert_eq!(car.race_time, 12.5);
        // No reset-to-start once finished
        assert!(car.pos.y >= track.finish_line);
    }

    #[test]
    fn test_lap_reset_positions() {
        let track = test_track();

        let mut player = Car::new(Vec3::new(0.0, track.finish_line, 5.0), [1.0, 0.0, 0.0], true);
        player.vel = Vec2::new(0.0, 5.0);
        player.update(DT, &track, 3, 30.0, &mut test_rng());
        assert!(!player.finished);
        assert_eq!(player.laps_completed, 1);
        assert_eq!(player.pos.y, LAP_RESET_Y);

        let mut ai = Car::new(Vec3::new(0.0, track.finish_line, 5.0), [0.0, 1.0, 0.0], false);
        ai.vel = Vec2::new(0.0, 5.0);
        ai.update(DT, &track, 3, 30.0, &mut test_rng());
        assert!(!ai.finished);
        assert!(ai.pos.y >= AI_LAP_RESET_MIN_Y && ai.pos.y <= AI_LAP_RESET_MAX_Y);
    }

    #[test]
    fn test_accelerate_caps_at_max_speed() {
        let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
        for _ in 0..200 {
            car.accelerate();
            car.update(DT, &test_track(), 5, 0.0, &mut test_rng());
        }
        // One accelerate call past the cap is possible, never more
        assert!(car.speed < car.tuning.max_speed + car.tuning.acceleration);
    }

    #[test]
    fn test_steering_noop_near_standstill() {
        let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
        car.steer_left();
        assert_eq!(car.vel.x, 0.0);
        assert_eq!(car.rotation, 0.0);
    }

    #[test]
    fn test_rotation_clamped_and_recentered() {
        let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
        car.vel = Vec2::new(0.0, 10.0);
        car.speed = car.vel.length();
        for _ in 0..20 {
            car.steer_right();
        }
        assert_eq!(car.rotation, MAX_ROTATION);

        for _ in 0..100 {
            car.center_rotation();
        }
        assert_eq!(car.rotation, 0.0);
    }

    #[test]
    fn test_brake_noop_when_stopped() {
        let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
        car.brake();
        assert_eq!(car.vel, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_speed_matches_norm_after_update(
            x in -200.0f32..200.0,
            y in 0.0f32..4000.0,
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
        ) {
            let mut car = Car::new(Vec3::new(x, y, 5.0), [1.0, 0.0, 0.0], true);
            car.vel = Vec2::new(vx, vy);
            car.update(DT, &test_track(), 99, 0.0, &mut test_rng());
            prop_assert_eq!(car.speed, car.vel.length());
        }

        #[test]
        fn prop_lateral_position_stays_on_road(
            x in -200.0f32..200.0,
            vx in -100.0f32..100.0,
        ) {
            let mut car = Car::new(Vec3::new(x, 500.0, 5.0), [1.0, 0.0, 0.0], true);
            car.vel = Vec2::new(vx, 5.0);
            for _ in 0..50 {
                car.update(DT, &test_track(), 99, 0.0, &mut test_rng());
            }
            prop_assert!(car.pos.x.abs() <= ROAD_WIDTH / 2.0);
        }

        #[test]
        fn prop_laps_nondecreasing(
            vy in 0.0f32..40.0,
            laps in 1u32..6,
        ) {
            let mut car = Car::new(Vec3::new(0.0, 0.0, 5.0), [1.0, 0.0, 0.0], true);
            car.vel = Vec2::new(0.0, vy);
            let track = test_track();
            let mut rng = test_rng();
            let mut prev = 0;
            let mut finish_edges = 0;
            let mut was_finished = false;
            for _ in 0..2000 {
                car.accelerate();
                car.update(DT, &track, laps, 0.0, &mut rng);
                prop_assert!(car.laps_completed >= prev);
                prev = car.laps_completed;
                if car.finished && !was_finished {
                    finish_edges += 1;
                    was_finished = true;
                }
                prop_assert!(!(was_finished && !car.finished));
            }
            prop_assert!(finish_edges <= 1);
        }
    }
}
