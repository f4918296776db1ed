pub mod ball;
pub mod config;
pub mod course;
pub mod physics;
pub mod scoring;
pub mod stroke;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use fairway_core::fairway_game_boilerplate;
use fairway_core::game_trait::{FairwayGame, GameEvent, GameMetadata};
use fairway_core::time::clamp_dt;

use ball::Ball;
use config::GolfConfig;
use course::{ControlScheme, Course, all_courses};
use physics::StepOutcome;
use stroke::{StrokeInput, StrokePhase};

/// Everything that changes while a hole is played. Serialized for snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GolfState {
    pub ball: Ball,
    pub stroke: StrokeInput,
    pub strokes: u32,
    /// The ball is in the hole; no further shots until a reset.
    pub round_complete: bool,
    /// Which course (0-indexed) is being played.
    pub course_index: u8,
}

impl GolfState {
    fn new(course: &Course, course_index: u8) -> Self {
        Self {
            ball: Ball::new(course.spawn_point, course.ball_radius),
            stroke: StrokeInput::aimed_at(course.spawn_point, course.hole.position),
            strokes: 0,
            round_complete: false,
            course_index,
        }
    }
}

/// Read-only view handed to the renderer and HUD each frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub course: String,
    pub par: u8,
    pub ball_position: Vec3,
    pub ball_radius: f32,
    pub hole_position: Vec3,
    pub hole_radius: f32,
    pub aim_angle: f32,
    pub aim_direction: Vec3,
    /// Charge on a 0..=1 scale.
    pub power: f32,
    pub phase: StrokePhase,
    pub strokes: u32,
    pub moving: bool,
    pub finished: bool,
    pub paused: bool,
}

/// A single hole of minigolf: course, tuning, ball, stroke input and counters.
pub struct MiniGolf {
    course: Course,
    config: GolfConfig,
    state: GolfState,
    paused: bool,
}

impl MiniGolf {
    /// Hole 1 with default tuning.
    pub fn new() -> Self {
        Self::for_course_index(0)
    }

    /// Built-in course by play-order index (clamped to the last course), with
    /// the preset tuning for its control scheme.
    pub fn for_course_index(index: usize) -> Self {
        let mut courses = all_courses();
        let index = index.min(courses.len().saturating_sub(1));
        let course = courses.swap_remove(index);
        let config = match course.controls {
            ControlScheme::Slingshot => GolfConfig::default(),
            ControlScheme::HoldToCharge => GolfConfig::table(),
        };
        let mut game = Self::with_course(course, config);
        game.state.course_index = index as u8;
        game
    }

    pub fn with_course(course: Course, config: GolfConfig) -> Self {
        let config = config.validated();
        let state = GolfState::new(&course, 0);
        Self {
            course,
            config,
            state,
            paused: false,
        }
    }

    /// Replace the tuning. Takes effect from the next frame.
    pub fn with_config(mut self, config: GolfConfig) -> Self {
        self.config = config.validated();
        self
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn config(&self) -> &GolfConfig {
        &self.config
    }

    pub fn state(&self) -> &GolfState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.state.round_complete
    }

    // ---- input ----

    /// Pointer down at `(x, y)`.
    pub fn begin_charge(&mut self, x: f32, y: f32) -> bool {
        self.accepts_input()
            && self
                .state
                .stroke
                .begin_charge(&self.state.ball, Vec2::new(x, y))
    }

    /// Pointer moved to `(x, y)` while charging.
    pub fn update_charge(&mut self, x: f32, y: f32) {
        if self.accepts_input() {
            self.state
                .stroke
                .update_charge(Vec2::new(x, y), &self.config.stroke);
        }
    }

    /// Key down. Charge then grows with each `update`.
    pub fn begin_hold(&mut self) -> bool {
        self.accepts_input() && self.state.stroke.begin_hold(&self.state.ball)
    }

    /// Pointer up / key up. Returns whether a stroke was taken.
    pub fn release_charge(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let fired = self
            .state
            .stroke
            .release(&mut self.state.ball, &self.config.stroke);
        if fired {
            self.state.strokes += 1;
        }
        fired
    }

    /// Shoot at the configured default power without charging.
    pub fn quick_shot(&mut self) -> bool {
        if !self.accepts_input() || self.phase() != StrokePhase::Idle {
            return false;
        }
        let power = self.config.stroke.quick_shot_power;
        let fired = self
            .state
            .stroke
            .shoot(&mut self.state.ball, power, &self.config.stroke);
        if fired {
            self.state.strokes += 1;
        }
        fired
    }

    /// Turn the aim by `delta` radians.
    pub fn rotate_aim_discrete(&mut self, delta: f32) -> bool {
        self.accepts_input() && self.state.stroke.rotate(&self.state.ball, delta)
    }

    /// Turn the aim by `steps` configured increments (negative turns the other way).
    pub fn nudge_aim(&mut self, steps: i32) -> bool {
        self.rotate_aim_discrete(steps as f32 * self.config.stroke.rotate_step)
    }

    /// Put the ball back on the tee mid-hole, at a penalty.
    pub fn retee(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.state.ball.reset();
        self.state.stroke.cancel();
        self.state.strokes += self.config.rules.retee_penalty;
        tracing::debug!(strokes = self.state.strokes, "Re-teed");
        true
    }

    // ---- queries ----

    pub fn ball_position(&self) -> Vec3 {
        self.state.ball.position
    }

    pub fn aim_angle(&self) -> f32 {
        self.state.stroke.aim_angle()
    }

    pub fn aim_direction(&self) -> Vec3 {
        self.state.stroke.aim_direction()
    }

    pub fn normalized_power(&self) -> f32 {
        self.state.stroke.normalized_power(&self.config.stroke)
    }

    pub fn stroke_count(&self) -> u32 {
        self.state.strokes
    }

    pub fn is_finished(&self) -> bool {
        self.state.round_complete
    }

    pub fn is_moving(&self) -> bool {
        self.state.ball.is_moving
    }

    pub fn phase(&self) -> StrokePhase {
        self.state.stroke.phase(&self.state.ball)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            course: self.course.name.clone(),
            par: self.course.par,
            ball_position: self.state.ball.position,
            ball_radius: self.state.ball.radius(),
            hole_position: self.course.hole.position,
            hole_radius: self.course.hole.radius,
            aim_angle: self.aim_angle(),
            aim_direction: self.aim_direction(),
            power: self.normalized_power(),
            phase: self.phase(),
            strokes: self.state.strokes,
            moving: self.is_moving(),
            finished: self.is_finished(),
            paused: self.paused,
        }
    }
}

impl Default for MiniGolf {
    fn default() -> Self {
        Self::new()
    }
}

impl FairwayGame for MiniGolf {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: self.course.name.clone(),
            description: "3D mini-golf! Drag or hold to charge, release to putt.".to_string(),
            par: self.course.par,
            hole_count: all_courses().len() as u8,
        }
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.paused || self.state.round_complete {
            return Vec::new();
        }
        let dt = clamp_dt(dt, self.config.physics.max_frame_dt);

        self.state.stroke.advance(dt, &self.config.stroke);

        let mut events = Vec::new();
        match physics::step(&mut self.state.ball, &self.course, &self.config, dt) {
            StepOutcome::Idle | StepOutcome::Rolling => {},
            StepOutcome::Stopped => events.push(GameEvent::BallAtRest),
            StepOutcome::OutOfBounds => {
                let penalty = self.config.rules.out_of_bounds_penalty;
                self.state.ball.reset();
                self.state.strokes += penalty;
                tracing::debug!(penalty, strokes = self.state.strokes, "Out of bounds");
                events.push(GameEvent::OutOfBounds { penalty });
            },
            StepOutcome::Sunk => {
                self.state.round_complete = true;
                tracing::info!(
                    course = %self.course.name,
                    strokes = self.state.strokes,
                    par = self.course.par,
                    "Hole completed"
                );
                events.push(GameEvent::HoleCompleted {
                    strokes: self.state.strokes,
                    par: self.course.par,
                });
            },
            StepOutcome::Recovered => events.push(GameEvent::Recovered),
        }
        events
    }

    fn request_reset(&mut self) {
        self.state.ball.reset();
        self.state.stroke.cancel();
        self.state.strokes = 0;
        self.state.round_complete = false;
    }

    fn is_in_motion(&self) -> bool {
        self.state.ball.is_moving
    }

    fn max_frame_dt(&self) -> f32 {
        self.config.physics.max_frame_dt
    }

    fairway_game_boilerplate!(state_type: GolfState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use course::open_green;
    use fairway_core::test_helpers::{self, run_frames, run_until_settled};
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn fresh_game_aims_at_hole() {
        let game = MiniGolf::new();
        assert_eq!(game.phase(), StrokePhase::Idle);
        assert_eq!(game.stroke_count(), 0);
        assert!((game.aim_direction() - Vec3::Z).length() < 1e-6);
        assert_eq!(game.ball_position(), Vec3::new(0.0, 0.2, -10.0));
    }

    #[test]
    fn ramp_table_uses_table_tuning() {
        let game = MiniGolf::for_course_index(2);
        assert_eq!(game.course().controls, ControlScheme::HoldToCharge);
        assert_eq!(game.config().stroke.power_max, 30.0);
        assert_eq!(game.state().course_index, 2);
        assert!((game.aim_direction() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn course_index_clamps() {
        assert_eq!(MiniGolf::for_course_index(99).state().course_index, 2);
    }

    #[test]
    fn quick_shot_scenario() {
        let mut game = MiniGolf::new();
        assert!(game.quick_shot());
        assert_eq!(game.state.ball.velocity, Vec3::new(0.0, 0.0, 7.5));
        assert!(game.is_moving());
        assert_eq!(game.stroke_count(), 1);
        assert_eq!(game.phase(), StrokePhase::Flight);
    }

    #[test]
    fn slingshot_release_counts_stroke() {
        let mut game = MiniGolf::new();
        assert!(game.begin_charge(200.0, 200.0));
        game.update_charge(200.0, 50.0);
        assert_eq!(game.phase(), StrokePhase::Charging);
        assert!((game.normalized_power() - 0.5).abs() < 1e-6);
        assert!(game.release_charge());
        assert_eq!(game.stroke_count(), 1);
        assert!(game.is_moving());
        assert_eq!(game.normalized_power(), 0.0);
    }

    #[test]
    fn zero_power_release_is_not_a_stroke() {
        let mut game = MiniGolf::new();
        assert!(game.begin_charge(10.0, 10.0));
        assert!(!game.release_charge());
        assert_eq!(game.stroke_count(), 0);
        assert_eq!(game.phase(), StrokePhase::Idle);
    }

    #[test]
    fn no_second_shot_in_flight() {
        let mut game = MiniGolf::new();
        assert!(game.quick_shot());
        assert!(!game.quick_shot());
        assert!(!game.begin_charge(0.0, 0.0));
        assert!(!game.begin_hold());
        assert!(!game.rotate_aim_discrete(0.1));
        assert_eq!(game.stroke_count(), 1);
    }

    #[test]
    fn ball_comes_to_rest() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        let mut events = Vec::new();
        for _ in 0..2000 {
            events.extend(game.update(DT));
            if !game.is_moving() {
                break;
            }
        }
        assert!(events.contains(&GameEvent::BallAtRest));
        assert_eq!(game.phase(), StrokePhase::Idle);
    }

    #[test]
    fn hold_charges_with_time() {
        let mut game = MiniGolf::for_course_index(2);
        assert!(game.begin_hold());
        run_frames(&mut game, 30, DT);
        // 16 power/s over 0.5 s on a 30-point scale
        assert!((game.normalized_power() - 8.0 / 30.0).abs() < 1e-4);
        assert!(game.release_charge());
        assert!((game.state.ball.speed() - 8.0).abs() < 1e-3);
    }

    #[test]
    fn nudge_uses_rotate_step() {
        let mut game = MiniGolf::new();
        let before = game.aim_angle();
        assert!(game.nudge_aim(3));
        assert!((game.aim_angle() - before - 0.3).abs() < 1e-6);
        assert!(game.nudge_aim(-1));
        assert!((game.aim_angle() - before - 0.2).abs() < 1e-6);
    }

    #[test]
    fn sinking_completes_hole() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        let hole = game.course().hole.position;
        game.state.ball.position = Vec3::new(hole.x + 0.1, 0.2, hole.z);
        game.state.ball.velocity = Vec3::new(0.0, 0.0, 0.5);

        let events = game.update(0.05);
        assert_eq!(
            events,
            vec![GameEvent::HoleCompleted {
                strokes: 1,
                par: 3
            }]
        );
        assert!(game.is_finished());
        assert!(game.is_round_complete());
        assert!(!game.quick_shot(), "no strokes after the hole is done");
        assert!(!game.retee());
        assert!(game.update(DT).is_empty());
    }

    #[test]
    fn out_of_bounds_retees_with_penalty() {
        let mut game = MiniGolf::with_course(open_green(), GolfConfig::default());
        game.state.ball.position = Vec3::new(24.9, 0.2, 0.0);
        game.state.stroke.set_aim_angle(FRAC_PI_2);
        assert!(game.quick_shot());

        let events = game.update(0.05);
        assert_eq!(events, vec![GameEvent::OutOfBounds { penalty: 1 }]);
        assert_eq!(game.stroke_count(), 2);
        assert_eq!(game.ball_position(), game.course().spawn_point);
        assert!(!game.is_moving());
        assert!(!game.state.ball.out_of_bounds);
    }

    #[test]
    fn retee_adds_penalty() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        run_frames(&mut game, 30, DT);
        assert!(game.retee());
        assert_eq!(game.stroke_count(), 2);
        assert_eq!(game.ball_position(), game.course().spawn_point);
        assert!(!game.is_moving());
    }

    #[test]
    fn reset_clears_strokes_and_finish() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        game.state.round_complete = true;
        game.request_reset();
        assert_eq!(game.stroke_count(), 0);
        assert!(!game.is_finished());
        assert!(!game.is_moving());
        assert_eq!(game.ball_position(), game.course().spawn_point);
    }

    #[test]
    fn paused_game_ignores_input() {
        let mut game = MiniGolf::new();
        game.pause();
        assert!(!game.quick_shot());
        assert!(!game.begin_charge(0.0, 0.0));
        game.resume();
        assert!(game.quick_shot());
    }

    #[test]
    fn non_finite_velocity_reports_recovery() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        game.state.ball.velocity = Vec3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(game.update(DT), vec![GameEvent::Recovered]);
        assert_eq!(game.ball_position(), game.course().spawn_point);
        assert!(!game.is_moving());
    }

    #[test]
    fn nan_dt_does_nothing() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        let before = game.ball_position();
        game.update(f32::NAN);
        assert_eq!(game.ball_position(), before);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut game = MiniGolf::new();
        game.begin_charge(0.0, 0.0);
        game.update_charge(0.0, -75.0);
        let snap = game.snapshot();
        assert_eq!(snap.course, "Walled Green");
        assert_eq!(snap.phase, StrokePhase::Charging);
        assert!((snap.power - 0.25).abs() < 1e-6);
        assert_eq!(snap.strokes, 0);
        assert!(!snap.finished);
    }

    #[test]
    fn state_transfers_between_games() {
        let mut a = MiniGolf::new();
        a.quick_shot();
        run_frames(&mut a, 10, DT);

        let mut b = MiniGolf::new();
        let before = b.serialize_state();
        b.apply_state(&a.serialize_state());
        test_helpers::assert_game_state_changed(&b, &before);
        assert_eq!(a.state, b.state);
        assert_eq!(b.stroke_count(), 1);
    }

    #[test]
    fn snapshot_with_zero_radius_ball_is_ignored() {
        let mut source = MiniGolf::new();
        source.quick_shot();
        source.state.ball.set_radius_unchecked(0.0);
        let bytes = source.serialize_state();

        let mut game = MiniGolf::new();
        let before = game.state.clone();
        game.apply_state(&bytes);
        assert_eq!(game.state, before);
        assert!(game.state.ball.radius() > 0.0);
    }

    #[test]
    fn every_course_settles_after_full_power() {
        for index in 0..all_courses().len() {
            let mut game = MiniGolf::for_course_index(index);
            let power = game.config().stroke.power_max;
            game.state
                .stroke
                .shoot(&mut game.state.ball, power, &game.config.stroke);
            assert!(
                run_until_settled(&mut game, 5000, DT).is_some(),
                "course {index} never settled"
            );
        }
    }

    // ================================================================
    // Game trait contract tests
    // ================================================================

    #[test]
    fn contract_fresh_state_serializes() {
        test_helpers::contract_fresh_state_serializes(&MiniGolf::new());
    }

    #[test]
    fn contract_idle_update_is_noop() {
        test_helpers::contract_idle_update_is_noop(&mut MiniGolf::new());
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        run_frames(&mut game, 5, DT);
        test_helpers::contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_malformed_state_ignored() {
        test_helpers::contract_malformed_state_ignored(&mut MiniGolf::new());
    }

    #[test]
    fn contract_pause_stops_updates() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        test_helpers::contract_pause_stops_updates(&mut game);
    }

    #[test]
    fn contract_reset_idempotent() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        run_frames(&mut game, 10, DT);
        test_helpers::contract_reset_idempotent(&mut game);
    }

    #[test]
    fn contract_motion_settles() {
        let mut game = MiniGolf::new();
        game.quick_shot();
        test_helpers::contract_motion_settles(&mut game, 1000);
    }
}
