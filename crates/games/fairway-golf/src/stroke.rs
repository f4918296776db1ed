//! Charge-and-release stroke input.
//!
//! Two gestures feed the same machine: a pointer drag (slingshot; power from drag
//! length, aim opposite the drag) and a key hold (power grows with time, aim set by
//! discrete nudges). The ball's own motion flag is the `Flight` phase, so a shot
//! can never start while the ball is rolling.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::config::StrokeConfig;

/// Drags shorter than this (in pointer units) carry no aim information.
const MIN_DRAG: f32 = 1e-3;

/// The gesture currently charging a shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Gesture {
    /// Pointer drag that started at `origin`.
    Drag { origin: Vec2 },
    /// Key held down.
    Hold,
}

/// Where the stroke cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokePhase {
    Idle,
    Charging,
    Flight,
}

/// Aim and charge state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrokeInput {
    aim_angle: f32,
    aim_direction: Vec3,
    power: f32,
    gesture: Option<Gesture>,
}

impl StrokeInput {
    /// Aim along +Z with no charge.
    pub fn new() -> Self {
        Self::with_angle(0.0)
    }

    pub fn with_angle(angle: f32) -> Self {
        let mut input = Self {
            aim_angle: 0.0,
            aim_direction: Vec3::Z,
            power: 0.0,
            gesture: None,
        };
        input.set_aim_angle(angle);
        input
    }

    /// Aim from `from` toward `to` on the horizontal plane. Coincident points aim along +Z.
    pub fn aimed_at(from: Vec3, to: Vec3) -> Self {
        let d = to - from;
        if d.x.abs() < f32::EPSILON && d.z.abs() < f32::EPSILON {
            return Self::new();
        }
        Self::with_angle(d.x.atan2(d.z))
    }

    pub fn aim_angle(&self) -> f32 {
        self.aim_angle
    }

    /// Unit shot direction on the horizontal plane.
    pub fn aim_direction(&self) -> Vec3 {
        self.aim_direction
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn normalized_power(&self, cfg: &StrokeConfig) -> f32 {
        (self.power / cfg.power_max).clamp(0.0, 1.0)
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    pub fn is_charging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn phase(&self, ball: &Ball) -> StrokePhase {
        if ball.is_moving {
            StrokePhase::Flight
        } else if self.gesture.is_some() {
            StrokePhase::Charging
        } else {
            StrokePhase::Idle
        }
    }

    /// Set the aim angle (radians; 0 = +Z, π/2 = +X) and recompute the direction.
    /// Non-finite angles are ignored.
    pub fn set_aim_angle(&mut self, angle: f32) {
        if !angle.is_finite() {
            return;
        }
        self.aim_angle = angle;
        let (sin, cos) = angle.sin_cos();
        self.aim_direction = Vec3::new(sin, 0.0, cos).normalize_or(Vec3::Z);
    }

    /// Pointer down: start a slingshot drag at `origin`.
    pub fn begin_charge(&mut self, ball: &Ball, origin: Vec2) -> bool {
        self.begin(ball, Gesture::Drag { origin })
    }

    /// Key down: start charging by holding.
    pub fn begin_hold(&mut self, ball: &Ball) -> bool {
        if self.gesture == Some(Gesture::Hold) {
            // Key repeat; keep the charge accumulated so far.
            return true;
        }
        self.begin(ball, Gesture::Hold)
    }

    fn begin(&mut self, ball: &Ball, gesture: Gesture) -> bool {
        if ball.is_moving || ball.in_hole {
            return false;
        }
        self.gesture = Some(gesture);
        self.power = 0.0;
        true
    }

    /// Pointer move during a drag: aim opposite the drag, power from its length.
    pub fn update_charge(&mut self, current: Vec2, cfg: &StrokeConfig) {
        let Some(Gesture::Drag { origin }) = self.gesture else {
            return;
        };
        let d = current - origin;
        let distance = d.length();
        if !distance.is_finite() || distance < MIN_DRAG {
            self.power = 0.0;
            return;
        }
        self.set_aim_angle((-d.x).atan2(d.y) + std::f32::consts::PI);
        self.power = (distance / cfg.drag_scale).clamp(0.0, cfg.power_max);
    }

    /// Elapsed time while a hold is active grows the charge.
    pub fn advance(&mut self, dt: f32, cfg: &StrokeConfig) {
        if self.gesture != Some(Gesture::Hold) || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.power = (self.power + cfg.hold_gain_rate * dt).clamp(0.0, cfg.power_max);
    }

    /// Pointer up / key up. Fires if there is charge; otherwise returns to idle.
    pub fn release(&mut self, ball: &mut Ball, cfg: &StrokeConfig) -> bool {
        if self.gesture.is_none() {
            return false;
        }
        let power = self.power;
        let fired = self.shoot(ball, power, cfg);
        self.cancel();
        fired
    }

    /// Fire along the current aim with `power` on the `[0, power_max]` scale.
    ///
    /// Zero power never fires. With a weak-shot floor, small positive power is
    /// replaced by the floor's substitute.
    pub fn shoot(&mut self, ball: &mut Ball, power: f32, cfg: &StrokeConfig) -> bool {
        if ball.is_moving || ball.in_hole || !power.is_finite() || power <= 0.0 {
            return false;
        }
        let mut power = power.min(cfg.power_max);
        if let Some(floor) = cfg.weak_shot_floor
            && power < floor.threshold
        {
            power = floor.substitute.clamp(0.0, cfg.power_max);
        }
        let speed = power / cfg.power_max * cfg.max_force;
        ball.launch(self.aim_direction * speed);
        tracing::debug!(power, speed, angle = self.aim_angle, "Stroke fired");
        self.cancel();
        true
    }

    /// Discrete aim nudge. Refused while the ball is rolling.
    pub fn rotate(&mut self, ball: &Ball, delta: f32) -> bool {
        if ball.is_moving || !delta.is_finite() {
            return false;
        }
        self.set_aim_angle(self.aim_angle + delta);
        true
    }

    /// Drop any gesture in progress and zero the charge. Aim is kept.
    pub fn cancel(&mut self) {
        self.gesture = None;
        self.power = 0.0;
    }
}

impl Default for StrokeInput {
    fn default() -> Self {
        Self::new()
    }
}
