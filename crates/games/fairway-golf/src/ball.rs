use glam::Vec3;
use serde::{Deserialize, Serialize};

/// State of the ball on the course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "BallRecord")]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    radius: f32,
    pub is_moving: bool,
    pub in_hole: bool,
    pub out_of_bounds: bool,
    spawn: Vec3,
    /// Where the ball last sat still; used to recover from non-finite state.
    pub last_rest: Vec3,
}

/// Wire form of [`Ball`], checked before it becomes one.
#[derive(Deserialize)]
struct BallRecord {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    is_moving: bool,
    in_hole: bool,
    out_of_bounds: bool,
    spawn: Vec3,
    last_rest: Vec3,
}

/// A serialized ball whose radius is not a positive finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidRadius(pub f32);

impl std::fmt::Display for InvalidRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ball radius must be positive and finite, got {}", self.0)
    }
}

impl std::error::Error for InvalidRadius {}

impl TryFrom<BallRecord> for Ball {
    type Error = InvalidRadius;

    fn try_from(r: BallRecord) -> Result<Self, Self::Error> {
        if !valid_radius(r.radius) {
            return Err(InvalidRadius(r.radius));
        }
        Ok(Self {
            position: r.position,
            velocity: r.velocity,
            radius: r.radius,
            is_moving: r.is_moving,
            in_hole: r.in_hole,
            out_of_bounds: r.out_of_bounds,
            spawn: r.spawn,
            last_rest: r.last_rest,
        })
    }
}

fn valid_radius(radius: f32) -> bool {
    radius.is_finite() && radius > 0.0
}

impl Ball {
    /// Create a ball resting at `spawn`. A non-positive radius is replaced by a
    /// minimal positive one so collision maths stays defined.
    pub fn new(spawn: Vec3, radius: f32) -> Self {
        let radius = if valid_radius(radius) {
            radius
        } else {
            tracing::warn!(radius, "Ball radius must be positive, clamping");
            f32::EPSILON
        };
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            radius,
            is_moving: false,
            in_hole: false,
            out_of_bounds: false,
            spawn,
            last_rest: spawn,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Return to the tee with everything zeroed. Calling this twice is the same as once.
    pub fn reset(&mut self) {
        self.position = self.spawn;
        self.velocity = Vec3::ZERO;
        self.is_moving = false;
        self.in_hole = false;
        self.out_of_bounds = false;
        self.last_rest = self.spawn;
    }

    /// Set the ball rolling with `velocity` from where it sits.
    pub fn launch(&mut self, velocity: Vec3) {
        self.last_rest = self.position;
        self.velocity = velocity;
        self.is_moving = true;
    }

    /// Bring the ball to a dead stop where it is.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.is_moving = false;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Put the ball back where it last rested, stopped.
    pub fn restore_last_rest(&mut self) {
        self.position = self.last_rest;
        self.halt();
    }

    #[cfg(test)]
    pub(crate) fn set_radius_unchecked(&mut self, radius: f32) {
        self.radius = radius;
    }
}
