use serde::{Deserialize, Serialize};

use fairway_core::time::DEFAULT_MAX_FRAME_DT;

/// Per-frame velocity multiplier for the default friction model.
pub const FRICTION: f32 = 0.985;
/// Below this speed the ball is considered stopped.
pub const MIN_VELOCITY: f32 = 0.02;
/// Velocity retained after bouncing off a wall obstacle.
pub const BOUNCE_DAMPING: f32 = 0.6;
/// Velocity retained after bouncing off the field edge.
pub const BOUNDARY_BOUNCE: f32 = 0.5;
/// Balls below this height are out of bounds on open courses.
pub const FLOOR_Y: f32 = -5.0;
/// Top of the power scale.
pub const POWER_MAX: f32 = 100.0;
/// Launch speed at full power.
pub const MAX_FORCE: f32 = 15.0;
/// Pointer pixels per unit of power.
pub const DRAG_SCALE: f32 = 3.0;
/// Ball must be slower than this to drop.
pub const CAPTURE_SPEED: f32 = 2.0;
/// Fraction of the hole radius inside which the ball sinks.
pub const CAPTURE_FACTOR: f32 = 0.5;
/// Rim pull applied per frame, proportional to the offset from the hole centre.
pub const PULL_STRENGTH: f32 = 0.1;

/// How rolling resistance removes speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FrictionModel {
    /// `velocity *= factor` once per frame, regardless of frame length.
    PerFrame { factor: f32 },
    /// `velocity *= exp(-rate * dt)`.
    Continuous { rate: f32 },
}

impl FrictionModel {
    /// Multiplier to apply to velocity for a frame of length `dt`.
    pub fn decay(&self, dt: f32) -> f32 {
        match *self {
            Self::PerFrame { factor } => factor,
            Self::Continuous { rate } => (-rate * dt).exp(),
        }
    }

    fn is_valid(&self) -> bool {
        match *self {
            Self::PerFrame { factor } => factor > 0.0 && factor < 1.0,
            Self::Continuous { rate } => rate > 0.0 && rate.is_finite(),
        }
    }
}

impl Default for FrictionModel {
    fn default() -> Self {
        Self::PerFrame { factor: FRICTION }
    }
}

/// Integrator tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub friction: FrictionModel,
    pub min_velocity: f32,
    pub bounce_damping: f32,
    pub boundary_bounce: f32,
    pub floor_y: f32,
    pub max_frame_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: FrictionModel::default(),
            min_velocity: MIN_VELOCITY,
            bounce_damping: BOUNCE_DAMPING,
            boundary_bounce: BOUNDARY_BOUNCE,
            floor_y: FLOOR_Y,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
        }
    }
}

/// Replacement power for releases that are too weak to be deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeakShotFloor {
    /// Releases with `0 < power < threshold` are replaced.
    pub threshold: f32,
    pub substitute: f32,
}

/// Charge and aim tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub power_max: f32,
    pub max_force: f32,
    pub drag_scale: f32,
    /// Power gained per second while a hold gesture is active.
    pub hold_gain_rate: f32,
    pub weak_shot_floor: Option<WeakShotFloor>,
    pub quick_shot_power: f32,
    /// Radians per discrete aim nudge.
    pub rotate_step: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            power_max: POWER_MAX,
            max_force: MAX_FORCE,
            drag_scale: DRAG_SCALE,
            hold_gain_rate: 50.0,
            weak_shot_floor: Some(WeakShotFloor {
                threshold: 5.0,
                substitute: 50.0,
            }),
            quick_shot_power: 50.0,
            rotate_step: 0.1,
        }
    }
}

/// Hole capture tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleConfig {
    pub capture_speed: f32,
    pub capture_factor: f32,
    pub pull_strength: f32,
    /// How far the ball drops below its rolling height when it sinks.
    pub sink_drop: f32,
}

impl Default for HoleConfig {
    fn default() -> Self {
        Self {
            capture_speed: CAPTURE_SPEED,
            capture_factor: CAPTURE_FACTOR,
            pull_strength: PULL_STRENGTH,
            sink_drop: 0.05,
        }
    }
}

/// Stroke penalties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub out_of_bounds_penalty: u32,
    pub retee_penalty: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_penalty: 1,
            retee_penalty: 1,
        }
    }
}

/// Top-level golf configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GolfConfig {
    pub physics: PhysicsConfig,
    pub stroke: StrokeConfig,
    pub hole: HoleConfig,
    pub rules: RulesConfig,
}

impl GolfConfig {
    /// Hold-to-charge tuning for the ramp table: continuous drag, a 30-point power
    /// scale that maps one-to-one onto launch speed, and no weak-shot floor.
    pub fn table() -> Self {
        Self {
            physics: PhysicsConfig {
                friction: FrictionModel::Continuous { rate: 1.8 },
                min_velocity: 0.05,
                ..PhysicsConfig::default()
            },
            stroke: StrokeConfig {
                power_max: 30.0,
                max_force: 30.0,
                hold_gain_rate: 16.0,
                weak_shot_floor: None,
                quick_shot_power: 15.0,
                rotate_step: 0.09,
                ..StrokeConfig::default()
            },
            hole: HoleConfig {
                capture_factor: 0.6,
                ..HoleConfig::default()
            },
            rules: RulesConfig::default(),
        }
    }

    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        Self::load_or(Self::default())
    }

    /// Like [`GolfConfig::load`], with `fallback` standing in for a missing or bad file.
    pub fn load_or(fallback: Self) -> Self {
        let path = std::env::var("FAIRWAY_GOLF_CONFIG")
            .unwrap_or_else(|_| "config/golf.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                fallback
            }),
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                fallback
            },
        };

        if let Ok(val) = std::env::var("FAIRWAY_MAX_FRAME_DT")
            && let Ok(dt) = val.parse::<f32>()
        {
            config.physics.max_frame_dt = dt;
        }

        config.validated()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(content)
    }

    /// Replace values that would break the simulation with their defaults.
    pub fn validated(mut self) -> Self {
        let physics = PhysicsConfig::default();
        if !self.physics.friction.is_valid() {
            tracing::warn!(friction = ?self.physics.friction, "Invalid friction, using default");
            self.physics.friction = physics.friction;
        }
        if !positive(self.physics.min_velocity) {
            tracing::warn!("physics.min_velocity must be > 0, using default");
            self.physics.min_velocity = physics.min_velocity;
        }
        if !(0.0..=1.0).contains(&self.physics.bounce_damping) {
            tracing::warn!("physics.bounce_damping must be within [0, 1], using default");
            self.physics.bounce_damping = physics.bounce_damping;
        }
        if !(0.0..=1.0).contains(&self.physics.boundary_bounce) {
            tracing::warn!("physics.boundary_bounce must be within [0, 1], using default");
            self.physics.boundary_bounce = physics.boundary_bounce;
        }
        if !positive(self.physics.max_frame_dt) {
            tracing::warn!("physics.max_frame_dt must be > 0, using default");
            self.physics.max_frame_dt = physics.max_frame_dt;
        }

        let stroke = StrokeConfig::default();
        if !positive(self.stroke.power_max) {
            tracing::warn!("stroke.power_max must be > 0, using default");
            self.stroke.power_max = stroke.power_max;
        }
        if !positive(self.stroke.drag_scale) {
            tracing::warn!("stroke.drag_scale must be > 0, using default");
            self.stroke.drag_scale = stroke.drag_scale;
        }
        if self.stroke.max_force.is_nan() || self.stroke.max_force < 0.0 {
            tracing::warn!("stroke.max_force must be >= 0, using default");
            self.stroke.max_force = stroke.max_force;
        }

        if !positive(self.stroke.hold_gain_rate) {
            tracing::warn!("stroke.hold_gain_rate must be > 0, using default");
            self.stroke.hold_gain_rate = stroke.hold_gain_rate;
        }
        if !positive(self.stroke.quick_shot_power) {
            tracing::warn!("stroke.quick_shot_power must be > 0, using default");
            self.stroke.quick_shot_power = stroke.quick_shot_power;
        }

        let hole = HoleConfig::default();
        if !(0.0..=1.0).contains(&self.hole.capture_factor) {
            tracing::warn!("hole.capture_factor must be within [0, 1], using default");
            self.hole.capture_factor = hole.capture_factor;
        }
        if !non_negative(self.hole.capture_speed) {
            tracing::warn!("hole.capture_speed must be >= 0, using default");
            self.hole.capture_speed = hole.capture_speed;
        }
        if !(0.0..=1.0).contains(&self.hole.pull_strength) {
            tracing::warn!("hole.pull_strength must be within [0, 1], using default");
            self.hole.pull_strength = hole.pull_strength;
        }
        if !non_negative(self.hole.sink_drop) {
            tracing::warn!("hole.sink_drop must be >= 0, using default");
            self.hole.sink_drop = hole.sink_drop;
        }
        self
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}
