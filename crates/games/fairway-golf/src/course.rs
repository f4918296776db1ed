use glam::{Vec2, Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

/// An axis-aligned box the ball bounces off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Wall {
    pub min: Vec3,
    pub max: Vec3,
}

impl Wall {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Closest point on (or in) the box to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Horizontal axis along which a ramp rises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RampAxis {
    X,
    Z,
}

/// An incline whose surface rises linearly from `min.y` at `min[axis]`
/// to `max.y` at `max[axis]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ramp {
    pub min: Vec3,
    pub max: Vec3,
    pub axis: RampAxis,
}

impl Ramp {
    pub const fn new(min: Vec3, max: Vec3, axis: RampAxis) -> Self {
        Self { min, max, axis }
    }

    /// Whether the point lies strictly inside the ramp's X/Z footprint.
    pub fn covers(&self, x: f32, z: f32) -> bool {
        x > self.min.x && x < self.max.x && z > self.min.z && z < self.max.z
    }

    /// Surface height at the given horizontal position, interpolated along the ramp axis.
    pub fn surface_height(&self, x: f32, z: f32) -> f32 {
        let (lo, hi, v) = match self.axis {
            RampAxis::X => (self.min.x, self.max.x, x),
            RampAxis::Z => (self.min.z, self.max.z, z),
        };
        let span = hi - lo;
        if span <= f32::EPSILON {
            return self.max.y;
        }
        let t = ((v - lo) / span).clamp(0.0, 1.0);
        self.min.y + t * (self.max.y - self.min.y)
    }
}

/// A static piece of course geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Obstacle {
    Wall(Wall),
    Ramp(Ramp),
}

/// What happens when the ball reaches the edge of the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Clamp to the edge and bounce back (walled courses, tables with rails).
    Bounce,
    /// Flag the ball out of bounds; the game re-tees it with a penalty.
    OutOfBounds,
}

/// Which gesture the course is tuned for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Drag away from the ball and release (slingshot).
    Slingshot,
    /// Hold a key to charge, release to shoot.
    HoldToCharge,
}

/// Playable X/Z extent. `Vec2::y` holds the Z coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FieldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl FieldBounds {
    pub const fn square(half_extent: f32) -> Self {
        Self {
            min: Vec2::new(-half_extent, -half_extent),
            max: Vec2::new(half_extent, half_extent),
        }
    }

    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }
}

/// The cup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hole {
    /// Centre of the cup opening; `y` is the green height at the cup.
    pub position: Vec3,
    pub radius: f32,
}

/// A minigolf course definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub par: u8,
    pub ball_radius: f32,
    pub spawn_point: Vec3,
    pub hole: Hole,
    pub bounds: FieldBounds,
    pub boundary: BoundaryPolicy,
    pub controls: ControlScheme,
    /// Height of the flat green.
    pub ground_y: f32,
    pub obstacles: Vec<Obstacle>,
}

impl Course {
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.obstacles.iter().filter_map(|o| match o {
            Obstacle::Wall(w) => Some(w),
            Obstacle::Ramp(_) => None,
        })
    }

    pub fn ramps(&self) -> impl Iterator<Item = &Ramp> {
        self.obstacles.iter().filter_map(|o| match o {
            Obstacle::Ramp(r) => Some(r),
            Obstacle::Wall(_) => None,
        })
    }

    /// Height of the playing surface at the given position.
    pub fn surface_height(&self, x: f32, z: f32) -> f32 {
        self.ramps()
            .filter(|r| r.covers(x, z))
            .map(|r| r.surface_height(x, z))
            .fold(self.ground_y, f32::max)
    }

    /// Centre height of a ball of the course's radius resting at the given position.
    pub fn resting_height(&self, x: f32, z: f32) -> f32 {
        self.surface_height(x, z) + self.ball_radius
    }

    /// Planar offset from the hole centre to `p`.
    pub fn hole_offset(&self, p: Vec3) -> Vec2 {
        p.xz() - self.hole.position.xz()
    }

    /// Planar distance from `p` to the hole centre.
    pub fn hole_distance(&self, p: Vec3) -> f32 {
        self.hole_offset(p).length()
    }
}

/// Hole 1: Walled Green. Square green enclosed by walls, a low ramp and a
/// gap between two blocks guarding the cup.
pub fn walled_green() -> Course {
    let half = 20.0;
    let t = 1.0;
    let h = 3.0;
    let mut obstacles = boundary_walls(half, t, h);
    obstacles.extend([
        Obstacle::Ramp(Ramp::new(
            Vec3::new(-3.0, 0.0, -5.0),
            Vec3::new(3.0, 0.6, -1.0),
            RampAxis::Z,
        )),
        Obstacle::Wall(Wall::new(
            Vec3::new(-7.0, 0.0, 4.0),
            Vec3::new(-1.5, 1.0, 5.0),
        )),
        Obstacle::Wall(Wall::new(
            Vec3::new(1.5, 0.0, 4.0),
            Vec3::new(7.0, 1.0, 5.0),
        )),
    ]);
    Course {
        name: "Walled Green".to_string(),
        par: 3,
        ball_radius: 0.2,
        spawn_point: Vec3::new(0.0, 0.2, -10.0),
        hole: Hole {
            position: Vec3::new(0.0, 0.0, 10.0),
            radius: 0.7,
        },
        // Containment stops at the inner wall faces so it never clamps into a wall
        bounds: FieldBounds::square(half - t),
        boundary: BoundaryPolicy::Bounce,
        controls: ControlScheme::Slingshot,
        ground_y: 0.0,
        obstacles,
    }
}

/// Hole 2: Open Green. No rails; rolling off the edge costs a stroke.
pub fn open_green() -> Course {
    Course {
        name: "Open Green".to_string(),
        par: 3,
        ball_radius: 0.2,
        spawn_point: Vec3::new(0.0, 0.2, -10.0),
        hole: Hole {
            position: Vec3::new(0.0, 0.0, 10.0),
            radius: 0.7,
        },
        bounds: FieldBounds::square(25.0),
        boundary: BoundaryPolicy::OutOfBounds,
        controls: ControlScheme::Slingshot,
        ground_y: 0.0,
        obstacles: vec![Obstacle::Wall(Wall::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ))],
    }
}

/// Hole 3: Ramp Table. Flat platform leading onto a ramp with the cup near its top.
pub fn ramp_table() -> Course {
    let platform_start_x = -8.0;
    let ramp_start_x = -2.0;
    let ramp_end_x = 4.0;
    let ramp_height = 3.0;
    let (min_z, max_z) = (-2.0, 2.0);
    let ball_radius = 0.5;

    let ramp = Ramp::new(
        Vec3::new(ramp_start_x, 0.0, min_z),
        Vec3::new(ramp_end_x, ramp_height, max_z),
        RampAxis::X,
    );
    let hole_x = 3.4;
    let hole_z = 0.0;

    Course {
        name: "Ramp Table".to_string(),
        par: 2,
        ball_radius,
        spawn_point: Vec3::new(platform_start_x + 2.0, ball_radius, 0.0),
        hole: Hole {
            position: Vec3::new(hole_x, ramp.surface_height(hole_x, hole_z), hole_z),
            radius: 0.6,
        },
        bounds: FieldBounds {
            min: Vec2::new(platform_start_x, min_z),
            max: Vec2::new(ramp_end_x, max_z),
        },
        boundary: BoundaryPolicy::Bounce,
        controls: ControlScheme::HoldToCharge,
        ground_y: 0.0,
        obstacles: vec![Obstacle::Ramp(ramp)],
    }
}

/// Four perimeter walls of thickness `t` lining the inside of a square field.
fn boundary_walls(half: f32, t: f32, h: f32) -> Vec<Obstacle> {
    [
        // Left
        (Vec3::new(-half, 0.0, -half), Vec3::new(-half + t, h, half)),
        // Right
        (Vec3::new(half - t, 0.0, -half), Vec3::new(half, h, half)),
        // Front
        (Vec3::new(-half, 0.0, -half), Vec3::new(half, h, -half + t)),
        // Back
        (Vec3::new(-half, 0.0, half - t), Vec3::new(half, h, half)),
    ]
    .into_iter()
    .map(|(min, max)| Obstacle::Wall(Wall::new(min, max)))
    .collect()
}

/// Returns all courses in play order (index 0 = hole 1, etc.).
pub fn all_courses() -> Vec<Course> {
    vec![walled_green(), open_green(), ramp_table()]
}
