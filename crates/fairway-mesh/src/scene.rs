use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use fairway_golf::course::{Course, Obstacle, Ramp, RampAxis, Wall};

use crate::MeshKey;

/// Lift applied to the cup marker so it does not z-fight with the green.
const HOLE_LIFT: f32 = 0.01;

/// Transform for positioning a unit primitive in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(t: Vec3) -> Self {
        Self {
            translation: t,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Build the model matrix (Translation * Rotation * Scale).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// What a scene item depicts; renderers pick materials from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Green,
    Wall,
    Ramp,
    Hole,
    Ball,
}

/// One mesh placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneItem {
    pub part: Part,
    pub mesh: MeshKey,
    pub transform: Transform,
}

/// Static geometry for `course`: green, obstacles in list order, then the cup.
pub fn course_scene(course: &Course) -> Vec<SceneItem> {
    let mut items = Vec::with_capacity(course.obstacles.len() + 2);

    let b = course.bounds;
    let size = b.max - b.min;
    let centre = (b.min + b.max) * 0.5;
    items.push(SceneItem {
        part: Part::Green,
        mesh: MeshKey::Plane,
        transform: Transform::from_translation(Vec3::new(centre.x, course.ground_y, centre.y))
            .with_scale(Vec3::new(size.x, 1.0, size.y)),
    });

    for obstacle in &course.obstacles {
        items.push(match obstacle {
            Obstacle::Wall(wall) => wall_item(wall),
            Obstacle::Ramp(ramp) => ramp_item(ramp),
        });
    }

    let hole = course.hole;
    items.push(SceneItem {
        part: Part::Hole,
        mesh: MeshKey::HoleDisc { segments: 32 },
        transform: Transform::from_translation(hole.position + Vec3::Y * HOLE_LIFT)
            .with_scale(Vec3::new(hole.radius * 2.0, 1.0, hole.radius * 2.0)),
    });

    tracing::debug!(course = %course.name, items = items.len(), "Built course scene");
    items
}

/// The ball at `position` with `radius`.
pub fn ball_item(position: Vec3, radius: f32) -> SceneItem {
    SceneItem {
        part: Part::Ball,
        mesh: MeshKey::GolfBall { segments: 32 },
        transform: Transform::from_translation(position).with_scale(Vec3::splat(radius * 2.0)),
    }
}

fn wall_item(wall: &Wall) -> SceneItem {
    SceneItem {
        part: Part::Wall,
        mesh: MeshKey::Cuboid,
        transform: Transform::from_translation((wall.min + wall.max) * 0.5)
            .with_scale(wall.max - wall.min),
    }
}

fn ramp_item(ramp: &Ramp) -> SceneItem {
    let size = ramp.max - ramp.min;
    let base = Vec3::new(
        (ramp.min.x + ramp.max.x) * 0.5,
        ramp.min.y,
        (ramp.min.z + ramp.max.z) * 0.5,
    );
    // The wedge rises along local +X; Z ramps turn it to rise along world +Z
    let transform = match ramp.axis {
        RampAxis::X => Transform::from_translation(base).with_scale(size),
        RampAxis::Z => Transform::from_translation(base)
            .with_scale(Vec3::new(size.z, size.y, size.x))
            .with_rotation(Quat::from_rotation_y(-FRAC_PI_2)),
    };
    SceneItem {
        part: Part::Ramp,
        mesh: MeshKey::RampWedge,
        transform,
    }
}
