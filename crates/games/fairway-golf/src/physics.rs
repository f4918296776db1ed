use glam::Vec3;

use fairway_core::time::clamp_dt;

use crate::ball::Ball;
use crate::config::{GolfConfig, HoleConfig};
use crate::course::{BoundaryPolicy, Course, FieldBounds, Obstacle, Ramp, Wall};

/// Squared distances below this are treated as "centre on or inside the box".
const DEGENERATE_DIST_SQ: f32 = 1e-12;

/// What a single integrator step did to the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The ball was not moving; nothing happened.
    Idle,
    /// Still rolling after this step.
    Rolling,
    /// Fell below the minimum speed and stopped.
    Stopped,
    /// Left the field under the out-of-bounds policy.
    OutOfBounds,
    /// Dropped into the hole.
    Sunk,
    /// Non-finite state was replaced with the last rest position.
    Recovered,
}

/// Result of testing the ball against the hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleOutcome {
    /// Outside the rim, or too fast to drop.
    Clear,
    /// On the rim; velocity was bent toward the centre.
    Pulled,
    /// Captured.
    Sunk,
}

/// Upper bound on sub-steps in one frame.
const MAX_SUBSTEPS: u32 = 64;

/// Advance the ball by one frame of `dt` seconds on `course`.
///
/// `dt` is clamped to `[0, max_frame_dt]`; a zero-length frame changes nothing.
/// Friction and the stop check run once per frame. The move is then split into
/// sub-steps no longer than the ball radius, each doing integration, ground
/// settle, obstacles (list order, single pass), field boundary and hole capture.
pub fn step(ball: &mut Ball, course: &Course, cfg: &GolfConfig, dt: f32) -> StepOutcome {
    if !ball.is_finite() {
        return recover(ball);
    }
    if !ball.is_moving {
        return StepOutcome::Idle;
    }
    let dt = clamp_dt(dt, cfg.physics.max_frame_dt);
    if dt == 0.0 {
        return StepOutcome::Rolling;
    }

    ball.velocity *= cfg.physics.friction.decay(dt);

    if ball.speed() < cfg.physics.min_velocity {
        ball.halt();
        ball.last_rest = ball.position;
        return StepOutcome::Stopped;
    }

    let substeps = substep_count(ball.speed() * dt, ball.radius());
    let sub_dt = dt / substeps as f32;
    let pull_scale = 1.0 / substeps as f32;
    let mut outcome = StepOutcome::Rolling;
    for _ in 0..substeps {
        outcome = substep(ball, course, cfg, sub_dt, pull_scale);
        if outcome != StepOutcome::Rolling {
            break;
        }
    }

    if !ball.is_finite() {
        return recover(ball);
    }
    outcome
}

/// Sub-steps needed so no single move covers more than `radius`.
fn substep_count(travel: f32, radius: f32) -> u32 {
    let n = (travel / radius).ceil();
    if n.is_nan() || n < 1.0 {
        1
    } else {
        n.min(MAX_SUBSTEPS as f32) as u32
    }
}

fn substep(
    ball: &mut Ball,
    course: &Course,
    cfg: &GolfConfig,
    dt: f32,
    pull_scale: f32,
) -> StepOutcome {
    ball.position += ball.velocity * dt;

    settle_on_green(ball, course);
    resolve_obstacles(ball, &course.obstacles, cfg.physics.bounce_damping);

    match course.boundary {
        BoundaryPolicy::Bounce => {
            contain_in_bounds(ball, &course.bounds, cfg.physics.boundary_bounce);
        },
        BoundaryPolicy::OutOfBounds => {
            if flag_out_of_bounds(ball, &course.bounds, cfg.physics.floor_y) {
                return StepOutcome::OutOfBounds;
            }
        },
    }

    match hole_response(ball, course, &cfg.hole, pull_scale) {
        HoleOutcome::Sunk => StepOutcome::Sunk,
        HoleOutcome::Clear | HoleOutcome::Pulled => StepOutcome::Rolling,
    }
}

fn recover(ball: &mut Ball) -> StepOutcome {
    tracing::warn!(
        position = ?ball.position,
        velocity = ?ball.velocity,
        "Non-finite ball state, restoring last rest position"
    );
    ball.restore_last_rest();
    if !ball.is_finite() {
        ball.reset();
    }
    StepOutcome::Recovered
}

/// Resolve every obstacle once, in list order.
pub fn resolve_obstacles(ball: &mut Ball, obstacles: &[Obstacle], bounce_damping: f32) {
    for obstacle in obstacles {
        match obstacle {
            Obstacle::Wall(wall) => {
                resolve_wall(ball, wall, bounce_damping);
            },
            Obstacle::Ramp(ramp) => {
                resolve_ramp(ball, ramp);
            },
        }
    }
}

/// Push the ball out of `wall` and bounce it. Returns whether they overlapped.
pub fn resolve_wall(ball: &mut Ball, wall: &Wall, bounce_damping: f32) -> bool {
    let r = ball.radius();
    let closest = wall.closest_point(ball.position);
    let delta = ball.position - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= r * r {
        return false;
    }

    let (normal, depth) = if dist_sq > DEGENERATE_DIST_SQ {
        let dist = dist_sq.sqrt();
        (delta / dist, r - dist)
    } else {
        exit_through_nearest_face(wall, ball.position, r)
    };

    ball.position += normal * depth;

    // Only reflect when heading into the wall; a ball already leaving keeps going.
    let vn = ball.velocity.dot(normal);
    if vn < 0.0 {
        ball.velocity -= 2.0 * vn * normal;
        ball.velocity *= bounce_damping;
    }
    true
}

/// For a centre inside (or on) the box: the face with the least penetration,
/// checked X, Z, then Y. Returns the outward normal and the push distance
/// that leaves the centre `r` outside that face.
fn exit_through_nearest_face(wall: &Wall, p: Vec3, r: f32) -> (Vec3, f32) {
    let candidates = [
        (Vec3::NEG_X, p.x - wall.min.x),
        (Vec3::X, wall.max.x - p.x),
        (Vec3::NEG_Z, p.z - wall.min.z),
        (Vec3::Z, wall.max.z - p.z),
        (Vec3::NEG_Y, p.y - wall.min.y),
        (Vec3::Y, wall.max.y - p.y),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    (best.0, best.1.max(0.0) + r)
}

/// Keep the ball on top of a ramp it is rolling over. Returns whether it was lifted.
pub fn resolve_ramp(ball: &mut Ball, ramp: &Ramp) -> bool {
    let p = ball.position;
    if !ramp.covers(p.x, p.z) {
        return false;
    }
    let rest = ramp.surface_height(p.x, p.z) + ball.radius();
    if p.y <= rest {
        ball.position.y = rest;
        ball.velocity.y = ball.velocity.y.max(0.0);
        return true;
    }
    false
}

/// Off every ramp, a ball left hanging above the green drops back onto it.
fn settle_on_green(ball: &mut Ball, course: &Course) {
    let p = ball.position;
    if course.ramps().any(|r| r.covers(p.x, p.z)) {
        return;
    }
    let rest = course.ground_y + ball.radius();
    if p.y > rest {
        ball.position.y = rest;
        ball.velocity.y = 0.0;
    }
}

/// Hard boundary: clamp inside the field and bounce the offending component.
pub fn contain_in_bounds(ball: &mut Ball, bounds: &FieldBounds, bounce: f32) {
    let r = ball.radius();
    let p = &mut ball.position;
    let v = &mut ball.velocity;

    if p.x - r < bounds.min.x {
        p.x = bounds.min.x + r;
        v.x = v.x.abs() * bounce;
    } else if p.x + r > bounds.max.x {
        p.x = bounds.max.x - r;
        v.x = -v.x.abs() * bounce;
    }

    if p.z - r < bounds.min.y {
        p.z = bounds.min.y + r;
        v.z = v.z.abs() * bounce;
    } else if p.z + r > bounds.max.y {
        p.z = bounds.max.y - r;
        v.z = -v.z.abs() * bounce;
    }
}

/// Soft boundary: flag and stop a ball whose centre left the field or fell
/// below `floor_y`. Returns whether it did.
pub fn flag_out_of_bounds(ball: &mut Ball, bounds: &FieldBounds, floor_y: f32) -> bool {
    let p = ball.position;
    if bounds.contains_xz(p.x, p.z) && p.y >= floor_y {
        return false;
    }
    tracing::debug!(position = ?p, "Ball out of bounds");
    ball.out_of_bounds = true;
    ball.halt();
    true
}

/// Sink, pull toward the centre, or ignore, depending on distance and speed.
pub fn check_hole(ball: &mut Ball, course: &Course, cfg: &HoleConfig) -> HoleOutcome {
    hole_response(ball, course, cfg, 1.0)
}

/// [`check_hole`] with the rim pull scaled by `pull_scale`, so a frame split
/// into sub-steps pulls as hard as an unsplit one.
fn hole_response(
    ball: &mut Ball,
    course: &Course,
    cfg: &HoleConfig,
    pull_scale: f32,
) -> HoleOutcome {
    let offset = course.hole_offset(ball.position);
    let dist = offset.length();
    if dist >= course.hole.radius || ball.speed() >= cfg.capture_speed {
        return HoleOutcome::Clear;
    }

    if dist < course.hole.radius * cfg.capture_factor {
        ball.in_hole = true;
        ball.halt();
        ball.position.y -= cfg.sink_drop;
        tracing::debug!(dist, "Ball sunk");
        return HoleOutcome::Sunk;
    }

    let pull = cfg.pull_strength * pull_scale;
    ball.velocity.x -= offset.x * pull;
    ball.velocity.z -= offset.y * pull;
    HoleOutcome::Pulled
}
