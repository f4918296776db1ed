use serde::Serialize;

use fairway_core::game_trait::{FairwayGame, GameEvent};
use fairway_core::time::FrameClock;
use fairway_golf::{MiniGolf, Snapshot};

use crate::args::{Aim, Shot};

/// Give up on a shot that is still rolling after this many frames.
const MAX_FRAMES_PER_SHOT: usize = 20_000;

/// Pointer origin for scripted drags; any point works.
const DRAG_ORIGIN: (f32, f32) = (400.0, 300.0);

/// What the run produced, printed as JSON at the end.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub shots_played: usize,
    pub frames: usize,
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

/// Play `shots` in order on a synthetic clock running at `fps`, stopping early
/// once the hole is complete.
pub fn play(game: &mut MiniGolf, shots: &[Shot], fps: u32) -> RunSummary {
    let mut clock = FrameClock::new(game.max_frame_dt());
    let frame_ms = 1000.0 / f64::from(fps.max(1));
    let mut now_ms = 0.0;
    clock.tick(now_ms);

    let mut shots_played = 0;
    let mut frames = 0;
    let mut events = Vec::new();

    for (index, shot) in shots.iter().enumerate() {
        if game.is_finished() {
            break;
        }
        if !take_shot(game, shot) {
            tracing::warn!(shot = index + 1, ?shot, "Shot refused");
            continue;
        }
        shots_played += 1;
        tracing::info!(
            shot = index + 1,
            angle = game.aim_angle().to_degrees(),
            strokes = game.stroke_count(),
            "Stroke"
        );

        let mut settled = false;
        for _ in 0..MAX_FRAMES_PER_SHOT {
            now_ms += frame_ms;
            let dt = clock.tick(now_ms);
            frames += 1;
            for event in game.update(dt) {
                tracing::info!(?event, frame = frames, "Game event");
                events.push(event);
            }
            if !game.is_in_motion() {
                settled = true;
                break;
            }
        }
        if !settled {
            tracing::warn!(shot = index + 1, "Ball still moving, moving on");
        }
        let p = game.ball_position();
        tracing::debug!(x = p.x, y = p.y, z = p.z, "Ball position after shot");
    }

    RunSummary {
        shots_played,
        frames,
        events,
        snapshot: game.snapshot(),
    }
}

/// Aim, then slingshot with the shot's power by dragging directly away from the aim.
fn take_shot(game: &mut MiniGolf, shot: &Shot) -> bool {
    let target = match shot.aim {
        Aim::Degrees(deg) => deg.to_radians(),
        Aim::Hole => {
            let from = game.ball_position();
            let hole = game.course().hole.position;
            (hole.x - from.x).atan2(hole.z - from.z)
        },
    };
    if !game.rotate_aim_discrete(target - game.aim_angle()) {
        return false;
    }

    let (sin, cos) = game.aim_angle().sin_cos();
    let len = shot.power * game.config().stroke.drag_scale;
    let (ox, oy) = DRAG_ORIGIN;
    if !game.begin_charge(ox, oy) {
        return false;
    }
    game.update_charge(ox + sin * len, oy - cos * len);
    game.release_charge()
}
