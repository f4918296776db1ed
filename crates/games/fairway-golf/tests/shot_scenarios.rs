//! Whole-hole scenarios driven only through the public game API, the way a
//! host would: input calls, then `update` once per frame.

use glam::Vec3;

use fairway_core::game_trait::{FairwayGame, GameEvent};
use fairway_golf::MiniGolf;
use fairway_golf::config::{GolfConfig, StrokeConfig};
use fairway_golf::course::open_green;
use fairway_golf::scoring::{BestScore, score_name};
use fairway_golf::stroke::StrokePhase;

const DT: f32 = 1.0 / 60.0;

/// Distance a ball covers per unit of launch speed at 60 fps with the default
/// per-frame friction of 0.985.
const PER_FRAME_REACH: f32 = 0.985 / 0.015 / 60.0;

/// Same, for the table's continuous friction (rate 1.8).
fn continuous_reach() -> f32 {
    let decay = (-1.8f32 * DT).exp();
    decay / (1.0 - decay) * DT
}

/// Turn to face `target` from wherever the ball sits.
fn face(game: &mut MiniGolf, target: Vec3) {
    let from = game.ball_position();
    let angle = (target.x - from.x).atan2(target.z - from.z);
    assert!(game.rotate_aim_discrete(angle - game.aim_angle()));
}

/// Slingshot along the current aim with `power`: pull back directly away from it.
fn drag_shot(game: &mut MiniGolf, power: f32) -> bool {
    let (sin, cos) = game.aim_angle().sin_cos();
    let len = power * game.config().stroke.drag_scale;
    assert!(game.begin_charge(400.0, 300.0));
    game.update_charge(400.0 + sin * len, 300.0 - cos * len);
    game.release_charge()
}

/// Run frames until the ball stops, collecting events.
fn play_out(game: &mut MiniGolf) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..5000 {
        events.extend(game.update(DT));
        if !game.is_moving() {
            return events;
        }
    }
    panic!("ball still moving after 5000 frames");
}

#[test]
fn walled_green_played_out_with_drag_shots() {
    let mut game = MiniGolf::new();
    let hole = game.course().hole.position;
    let power_max = game.config().stroke.power_max;
    let max_force = game.config().stroke.max_force;

    let mut events = Vec::new();
    for _ in 0..6 {
        face(&mut game, hole);
        let dist = game.course().hole_distance(game.ball_position());
        let speed = (dist + 0.2) / PER_FRAME_REACH;
        let power = (speed / max_force * power_max).clamp(6.0, power_max);
        assert!(drag_shot(&mut game, power));
        events.extend(play_out(&mut game));
        if game.is_finished() {
            break;
        }
    }

    assert!(game.is_finished(), "ball at {:?}", game.ball_position());
    let strokes = game.stroke_count();
    assert!(strokes <= 3, "took {strokes} strokes");
    assert!(events.contains(&GameEvent::HoleCompleted { strokes, par: 3 }));
    assert!(!game.is_moving());
}

#[test]
fn ramp_table_played_out_with_hold_shots() {
    let mut game = MiniGolf::for_course_index(2);
    let hole = game.course().hole.position;
    let cfg = game.config().stroke.clone();

    for _ in 0..4 {
        face(&mut game, hole);
        let dist = game.course().hole_distance(game.ball_position());
        // Launch speed equals power on the table's 30-point scale
        let power = ((dist + 0.1) / continuous_reach()).min(cfg.power_max);
        let frames = (power / (cfg.hold_gain_rate * DT)).ceil() as usize;

        assert!(game.begin_hold());
        for _ in 0..frames {
            assert!(game.update(DT).is_empty());
        }
        assert_eq!(game.phase(), StrokePhase::Charging);
        assert!(game.release_charge());
        play_out(&mut game);
        if game.is_finished() {
            break;
        }
    }

    assert!(game.is_finished(), "ball at {:?}", game.ball_position());
    assert!(game.stroke_count() <= 2);
}

#[test]
fn rolling_off_open_green_costs_a_stroke() {
    let config = GolfConfig {
        stroke: StrokeConfig {
            max_force: 40.0,
            ..StrokeConfig::default()
        },
        ..GolfConfig::default()
    };
    let mut game = MiniGolf::with_course(open_green(), config);
    let spawn = game.course().spawn_point;

    assert!(game.rotate_aim_discrete(std::f32::consts::FRAC_PI_2));
    assert!(drag_shot(&mut game, 100.0));
    let events = play_out(&mut game);

    assert!(events.contains(&GameEvent::OutOfBounds { penalty: 1 }));
    assert_eq!(game.stroke_count(), 2);
    assert_eq!(game.ball_position(), spawn);
    assert_eq!(game.phase(), StrokePhase::Idle);
}

#[test]
fn applied_snapshot_replays_identically() {
    let mut a = MiniGolf::new();
    assert!(a.rotate_aim_discrete(0.4));
    assert!(drag_shot(&mut a, 80.0));
    for _ in 0..20 {
        a.update(DT);
    }

    let mut b = MiniGolf::new();
    b.apply_state(&a.serialize_state());
    for _ in 0..300 {
        assert_eq!(a.update(DT), b.update(DT));
    }
    assert_eq!(a.serialize_state(), b.serialize_state());
}

#[test]
fn toml_rules_change_penalties() {
    let config = GolfConfig::from_toml_str(
        r#"
        [rules]
        retee_penalty = 2
        "#,
    )
    .unwrap();
    let mut game = MiniGolf::with_course(open_green(), config);
    assert!(game.quick_shot());
    assert!(game.retee());
    assert_eq!(game.stroke_count(), 3);
}

#[test]
fn finished_hole_feeds_best_score() {
    let mut game = MiniGolf::new();
    let hole = game.course().hole.position;
    let mut best = "none".parse::<BestScore>().unwrap();

    for _ in 0..6 {
        face(&mut game, hole);
        let dist = game.course().hole_distance(game.ball_position());
        let power = ((dist + 0.2) / PER_FRAME_REACH / 15.0 * 100.0).clamp(6.0, 100.0);
        drag_shot(&mut game, power);
        for event in play_out(&mut game) {
            if let GameEvent::HoleCompleted { strokes, .. } = event {
                best.record(strokes);
            }
        }
        if game.is_finished() {
            break;
        }
    }

    let strokes = game.stroke_count();
    assert_eq!(best.get(), Some(strokes));
    assert!(!score_name(strokes, game.course().par).is_empty());

    game.request_reset();
    assert_eq!(game.stroke_count(), 0);
    assert!(!game.is_finished());
}
