use serde::{Deserialize, Serialize};

/// Core trait for a frame-driven Fairway simulation.
///
/// The host owns the frame loop, input wiring, and presentation;
/// the game only advances its own state and reports what happened.
pub trait FairwayGame {
    /// Game metadata for menus and the HUD.
    fn metadata(&self) -> GameMetadata;

    /// Advance the simulation by one frame. Returns the events produced this frame.
    fn update(&mut self, dt: f32) -> Vec<GameEvent>;

    /// Serialize the full simulation state (snapshots, replays, debugging).
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the simulation state with a previously serialized one.
    fn apply_state(&mut self, state: &[u8]);

    /// Restore the game to its initial pre-shot state.
    fn request_reset(&mut self);

    /// Whether anything is still moving (input is locked while true).
    fn is_in_motion(&self) -> bool;

    /// Largest delta time a single `update` will integrate, in seconds.
    fn max_frame_dt(&self) -> f32 {
        0.1
    }

    /// Freeze the simulation.
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    /// Whether the current hole/round is complete.
    fn is_round_complete(&self) -> bool;
}

/// Game metadata for menus and the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub par: u8,
    pub hole_count: u8,
}

/// Events emitted by a game during `update`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball came to rest and a new stroke may begin.
    BallAtRest,
    /// The ball left the field; it was returned to the tee with `penalty` strokes added.
    OutOfBounds { penalty: u32 },
    /// The ball dropped into the hole.
    HoleCompleted { strokes: u32, par: u8 },
    /// Non-finite state was detected and the ball was restored to its last rest position.
    Recovered,
}

/// Generates the `FairwayGame` methods that only shuffle the state struct around:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_round_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool` fields,
/// and `$StateType` to have a `round_complete: bool` field. The calling crate must
/// depend on `rmp-serde` and `tracing`.
#[macro_export]
macro_rules! fairway_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::debug!(error = %e, "Ignored malformed state snapshot"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_round_complete(&self) -> bool {
            self.state.round_complete
        }
    };
}
