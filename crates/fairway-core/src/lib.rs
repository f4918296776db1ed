pub mod game_trait;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{FairwayGame, GameEvent};

    /// Run N frames of `dt` seconds each, returning all accumulated events.
    pub fn run_frames(game: &mut dyn FairwayGame, n: usize, dt: f32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Run frames until nothing is moving. Returns the number of frames taken,
    /// or `None` if still moving after `max_frames`.
    pub fn run_until_settled(
        game: &mut dyn FairwayGame,
        max_frames: usize,
        dt: f32,
    ) -> Option<usize> {
        for frame in 0..max_frames {
            if !game.is_in_motion() {
                return Some(frame);
            }
            game.update(dt);
        }
        (!game.is_in_motion()).then_some(max_frames)
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn FairwayGame, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every FairwayGame implementation must pass these. Game crates call
    // them from their own #[cfg(test)] modules with a concrete instance.

    /// A freshly constructed game must serialize to non-empty bytes.
    pub fn contract_fresh_state_serializes(game: &dyn FairwayGame) {
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes"
        );
    }

    /// update() on a game at rest must not change state.
    pub fn contract_idle_update_is_noop(game: &mut dyn FairwayGame) {
        assert!(!game.is_in_motion(), "contract requires a game at rest");
        let before = game.serialize_state();
        game.update(0.1);
        assert_eq!(
            before,
            game.serialize_state(),
            "update() at rest must not change state"
        );
    }

    /// serialize_state → apply_state must reproduce identical bytes.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn FairwayGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply roundtrip"
        );
    }

    /// apply_state() with garbage bytes must leave state untouched.
    pub fn contract_malformed_state_ignored(game: &mut dyn FairwayGame) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(
            before,
            game.serialize_state(),
            "Malformed state must be ignored"
        );
    }

    /// pause() must freeze a moving game, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn FairwayGame) {
        assert!(game.is_in_motion(), "contract requires a game in motion");
        game.pause();
        let before = game.serialize_state();
        game.update(0.05);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(0.05);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// request_reset() twice must equal request_reset() once.
    pub fn contract_reset_idempotent(game: &mut dyn FairwayGame) {
        game.request_reset();
        let once = game.serialize_state();
        game.request_reset();
        let twice = game.serialize_state();
        assert_eq!(once, twice, "request_reset() must be idempotent");
        assert!(!game.is_in_motion(), "Nothing may move after a reset");
        assert!(!game.is_round_complete(), "Reset must reopen the round");
    }

    /// A moving game must settle within `max_frames` at the maximum frame step.
    pub fn contract_motion_settles(game: &mut dyn FairwayGame, max_frames: usize) {
        let dt = game.max_frame_dt();
        assert!(
            run_until_settled(game, max_frames, dt).is_some(),
            "Game must come to rest within {max_frames} frames"
        );
    }
}
