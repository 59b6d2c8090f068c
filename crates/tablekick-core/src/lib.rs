pub mod events;
pub mod game_trait;
pub mod material;
pub mod music;
pub mod scene;
pub mod setup;
pub mod side;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::MatchEvent;
    use crate::game_trait::FoosballGame;
    use crate::setup::MatchSetup;
    use crate::side::{ControlType, Side};

    /// Setup with the given control types for the left and right team.
    pub fn make_setup(left: ControlType, right: ControlType) -> MatchSetup {
        let mut setup = MatchSetup::default();
        setup.left.control = left;
        setup.right.control = right;
        setup
    }

    /// Run N game ticks, returning all accumulated events.
    pub fn run_game_ticks(game: &mut dyn FoosballGame, n: usize, dt: f32) -> Vec<MatchEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn FoosballGame, before: &[u8]) {
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
    // Generic checks every FoosballGame implementation must pass. Game
    // crates call them from their own #[cfg(test)] modules.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn FoosballGame) {
        game.init(&MatchSetup::default());
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// apply_input() with valid data followed by update() must change state.
    pub fn contract_apply_input_changes_state(
        game: &mut dyn FoosballGame,
        valid_input: &[u8],
        side: Side,
    ) {
        let before = game.serialize_state();
        game.apply_input(side, valid_input);
        game.update(0.1);
        let after = game.serialize_state();
        assert_ne!(
            before, after,
            "State must change after apply_input + update"
        );
    }

    /// update() with dt>0 must advance the match clock.
    pub fn contract_update_advances_time(game: &mut dyn FoosballGame) {
        let before = game.serialize_state();
        game.update(1.0);
        let after = game.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance game state (clock)");
    }

    /// Running update() enough times must eventually complete the match.
    pub fn contract_match_eventually_completes(game: &mut dyn FoosballGame, max_ticks: usize) {
        for _ in 0..max_ticks {
            game.update(1.0);
            if game.is_match_complete() {
                assert!(
                    game.match_result().is_some(),
                    "A complete match must report a result"
                );
                return;
            }
        }
        assert!(
            game.is_match_complete(),
            "Match must complete after {max_ticks} ticks of 1s each"
        );
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn FoosballGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze the match, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn FoosballGame) {
        game.pause();
        let before = game.serialize_state();
        game.update(1.0);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(1.0);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }
}
