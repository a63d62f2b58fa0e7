//! Game state module - the flip state machine and end evaluator
//!
//! A `GameState` belongs to exactly one generation. It is created by
//! [`GameState::start`] and only ever mutated through [`GameState::flip_tile`],
//! [`GameState::resolve_mismatch`] and [`GameState::tick`]. The latter two carry
//! the generation they were scheduled under and do nothing if it differs.
//!
//! Illegal actions (flipping a face-up tile, flipping while locked, flipping
//! after the session ended) are expected under normal input races and are
//! ignored rather than reported as errors.

use arrayvec::ArrayVec;

use crate::config::Rules;
use crate::deck::Tile;
use crate::snapshot::GameSnapshot;
use crate::types::{EndReason, GameStatus, Generation};

/// Why a flip was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotPlaying,
    Locked,
    OutOfRange,
    AlreadyFaceUp,
    PairPending,
    FlipBudgetSpent,
}

/// Result of a flip attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed
    Ignored(IgnoreReason),
    /// First tile of a pair turned face up
    Revealed,
    /// Second tile completed a pair
    Matched { first: usize, second: usize },
    /// Second tile did not match; the board is locked until the pair is hidden again
    Mismatched { first: usize, second: usize },
}

impl FlipOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    rules: Rules,
    tiles: Vec<Tile>,
    /// Face-up tiles of the pair being formed.
    pending: ArrayVec<usize, 2>,
    matched_pairs: usize,
    flips_count: u32,
    time_remaining: u32,
    /// Frozen when the session ends.
    elapsed_seconds: Option<u32>,
    locked: bool,
    status: GameStatus,
    generation: Generation,
    /// End transition not yet consumed by the session driver.
    end_event: Option<EndReason>,
}

impl GameState {
    /// State before the first session: no tiles, nothing accepted
    pub fn idle(rules: Rules) -> Self {
        Self {
            rules,
            tiles: Vec::new(),
            pending: ArrayVec::new(),
            matched_pairs: 0,
            flips_count: 0,
            time_remaining: rules.game_duration_secs,
            elapsed_seconds: None,
            locked: false,
            status: GameStatus::Idle,
            generation: Generation::default(),
            end_event: None,
        }
    }

    /// Start a session on `tiles` under `generation`
    pub fn start(rules: Rules, tiles: Vec<Tile>, generation: Generation) -> Self {
        debug_assert_eq!(tiles.len(), rules.tile_count());
        Self {
            tiles,
            status: GameStatus::Playing,
            generation,
            ..Self::idle(rules)
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn pending_flips(&self) -> &[usize] {
        &self.pending
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn flips_count(&self) -> u32 {
        self.flips_count
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn elapsed_seconds(&self) -> Option<u32> {
        self.elapsed_seconds
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Final score: the number of matched pairs
    pub fn score(&self) -> usize {
        self.matched_pairs
    }

    fn flip_precondition(&self, index: usize) -> Option<IgnoreReason> {
        if self.status != GameStatus::Playing {
            return Some(IgnoreReason::NotPlaying);
        }
        if self.locked {
            return Some(IgnoreReason::Locked);
        }
        let Some(tile) = self.tiles.get(index) else {
            return Some(IgnoreReason::OutOfRange);
        };
        if tile.is_face_up() {
            return Some(IgnoreReason::AlreadyFaceUp);
        }
        if self.pending.is_full() {
            return Some(IgnoreReason::PairPending);
        }
        if self.flips_count >= self.rules.max_flips {
            return Some(IgnoreReason::FlipBudgetSpent);
        }
        None
    }

    /// Turn the tile at `index` face up
    ///
    /// A matching second tile resolves immediately. A mismatching one locks the
    /// board; the caller is expected to schedule [`GameState::resolve_mismatch`]
    /// after the mismatch delay.
    pub fn flip_tile(&mut self, index: usize) -> FlipOutcome {
        if let Some(reason) = self.flip_precondition(index) {
            tracing::trace!(index, ?reason, generation = %self.generation, "flip ignored");
            return FlipOutcome::Ignored(reason);
        }

        self.tiles[index].is_flipped = true;
        self.flips_count += 1;
        self.pending.push(index);

        let pair = self
            .pending
            .is_full()
            .then(|| (self.pending[0], self.pending[1]));

        let outcome = match pair {
            Some((first, second)) => {
                if self.tiles[first].pairs_with(&self.tiles[second]) {
                    self.tiles[first].is_matched = true;
                    self.tiles[second].is_matched = true;
                    self.matched_pairs += 1;
                    self.pending.clear();
                    FlipOutcome::Matched { first, second }
                } else {
                    self.locked = true;
                    FlipOutcome::Mismatched { first, second }
                }
            }
            None => FlipOutcome::Revealed,
        };

        self.evaluate_end();
        outcome
    }

    /// Turn a mismatched pair face down again and unlock the board
    ///
    /// Returns false (and changes nothing) when `generation` is stale or there
    /// is no mismatch waiting.
    pub fn resolve_mismatch(&mut self, generation: Generation) -> bool {
        if generation != self.generation || !self.locked {
            return false;
        }

        for &index in &self.pending {
            let tile = &mut self.tiles[index];
            if !tile.is_matched {
                tile.is_flipped = false;
            }
        }
        self.pending.clear();
        self.locked = false;

        self.evaluate_end();
        true
    }

    /// Advance the countdown by `elapsed_secs` whole seconds
    ///
    /// Returns false (and changes nothing) when `generation` is stale or the
    /// session is not running.
    pub fn tick(&mut self, generation: Generation, elapsed_secs: u32) -> bool {
        if generation != self.generation || self.status != GameStatus::Playing || elapsed_secs == 0
        {
            return false;
        }

        self.time_remaining = self.time_remaining.saturating_sub(elapsed_secs);
        self.evaluate_end();
        true
    }

    /// Apply the end rules in priority order: all pairs, flip budget, time
    ///
    /// Only a playing session can end; a terminal status is never replaced.
    pub fn evaluate_end(&mut self) -> Option<EndReason> {
        if self.status != GameStatus::Playing {
            return None;
        }

        let reason = if self.matched_pairs == self.rules.total_pairs {
            EndReason::Won
        } else if self.flips_count >= self.rules.max_flips {
            EndReason::OutOfFlips
        } else if self.time_remaining == 0 {
            EndReason::OutOfTime
        } else {
            return None;
        };

        let duration = self.rules.game_duration_secs;
        self.elapsed_seconds = Some(match reason {
            EndReason::OutOfTime => duration,
            EndReason::Won | EndReason::OutOfFlips => duration - self.time_remaining,
        });
        self.status = reason.status();
        self.end_event = Some(reason);
        Some(reason)
    }

    /// Take and clear the pending end transition.
    pub fn take_end_event(&mut self) -> Option<EndReason> {
        self.end_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clone_from(&self.tiles);
        out.pending_flips = self.pending.clone();
        out.matched_pairs = self.matched_pairs;
        out.total_pairs = self.rules.total_pairs;
        out.flips_count = self.flips_count;
        out.max_flips = self.rules.max_flips;
        out.time_remaining = self.time_remaining;
        out.elapsed_seconds = self.elapsed_seconds;
        out.is_locked = self.locked;
        out.status = self.status;
        out.generation = self.generation;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::deck_from_layout;
    use crate::types::ICONS;

    /// Pairs sit at (0,5), (1,6), (2,10), (3,11), (4,12), (7,13), (8,14), (9,15).
    const LAYOUT: [&str; 16] = [
        "shield", "heart", "family", "umbrella", "home", "shield", "heart", "medical", "savings",
        "policy", "family", "umbrella", "home", "medical", "savings", "policy",
    ];

    const PAIRS: [(usize, usize); 8] = [
        (0, 5),
        (1, 6),
        (2, 10),
        (3, 11),
        (4, 12),
        (7, 13),
        (8, 14),
        (9, 15),
    ];

    fn started() -> GameState {
        let tiles = deck_from_layout(&ICONS, &LAYOUT).unwrap();
        GameState::start(Rules::default(), tiles, Generation::new(1))
    }

    #[test]
    fn test_idle_state_ignores_flips() {
        let mut state = GameState::idle(Rules::default());

        assert_eq!(state.status(), GameStatus::Idle);
        assert!(state.tiles().is_empty());
        assert_eq!(
            state.flip_tile(0),
            FlipOutcome::Ignored(IgnoreReason::NotPlaying)
        );
        assert_eq!(state.flips_count(), 0);
    }

    #[test]
    fn test_start_state() {
        let state = started();

        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.tiles().len(), 16);
        assert_eq!(state.time_remaining(), 120);
        assert_eq!(state.elapsed_seconds(), None);
        assert!(state.pending_flips().is_empty());
        assert!(!state.is_locked());
    }

    #[test]
    fn test_first_flip_reveals() {
        let mut state = started();

        assert_eq!(state.flip_tile(3), FlipOutcome::Revealed);
        assert!(state.tile(3).unwrap().is_flipped);
        assert_eq!(state.flips_count(), 1);
        assert_eq!(state.pending_flips(), &[3]);
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut state = started();

        state.flip_tile(0);
        assert_eq!(
            state.flip_tile(5),
            FlipOutcome::Matched {
                first: 0,
                second: 5
            }
        );

        assert_eq!(state.matched_pairs(), 1);
        assert_eq!(state.flips_count(), 2);
        assert!(state.tile(0).unwrap().is_matched);
        assert!(state.tile(5).unwrap().is_matched);
        assert!(state.pending_flips().is_empty());
        assert!(!state.is_locked());
    }

    #[test]
    fn test_mismatch_locks_until_resolved() {
        let mut state = started();

        state.flip_tile(0);
        assert_eq!(
            state.flip_tile(1),
            FlipOutcome::Mismatched {
                first: 0,
                second: 1
            }
        );
        assert!(state.is_locked());
        assert_eq!(state.flips_count(), 2);

        // Locked board ignores further flips.
        assert_eq!(
            state.flip_tile(2),
            FlipOutcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(state.flips_count(), 2);

        assert!(state.resolve_mismatch(Generation::new(1)));
        assert!(!state.is_locked());
        assert!(state.pending_flips().is_empty());
        assert!(!state.tile(0).unwrap().is_flipped);
        assert!(!state.tile(1).unwrap().is_flipped);

        // Nothing left to resolve.
        assert!(!state.resolve_mismatch(Generation::new(1)));
    }

    #[test]
    fn test_stale_rollback_is_ignored() {
        let mut state = started();
        state.flip_tile(0);
        state.flip_tile(1);

        assert!(!state.resolve_mismatch(Generation::new(0)));
        assert!(state.is_locked());
        assert!(state.tile(0).unwrap().is_flipped);
    }

    #[test]
    fn test_face_up_tiles_are_noops() {
        let mut state = started();
        state.flip_tile(0);
        state.flip_tile(5);

        for index in [0, 5] {
            assert_eq!(
                state.flip_tile(index),
                FlipOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
            );
        }

        state.flip_tile(2);
        assert_eq!(
            state.flip_tile(2),
            FlipOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(state.flips_count(), 3);
        assert_eq!(state.matched_pairs(), 1);
        assert_eq!(state.pending_flips(), &[2]);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut state = started();
        assert_eq!(
            state.flip_tile(16),
            FlipOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(state.flips_count(), 0);
    }

    #[test]
    fn test_win_on_last_pair() {
        let mut state = started();
        for &(a, b) in &PAIRS[..7] {
            state.flip_tile(a);
            state.flip_tile(b);
        }
        assert_eq!(state.matched_pairs(), 7);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.take_end_event(), None);

        state.flip_tile(9);
        state.flip_tile(15);

        assert_eq!(state.matched_pairs(), 8);
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.elapsed_seconds(), Some(0));
        assert_eq!(state.take_end_event(), Some(EndReason::Won));
        assert_eq!(state.take_end_event(), None);
    }

    #[test]
    fn test_flip_budget_exhaustion() {
        let mut state = started();
        let generation = state.generation();

        // 15 mismatches = 30 flips.
        for _ in 0..15 {
            state.flip_tile(0);
            state.flip_tile(1);
            state.resolve_mismatch(generation);
        }

        assert_eq!(state.flips_count(), 30);
        assert_eq!(state.status(), GameStatus::LostFlips);
        assert_eq!(state.take_end_event(), Some(EndReason::OutOfFlips));
        assert_eq!(
            state.flip_tile(2),
            FlipOutcome::Ignored(IgnoreReason::NotPlaying)
        );
    }

    #[test]
    fn test_winning_on_last_flip_beats_budget() {
        let rules = Rules {
            max_flips: 16,
            ..Rules::default()
        };
        let tiles = deck_from_layout(&ICONS, &LAYOUT).unwrap();
        let mut state = GameState::start(rules, tiles, Generation::new(1));

        for &(a, b) in &PAIRS {
            state.flip_tile(a);
            state.flip_tile(b);
        }

        assert_eq!(state.flips_count(), 16);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_tick_counts_down_and_expires() {
        let mut state = started();
        let generation = state.generation();

        assert!(state.tick(generation, 1));
        assert_eq!(state.time_remaining(), 119);

        // Catch-up delta after a suspension.
        assert!(state.tick(generation, 30));
        assert_eq!(state.time_remaining(), 89);

        assert!(state.tick(generation, 500));
        assert_eq!(state.time_remaining(), 0);
        assert_eq!(state.status(), GameStatus::LostTime);
        assert_eq!(state.elapsed_seconds(), Some(120));

        assert!(!state.tick(generation, 1));
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut state = started();
        assert!(!state.tick(Generation::new(0), 5));
        assert!(!state.tick(Generation::new(2), 5));
        assert!(!state.tick(state.generation(), 0));
        assert_eq!(state.time_remaining(), 120);
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut state = started();
        let generation = state.generation();
        state.tick(generation, 120);
        assert_eq!(state.status(), GameStatus::LostTime);

        assert!(state.flip_tile(0).is_ignored());
        assert_eq!(state.evaluate_end(), None);
        assert_eq!(state.status(), GameStatus::LostTime);
    }

    #[test]
    fn test_elapsed_freezes_on_win() {
        let mut state = started();
        let generation = state.generation();
        state.tick(generation, 42);

        for &(a, b) in &PAIRS {
            state.flip_tile(a);
            state.flip_tile(b);
        }

        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.elapsed_seconds(), Some(42));

        // A late tick does not move anything.
        assert!(!state.tick(generation, 10));
        assert_eq!(state.time_remaining(), 78);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = started();
        state.flip_tile(4);

        let snap = state.snapshot();
        assert_eq!(snap.tiles.len(), 16);
        assert!(snap.tiles[4].is_flipped);
        assert_eq!(snap.pending_flips.as_slice(), &[4]);
        assert_eq!(snap.flips_count, 1);
        assert_eq!(snap.max_flips, 30);
        assert_eq!(snap.total_pairs, 8);
        assert_eq!(snap.status, GameStatus::Playing);
        assert_eq!(snap.generation, Generation::new(1));
    }
}
