use arrayvec::ArrayVec;

use crate::deck::Tile;
use crate::scoring::{hint_for, is_flips_warning, is_time_warning, progress_percent};
use crate::types::{GameStatus, Generation, GAME_DURATION_SECS, MAX_FLIPS, TOTAL_PAIRS};

/// Read-only copy of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub tiles: Vec<Tile>,
    pub pending_flips: ArrayVec<usize, 2>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub flips_count: u32,
    pub max_flips: u32,
    pub time_remaining: u32,
    pub elapsed_seconds: Option<u32>,
    pub is_locked: bool,
    pub status: GameStatus,
    pub generation: Generation,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.pending_flips.clear();
        self.matched_pairs = 0;
        self.total_pairs = TOTAL_PAIRS;
        self.flips_count = 0;
        self.max_flips = MAX_FLIPS;
        self.time_remaining = GAME_DURATION_SECS;
        self.elapsed_seconds = None;
        self.is_locked = false;
        self.status = GameStatus::Idle;
        self.generation = Generation::default();
    }

    /// Accepting flips right now
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing && !self.is_locked
    }

    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.matched_pairs, self.total_pairs)
    }

    pub fn is_time_warning(&self) -> bool {
        is_time_warning(self.time_remaining)
    }

    pub fn is_flips_warning(&self) -> bool {
        is_flips_warning(self.flips_count, self.max_flips)
    }

    /// Hint line: a hurry-up notice while the clock is low, otherwise staged encouragement
    pub fn hint(&self) -> String {
        if self.status == GameStatus::Playing && self.is_time_warning() {
            format!("Hurry! Only {}s left!", self.time_remaining)
        } else {
            hint_for(self.matched_pairs, self.total_pairs).to_string()
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            tiles: Vec::new(),
            pending_flips: ArrayVec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            flips_count: 0,
            max_flips: 0,
            time_remaining: 0,
            elapsed_seconds: None,
            is_locked: false,
            status: GameStatus::Idle,
            generation: Generation::default(),
        };
        s.clear();
        s
    }
}
