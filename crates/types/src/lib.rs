//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, session driver, terminal runner, reporter).
//!
//! # Board
//!
//! The board is built from the icon catalog: every icon appears on exactly two
//! tiles. With the default catalog of 8 icons the board has 16 tiles, laid out
//! as a 4x4 grid by the terminal runner.
//!
//! # Game Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TOTAL_PAIRS` | 8 | Pairs on the board (catalog size) |
//! | `MAX_FLIPS` | 30 | Flip budget per session |
//! | `GAME_DURATION_SECS` | 120 | Countdown length |
//! | `MISMATCH_DELAY_MS` | 700 | Time a mismatched pair stays face up |
//! | `TIME_WARNING_SECS` | 20 | Remaining time at which the clock turns to a warning |
//! | `FLIPS_WARNING_MARGIN` | 5 | Remaining flips at which the flip counter turns to a warning |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{EndReason, GameStatus, Generation, ICONS, TOTAL_PAIRS};
//!
//! assert_eq!(ICONS.len(), TOTAL_PAIRS);
//!
//! let first = Generation::default();
//! assert_eq!(first.next().value(), 1);
//!
//! assert!(GameStatus::LostTime.is_terminal());
//! assert_eq!(GameStatus::LostTime.end_reason(), Some(EndReason::OutOfTime));
//! assert_eq!(EndReason::from_str("flips"), Some(EndReason::OutOfFlips));
//! ```

use std::fmt;

/// Number of pairs on a default board (one per catalog icon)
pub const TOTAL_PAIRS: usize = ICONS.len();

/// Maximum number of tile flips per session
pub const MAX_FLIPS: u32 = 30;

/// Countdown length in seconds
pub const GAME_DURATION_SECS: u32 = 120;

/// Delay before a mismatched pair is turned back over (milliseconds)
pub const MISMATCH_DELAY_MS: u32 = 700;

/// The clock is shown as a warning at or below this many seconds
pub const TIME_WARNING_SECS: u32 = 20;

/// The flip counter is shown as a warning within this many flips of the budget
pub const FLIPS_WARNING_MARGIN: u32 = 5;

/// Columns of the board grid
pub const BOARD_COLUMNS: usize = 4;

/// One entry of the icon catalog.
///
/// `id` doubles as the pair id of the two tiles built from this icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Icon {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
}

impl Icon {
    pub const fn new(id: &'static str, label: &'static str, emoji: &'static str) -> Self {
        Self { id, label, emoji }
    }
}

/// Default icon catalog
pub const ICONS: [Icon; 8] = [
    Icon::new("family", "Life", "🫂"),
    Icon::new("shield", "Protect", "🛡️"),
    Icon::new("heart", "Health", "🩺"),
    Icon::new("umbrella", "Cover", "☂️"),
    Icon::new("home", "Home", "🏡"),
    Icon::new("medical", "Care", "🏥"),
    Icon::new("savings", "Grow", "💰"),
    Icon::new("policy", "Secure", "📝"),
];

/// Monotonic session token.
///
/// Incremented once per started session. Deferred work captures the generation
/// it was scheduled under and is discarded if the session has moved on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation that follows this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session status
///
/// Moves only `Idle -> Playing -> {Won | LostFlips | LostTime}`. The three
/// terminal states are final for their generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Won,
    LostFlips,
    LostTime,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        self.end_reason().is_some()
    }

    /// The end reason for a terminal status, `None` otherwise
    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            GameStatus::Idle | GameStatus::Playing => None,
            GameStatus::Won => Some(EndReason::Won),
            GameStatus::LostFlips => Some(EndReason::OutOfFlips),
            GameStatus::LostTime => Some(EndReason::OutOfTime),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::LostFlips => "lost_flips",
            GameStatus::LostTime => "lost_time",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// All pairs matched
    Won,
    /// Flip budget exhausted
    OutOfFlips,
    /// Countdown reached zero
    OutOfTime,
}

impl EndReason {
    /// Parse from the short wire name (`win`, `flips`, `time`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "win" => Some(EndReason::Won),
            "flips" => Some(EndReason::OutOfFlips),
            "time" => Some(EndReason::OutOfTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Won => "win",
            EndReason::OutOfFlips => "flips",
            EndReason::OutOfTime => "time",
        }
    }

    /// The terminal status this reason produces
    pub fn status(&self) -> GameStatus {
        match self {
            EndReason::Won => GameStatus::Won,
            EndReason::OutOfFlips => GameStatus::LostFlips,
            EndReason::OutOfTime => GameStatus::LostTime,
        }
    }

    /// Short notification shown when the session ends
    pub fn toast(&self) -> &'static str {
        match self {
            EndReason::Won => "🎉 You matched all pairs!",
            EndReason::OutOfFlips => "⚠️ Out of moves!",
            EndReason::OutOfTime => "⏰ Time's up!",
        }
    }
}

/// Player actions produced by input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the board cursor one column left
    CursorLeft,
    /// Move the board cursor one column right
    CursorRight,
    /// Move the board cursor one row up
    CursorUp,
    /// Move the board cursor one row down
    CursorDown,
    /// Flip the tile under the cursor
    Flip,
    /// Start a fresh session
    Restart,
}
