//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and scoring.
//! It has **no dependencies** on terminals, clocks, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same deck
//! - **Testable**: Time is passed in as whole seconds, never read from the system
//! - **Portable**: Can run behind any front end (terminal, web view, headless)
//!
//! # Module Structure
//!
//! - [`config`]: Environment-driven configuration, validated into [`Rules`]
//! - [`deck`]: Tile type and deck generation (two tiles per catalog icon)
//! - [`game_state`]: Flip state machine and end-condition evaluator
//! - [`rng`]: Seedable RNG with unbiased Fisher-Yates shuffling
//! - [`scoring`]: Stars, messages, hints and the post-game [`ScoreCard`]
//! - [`snapshot`]: Read-only session copy for rendering
//!
//! # Game Rules
//!
//! - **Pairs**: Every icon appears on exactly two tiles
//! - **Flips**: Each revealed tile spends one flip from a budget of 30
//! - **Mismatch**: A non-matching pair stays face up for 700ms and locks the board
//! - **Clock**: 120 seconds, counted down from wall-clock time by the session driver
//! - **End**: All pairs (won), budget spent (out of flips), clock at zero (out of time)
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{deck_from_layout, FlipOutcome, GameState, Rules};
//! use tui_memory_core::types::{GameStatus, Generation, ICONS};
//!
//! let layout = [
//!     "shield", "heart", "family", "umbrella", "home", "shield", "heart", "medical",
//!     "savings", "policy", "family", "umbrella", "home", "medical", "savings", "policy",
//! ];
//! let tiles = deck_from_layout(&ICONS, &layout).unwrap();
//! let mut game = GameState::start(Rules::default(), tiles, Generation::new(1));
//!
//! game.flip_tile(0);
//! assert_eq!(game.flip_tile(5), FlipOutcome::Matched { first: 0, second: 5 });
//! assert_eq!(game.matched_pairs(), 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod config;
pub mod deck;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig, Rules};
pub use deck::{deck_from_layout, generate_deck, DeckError, Tile};
pub use game_state::{FlipOutcome, GameState, IgnoreReason};
pub use rng::SimpleRng;
pub use scoring::{
    format_time, hint_for, stars_for, MessageTable, ScoreCard, DEFAULT_MESSAGES,
};
pub use snapshot::GameSnapshot;
