//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and keeps the
//! board cursor that turns those actions into tile indices.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, should_quit};
