//! TUI Memory (workspace facade crate).
//!
//! Re-exports the member crates under `tui_memory::{core,engine,input,report,types}`
//! and hosts the pieces only the terminal runner needs: argument parsing, the
//! text view and the terminal writer.

pub mod cli;
pub mod term;
pub mod view;

pub use tui_memory_core as core;
pub use tui_memory_engine as engine;
pub use tui_memory_input as input;
pub use tui_memory_report as report;
pub use tui_memory_types as types;
