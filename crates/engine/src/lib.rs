//! Session driver - wall-clock time, deferred rollbacks and game lifecycle
//!
//! The core crate is pure; this crate is where time enters. Nothing here spawns
//! threads or sleeps: the host loop passes `Instant::now()` into every call and
//! asks [`GameSession::next_wakeup`] how long it may block on input.
//!
//! # Module Structure
//!
//! - [`clock`]: Countdown measured from a start instant, with catch-up after stalls
//! - [`scheduler`]: Deferred work tagged with the generation that queued it
//! - [`session`]: One game at a time, restarted under a fresh generation
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tui_memory_engine::{GameSession, SessionEvent};
//! use tui_memory_engine::core::GameConfig;
//! use tui_memory_engine::types::GameStatus;
//!
//! let mut session = GameSession::new(&GameConfig::default(), 7).unwrap();
//! let t0 = Instant::now();
//! let generation = session.init_game(t0);
//! assert_eq!(session.take_event(), Some(SessionEvent::Started { generation }));
//!
//! session.poll(t0 + Duration::from_secs(125));
//! assert_eq!(session.status(), GameStatus::LostTime);
//! assert!(matches!(session.take_event(), Some(SessionEvent::Ended(_))));
//! ```

pub mod clock;
pub mod scheduler;
pub mod session;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use clock::{ClockTick, CountdownClock};
pub use scheduler::{Scheduled, Scheduler, TaskId};
pub use session::{Deferred, GameSession, SessionEvent};
