//! Report module - lead and score submissions
//!
//! The game never waits on a submission. [`Reporter`] queues payloads onto a
//! background worker and logs delivery failures at `warn`; nothing flows back
//! into game state.
//!
//! # Submissions
//!
//! - **lead**: sent once, when the player's details are known
//! - **score**: sent once per finished session (deduplicated by generation)
//!
//! # Environment Variables
//!
//! - `MEMORY_REPORT_PATH`: Append submissions as JSON lines to this file
//! - `MEMORY_REPORT_DISABLED`: Set to "1" or "true" to drop all submissions
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_memory_report::{LeadForm, NullSubmitter, Reporter};
//!
//! let user = LeadForm::new("Asha", "9876543210").validate().unwrap();
//! let mut reporter = Reporter::start(NullSubmitter).unwrap();
//! reporter.submit_lead(user);
//! let summary = reporter.shutdown(Duration::from_secs(1));
//! assert_eq!(summary.delivered, 1);
//! ```

pub mod runtime;
pub mod submission;
pub mod user;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use runtime::{ReportSummary, Reporter, ReporterConfig};
pub use submission::{JsonLinesSubmitter, NullSubmitter, Submission, Submitter};
pub use user::{LeadError, LeadForm, User};
