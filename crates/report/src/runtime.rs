//! Reporter runtime integration.
//!
//! Bridges the sync game loop with a background delivery worker. The game loop
//! only ever pushes into an unbounded channel; delivery, and any failure of it,
//! happens on a blocking task owned by a private tokio runtime.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::ScoreCard;
use crate::submission::{JsonLinesSubmitter, NullSubmitter, Submission, Submitter};
use crate::types::Generation;
use crate::user::User;

pub const ENV_REPORT_PATH: &str = "MEMORY_REPORT_PATH";
pub const ENV_REPORT_DISABLED: &str = "MEMORY_REPORT_DISABLED";

/// Reporter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterConfig {
    /// JSON-lines sink; submissions are dropped when unset.
    pub path: Option<PathBuf>,
    pub disabled: bool,
}

impl ReporterConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(ENV_REPORT_PATH)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let disabled = lookup(ENV_REPORT_DISABLED)
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self { path, disabled }
    }
}

/// Delivery counts reported by the worker on shutdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub delivered: usize,
    pub failed: usize,
}

struct Worker {
    // Declared first so the channel closes before the runtime is dropped.
    tx: mpsc::UnboundedSender<Submission>,
    handle: JoinHandle<ReportSummary>,
    rt: Runtime,
}

/// Fire-and-forget submission front end
pub struct Reporter {
    worker: Option<Worker>,
    user: Option<User>,
    last_scored: Option<Generation>,
}

impl Reporter {
    /// Start a worker delivering into `submitter`
    pub fn start<S: Submitter>(mut submitter: S) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("create reporter runtime")?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Submission>();

        let handle = rt.spawn_blocking(move || {
            let mut summary = ReportSummary::default();
            while let Some(submission) = rx.blocking_recv() {
                match submitter.submit(&submission) {
                    Ok(()) => {
                        summary.delivered += 1;
                        tracing::debug!(kind = submission.kind(), "submission delivered");
                    }
                    Err(err) => {
                        summary.failed += 1;
                        tracing::warn!(kind = submission.kind(), error = %err, "submission failed");
                    }
                }
            }
            summary
        });

        Ok(Self {
            worker: Some(Worker { tx, handle, rt }),
            user: None,
            last_scored: None,
        })
    }

    /// A reporter that remembers the user but delivers nothing
    pub fn disabled() -> Self {
        Self {
            worker: None,
            user: None,
            last_scored: None,
        }
    }

    /// Start the reporter described by `config`
    pub fn from_config(config: &ReporterConfig) -> anyhow::Result<Self> {
        if config.disabled {
            tracing::debug!("reporter disabled");
            return Ok(Self::disabled());
        }
        match &config.path {
            Some(path) => Self::start(JsonLinesSubmitter::open(path)?),
            None => Self::start(NullSubmitter),
        }
    }

    /// Start the reporter from environment variables
    pub fn start_from_env() -> anyhow::Result<Self> {
        Self::from_config(&ReporterConfig::from_env())
    }

    pub fn is_enabled(&self) -> bool {
        self.worker.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Record the player and queue their lead
    pub fn submit_lead(&mut self, user: User) {
        self.send(Submission::lead(&user));
        self.user = Some(user);
    }

    /// Queue the result of a finished session
    ///
    /// Returns false when nothing was queued: no player is known, this
    /// generation was already reported, or the reporter is disabled.
    pub fn submit_score(&mut self, card: &ScoreCard) -> bool {
        let Some(user) = self.user.as_ref() else {
            tracing::debug!(generation = %card.generation, "no player, score not submitted");
            return false;
        };
        if self.last_scored == Some(card.generation) {
            return false;
        }

        let submission = Submission::score(
            user,
            card.score,
            card.flips_count,
            card.elapsed_seconds,
            card.generation.value(),
        );
        self.last_scored = Some(card.generation);
        self.send(submission);
        self.is_enabled()
    }

    fn send(&self, submission: Submission) {
        if let Some(worker) = &self.worker {
            if worker.tx.send(submission).is_err() {
                tracing::warn!("reporter worker is gone");
            }
        }
    }

    /// Close the queue and wait up to `timeout` for pending deliveries
    pub fn shutdown(self, timeout: Duration) -> ReportSummary {
        let Some(Worker { tx, handle, rt }) = self.worker else {
            return ReportSummary::default();
        };
        drop(tx);

        let summary = match rt.block_on(async { tokio::time::timeout(timeout, handle).await }) {
            Ok(Ok(summary)) => summary,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "reporter worker panicked");
                ReportSummary::default()
            }
            Err(_) => {
                tracing::warn!(?timeout, "reporter shutdown timed out");
                ReportSummary::default()
            }
        };
        rt.shutdown_timeout(Duration::from_millis(100));
        summary
    }
}
