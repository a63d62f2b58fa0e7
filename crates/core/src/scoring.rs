//! Scoring module - post-game rating and in-game helper figures
//!
//! Everything here is a pure function of counters. The score of a session is
//! its number of matched pairs; stars and messages are derived from it.
//!
//! Message text is data: [`MessageTable`] holds an ordered list of thresholds
//! (as a percentage of all pairs) and swapping the table never touches the
//! rating logic.

use crate::game_state::GameState;
use crate::types::{EndReason, Generation, FLIPS_WARNING_MARGIN, TIME_WARNING_SECS};

/// Star rating for a final score
///
/// - all pairs: 3
/// - at least half of the pairs: 2
/// - at least one pair: 1
/// - nothing: 0
pub fn stars_for(score: usize, total_pairs: usize) -> u8 {
    if total_pairs > 0 && score >= total_pairs {
        3
    } else if score > 0 && score * 2 >= total_pairs {
        2
    } else if score >= 1 {
        1
    } else {
        0
    }
}

/// Ordered score-to-message table
///
/// Entries are `(min_percent, message)` sorted by strictly descending
/// threshold, and the last threshold is 0, so every score maps to exactly one
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTable {
    entries: &'static [(u8, &'static str)],
}

pub const DEFAULT_MESSAGES: MessageTable = MessageTable {
    entries: &[
        (100, "Perfect memory! Your future is in safe hands."),
        (75, "Excellent! You spot what matters."),
        (50, "Great job! You're well on your way."),
        (25, "Good effort! Every pair counts."),
        (0, "Nice try! Practice makes perfect."),
    ],
};

impl MessageTable {
    /// Build a table, rejecting one that is unordered or not exhaustive
    pub fn new(entries: &'static [(u8, &'static str)]) -> Option<Self> {
        let descending = entries.windows(2).all(|w| w[0].0 > w[1].0);
        let exhaustive = entries.last().is_some_and(|&(min, _)| min == 0);
        (descending && exhaustive).then_some(Self { entries })
    }

    /// Message for `score` out of `total_pairs`
    pub fn message_for(&self, score: usize, total_pairs: usize) -> &'static str {
        let percent = if total_pairs == 0 {
            0
        } else {
            score * 100 / total_pairs
        };
        self.entries
            .iter()
            .find(|&&(min, _)| percent >= min as usize)
            .map(|&(_, message)| message)
            .unwrap_or_default()
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        DEFAULT_MESSAGES
    }
}

/// In-game hint keyed by progress through the board
pub fn hint_for(matched_pairs: usize, total_pairs: usize) -> &'static str {
    if total_pairs > 0 && matched_pairs >= total_pairs {
        "All pairs found! 🎉"
    } else if matched_pairs + 1 == total_pairs {
        "Just one pair left!"
    } else if matched_pairs * 2 >= total_pairs && matched_pairs > 0 {
        "Past halfway, keep it up!"
    } else if matched_pairs > 0 {
        "Nice! Keep finding pairs."
    } else {
        "Flip two tiles to find a pair."
    }
}

/// `m:ss` clock text
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Share of pairs found, rounded to the nearest percent
pub fn progress_percent(matched_pairs: usize, total_pairs: usize) -> u32 {
    if total_pairs == 0 {
        return 0;
    }
    ((matched_pairs * 100 + total_pairs / 2) / total_pairs) as u32
}

/// The clock is running low (but has not run out)
pub fn is_time_warning(time_remaining: u32) -> bool {
    time_remaining > 0 && time_remaining <= TIME_WARNING_SECS
}

/// The flip budget is nearly spent
pub fn is_flips_warning(flips_count: u32, max_flips: u32) -> bool {
    flips_count >= max_flips.saturating_sub(FLIPS_WARNING_MARGIN)
}

/// Average flips spent per found pair
pub fn flips_per_match(flips_count: u32, score: usize) -> Option<f32> {
    (score > 0).then(|| flips_count as f32 / score as f32)
}

/// Result of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub generation: Generation,
    pub reason: EndReason,
    pub score: usize,
    pub total_pairs: usize,
    pub stars: u8,
    pub message: &'static str,
    pub flips_count: u32,
    pub elapsed_seconds: u32,
    pub flips_per_match: Option<f32>,
}

impl ScoreCard {
    /// Rate a finished session; `None` while it is still running
    pub fn from_state(state: &GameState, messages: &MessageTable) -> Option<Self> {
        let reason = state.status().end_reason()?;
        let total_pairs = state.rules().total_pairs;
        let score = state.score();
        let elapsed_seconds = state.elapsed_seconds().unwrap_or_else(|| {
            state
                .rules()
                .game_duration_secs
                .saturating_sub(state.time_remaining())
        });

        Some(Self {
            generation: state.generation(),
            reason,
            score,
            total_pairs,
            stars: stars_for(score, total_pairs),
            message: messages.message_for(score, total_pairs),
            flips_count: state.flips_count(),
            elapsed_seconds,
            flips_per_match: flips_per_match(state.flips_count(), score),
        })
    }

    pub fn share_text(&self) -> String {
        format!(
            "I scored {}/{} in the Life Insurance Memory Game! Can you beat me? 🛡️",
            self.score, self.total_pairs
        )
    }
}
