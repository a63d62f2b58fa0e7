//! Game configuration
//!
//! Read from environment variables with typed parsing and defaults, then
//! validated into [`Rules`]. A configuration that cannot produce a playable
//! board is rejected here, before any session starts.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::types::{Icon, GAME_DURATION_SECS, ICONS, MAX_FLIPS, MISMATCH_DELAY_MS, TOTAL_PAIRS};

pub const ENV_GAME_DURATION_SECS: &str = "MEMORY_GAME_DURATION_SECS";
pub const ENV_MAX_FLIPS: &str = "MEMORY_MAX_FLIPS";
pub const ENV_MISMATCH_DELAY_MS: &str = "MEMORY_MISMATCH_DELAY_MS";
pub const ENV_SEED: &str = "MEMORY_SEED";

/// Validated limits of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub total_pairs: usize,
    pub max_flips: u32,
    pub game_duration_secs: u32,
    pub mismatch_delay_ms: u32,
}

impl Rules {
    pub fn tile_count(&self) -> usize {
        self.total_pairs * 2
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms as u64)
    }

    pub fn game_duration(&self) -> Duration {
        Duration::from_secs(self.game_duration_secs as u64)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            total_pairs: TOTAL_PAIRS,
            max_flips: MAX_FLIPS,
            game_duration_secs: GAME_DURATION_SECS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("icon catalog is empty")]
    EmptyCatalog,
    #[error("icon id `{0}` appears more than once in the catalog")]
    DuplicateIcon(&'static str),
    #[error("game duration must be at least one second")]
    ZeroDuration,
    #[error("flip budget of {0} cannot reveal a single pair")]
    FlipBudgetTooSmall(u32),
    #[error("{name}: invalid value `{value}`")]
    InvalidVar { name: &'static str, value: String },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub icons: Vec<Icon>,
    pub max_flips: u32,
    pub game_duration_secs: u32,
    pub mismatch_delay_ms: u32,
    /// Deck RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            icons: ICONS.to_vec(),
            max_flips: MAX_FLIPS,
            game_duration_secs: GAME_DURATION_SECS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup (unset variables keep defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let game_duration_secs =
            parse_var(&lookup, ENV_GAME_DURATION_SECS)?.unwrap_or(defaults.game_duration_secs);
        let max_flips = parse_var(&lookup, ENV_MAX_FLIPS)?.unwrap_or(defaults.max_flips);
        let mismatch_delay_ms =
            parse_var(&lookup, ENV_MISMATCH_DELAY_MS)?.unwrap_or(defaults.mismatch_delay_ms);
        let seed = parse_var(&lookup, ENV_SEED)?;

        Ok(Self {
            icons: defaults.icons,
            max_flips,
            game_duration_secs,
            mismatch_delay_ms,
            seed,
        })
    }

    /// Check the configuration and derive the session rules
    pub fn validate(&self) -> Result<Rules, ConfigError> {
        if self.icons.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, icon) in self.icons.iter().enumerate() {
            if self.icons[..i].iter().any(|other| other.id == icon.id) {
                return Err(ConfigError::DuplicateIcon(icon.id));
            }
        }
        if self.game_duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.max_flips < 2 {
            return Err(ConfigError::FlipBudgetTooSmall(self.max_flips));
        }

        Ok(Rules {
            total_pairs: self.icons.len(),
            max_flips: self.max_flips,
            game_duration_secs: self.game_duration_secs,
            mismatch_delay_ms: self.mismatch_delay_ms,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidVar { name, value: raw })
}
