//! Game session - owns one game at a time and everything that runs on its behalf.
//!
//! The session is driven by its host: every call takes the current `Instant`,
//! and [`GameSession::poll`] fires whatever deferred work has fallen due. Each
//! started game gets a fresh [`Generation`]; its countdown clock and any queued
//! mismatch rollback are cancelled when the game ends or is replaced.

use std::collections::VecDeque;
use std::time::Instant;

use crate::clock::CountdownClock;
use crate::core::{
    deck_from_layout, generate_deck, ConfigError, DeckError, FlipOutcome, GameConfig,
    GameSnapshot, GameState, MessageTable, Rules, ScoreCard, SimpleRng, Tile,
};
use crate::scheduler::Scheduler;
use crate::types::{GameStatus, Generation, Icon};

/// Deferred work owned by a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Turn a mismatched pair face down again
    HideMismatch,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { generation: Generation },
    Ended(ScoreCard),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    catalog: Vec<Icon>,
    rules: Rules,
    messages: MessageTable,
    rng: SimpleRng,
    state: GameState,
    clock: Option<CountdownClock>,
    scheduler: Scheduler<Deferred>,
    events: VecDeque<SessionEvent>,
}

impl GameSession {
    /// Create an idle session; `seed` is used when the config does not pin one
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let rules = config.validate()?;
        Ok(Self {
            catalog: config.icons.clone(),
            rules,
            messages: MessageTable::default(),
            rng: SimpleRng::new(config.seed.unwrap_or(seed)),
            state: GameState::idle(rules),
            clock: None,
            scheduler: Scheduler::new(),
            events: VecDeque::new(),
        })
    }

    /// Replace the post-game message table
    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.state.generation()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn clock(&self) -> Option<&CountdownClock> {
        self.clock.as_ref()
    }

    /// Deferred entries still queued (for any generation)
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.len()
    }

    /// Start a new game on a freshly shuffled deck
    pub fn init_game(&mut self, now: Instant) -> Generation {
        let deck = generate_deck(&self.catalog, &mut self.rng);
        self.begin(deck, now)
    }

    /// Start a new game on a fixed layout (one icon id per board position)
    pub fn init_game_with_layout(
        &mut self,
        layout: &[&str],
        now: Instant,
    ) -> Result<Generation, DeckError> {
        let deck = deck_from_layout(&self.catalog, layout)?;
        Ok(self.begin(deck, now))
    }

    fn begin(&mut self, deck: Vec<Tile>, now: Instant) -> Generation {
        self.teardown();

        let generation = self.state.generation().next();
        self.state = GameState::start(self.rules, deck, generation);
        self.clock = Some(CountdownClock::start(
            generation,
            now,
            self.rules.game_duration_secs,
        ));
        self.events.push_back(SessionEvent::Started { generation });

        tracing::debug!(%generation, tiles = self.rules.tile_count(), "game started");
        generation
    }

    /// Cancel the current game's clock and queued rollbacks
    ///
    /// Called on every restart; hosts also call it when they stop driving the
    /// session. The game state itself is left as it is.
    pub fn teardown(&mut self) {
        let generation = self.state.generation();
        if let Some(clock) = self.clock.as_mut() {
            clock.cancel();
        }
        let dropped = self.scheduler.cancel_generation(generation);
        if dropped > 0 {
            tracing::debug!(%generation, dropped, "cancelled deferred work");
        }
    }

    /// Flip the tile at `index`
    ///
    /// Work due by `now` fires first, so a flip after the clock ran out is
    /// ignored and a winning flip records the elapsed time at `now`. A
    /// mismatch queues the rollback for `now + mismatch delay`.
    pub fn flip_tile(&mut self, index: usize, now: Instant) -> FlipOutcome {
        self.poll(now);
        let outcome = self.state.flip_tile(index);
        if let FlipOutcome::Mismatched { .. } = outcome {
            self.scheduler.schedule(
                self.state.generation(),
                now + self.rules.mismatch_delay(),
                Deferred::HideMismatch,
            );
        }
        self.finish_if_ended();
        outcome
    }

    /// Fire due rollbacks and clock ticks; returns true if the state changed
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Some(entry) = self.scheduler.pop_due(now) {
            match entry.task {
                Deferred::HideMismatch => {
                    changed |= self.state.resolve_mismatch(entry.generation);
                }
            }
        }

        if let Some(tick) = self.clock.as_mut().and_then(|clock| clock.poll(now)) {
            changed |= self.state.tick(tick.generation, tick.elapsed_secs);
        }

        self.finish_if_ended();
        changed
    }

    fn finish_if_ended(&mut self) {
        let Some(reason) = self.state.take_end_event() else {
            return;
        };

        if let Some(clock) = self.clock.as_mut() {
            clock.cancel();
        }

        if let Some(card) = ScoreCard::from_state(&self.state, &self.messages) {
            tracing::info!(
                generation = %card.generation,
                reason = reason.as_str(),
                score = card.score,
                flips = card.flips_count,
                elapsed = card.elapsed_seconds,
                "game ended"
            );
            self.events.push_back(SessionEvent::Ended(card));
        }
    }

    /// Earliest instant at which `poll` has work to do
    pub fn next_wakeup(&self) -> Option<Instant> {
        let clock = self.clock.as_ref().and_then(CountdownClock::next_deadline);
        match (clock, self.scheduler.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Take the oldest undelivered notification
    pub fn take_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }
}
