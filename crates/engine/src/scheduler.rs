//! Generation-tagged deferred work.
//!
//! Entries are plain data (due instant, owning generation, task) and fire only
//! when the host polls with a `now` at or past their due time. Restarting a
//! session cancels everything the previous generation still had queued.

use std::time::Instant;

use crate::types::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<T> {
    pub id: TaskId,
    pub generation: Generation,
    pub due: Instant,
    pub task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Queue `task` to fire at `due` on behalf of `generation`
    pub fn schedule(&mut self, generation: Generation, due: Instant, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Scheduled {
            id,
            generation,
            due,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every entry owned by `generation`; returns how many were dropped
    pub fn cancel_generation(&mut self, generation: Generation) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.generation != generation);
        before - self.entries.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due instant among queued entries
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest entry due at `now`, oldest first on ties
    pub fn pop_due(&mut self, now: Instant) -> Option<Scheduled<T>> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(pos, _)| pos)?;
        Some(self.entries.remove(pos))
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_nothing_fires_early() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Generation::new(1), t0 + ms(700), "hide");

        assert_eq!(s.pop_due(t0 + ms(699)), None);
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_due(), Some(t0 + ms(700)));
    }

    #[test]
    fn test_pops_in_due_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Generation::new(1), t0 + ms(300), "late");
        s.schedule(Generation::new(1), t0 + ms(100), "early");
        s.schedule(Generation::new(1), t0 + ms(100), "early-second");

        let now = t0 + ms(1000);
        assert_eq!(s.pop_due(now).map(|e| e.task), Some("early"));
        assert_eq!(s.pop_due(now).map(|e| e.task), Some("early-second"));
        assert_eq!(s.pop_due(now).map(|e| e.task), Some("late"));
        assert!(s.is_empty());
    }

    #[test]
    fn test_entries_keep_their_generation() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Generation::new(5), t0, ());

        let entry = s.pop_due(t0).unwrap();
        assert_eq!(entry.generation, Generation::new(5));
        assert_eq!(entry.due, t0);
    }

    #[test]
    fn test_cancel_generation() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Generation::new(1), t0 + ms(10), 'a');
        s.schedule(Generation::new(1), t0 + ms(20), 'b');
        s.schedule(Generation::new(2), t0 + ms(30), 'c');

        assert_eq!(s.cancel_generation(Generation::new(1)), 2);
        assert_eq!(s.cancel_generation(Generation::new(1)), 0);
        assert_eq!(s.pop_due(t0 + ms(100)).map(|e| e.task), Some('c'));
    }

    #[test]
    fn test_cancel_by_id() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let id = s.schedule(Generation::new(1), t0, 1);
        s.schedule(Generation::new(1), t0, 2);

        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.cancel_all(), 1);
        assert_eq!(s.next_due(), None);
    }
}
