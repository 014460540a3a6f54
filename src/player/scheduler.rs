//! Cancellable one-shot timers.
//!
//! The player never sleeps itself. It asks a [`Scheduler`] for a timer and is
//! told the timer's id when it fires. Two implementations exist: one backed by
//! tokio tasks for the running app, and a manual clock for deterministic tests.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle naming one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Source of time and one-shot timers.
pub trait Scheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Instant;

    /// Arm a timer that fires once after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. After this returns, `id` is never reported as fired.
    fn cancel(&mut self, id: TimerId);
}

/// Timers backed by spawned tokio sleeps; fired ids arrive over a channel.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    live: HashMap<TimerId, JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<TimerId>,
    fired_rx: mpsc::UnboundedReceiver<TimerId>,
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioScheduler {
    /// Create a scheduler with no timers.
    pub fn new() -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            next_id: 0,
            live: HashMap::new(),
            fired_tx,
            fired_rx,
        }
    }

    /// Take the next fired timer without waiting.
    pub fn poll_fired(&mut self) -> Option<TimerId> {
        while let Ok(id) = self.fired_rx.try_recv() {
            if self.live.remove(&id).is_some() {
                return Some(id);
            }
            // cancelled after its sleep finished but before we drained it
        }
        None
    }

    /// Number of armed timers.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(id);
        });
        self.live.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.live.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.live.drain() {
            handle.abort();
        }
    }
}

/// A fake clock that only moves when told to.
#[derive(Debug)]
pub struct ManualScheduler {
    now: Instant,
    next_id: u64,
    pending: Vec<(Instant, TimerId)>,
    cancelled: HashSet<TimerId>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Start the clock at the current instant.
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
            next_id: 0,
            pending: Vec::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Remove and return the earliest timer due at or before `until`, moving the clock to it.
    pub fn next_due(&mut self, until: Instant) -> Option<TimerId> {
        let (pos, &(deadline, id)) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(_, (deadline, id))| (*deadline, *id))?;
        self.pending.remove(pos);
        self.now = self.now.max(deadline);
        Some(id)
    }

    /// Advance the clock by `by`, delivering each due timer to `on_fire` in deadline order.
    ///
    /// Timers armed from inside `on_fire` are delivered too if they fall due in the window.
    pub fn run_for(&mut self, by: Duration, mut on_fire: impl FnMut(&mut Self, TimerId)) {
        let until = self.now + by;
        while let Some(id) = self.next_due(until) {
            on_fire(self, id);
        }
        self.now = until;
    }

    /// Timers armed and not yet fired or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `id` was cancelled before firing.
    pub fn was_cancelled(&self, id: TimerId) -> bool {
        self.cancelled.contains(&id)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((self.now + delay, id));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|(_, pending)| *pending != id);
        if self.pending.len() != before {
            self.cancelled.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn manual_timers_fire_in_deadline_order() {
        let mut sched = ManualScheduler::new();
        let late = sched.schedule(Duration::from_secs(5));
        let early = sched.schedule(Duration::from_secs(2));

        let mut fired = Vec::new();
        sched.run_for(Duration::from_secs(10), |_, id| fired.push(id));
        assert_eq!(fired, vec![early, late]);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn manual_cancel_prevents_firing() {
        let mut sched = ManualScheduler::new();
        let id = sched.schedule(Duration::from_secs(1));
        sched.cancel(id);
        assert!(sched.was_cancelled(id));

        let mut fired = Vec::new();
        sched.run_for(Duration::from_secs(10), |_, id| fired.push(id));
        assert!(fired.is_empty());
    }

    #[test]
    fn manual_clock_moves_to_each_deadline() {
        let mut sched = ManualScheduler::new();
        let start = sched.now();
        sched.schedule(Duration::from_secs(3));
        let mut seen = Vec::new();
        sched.run_for(Duration::from_secs(4), |s, _| seen.push(s.now() - start));
        assert_eq!(seen, vec![Duration::from_secs(3)]);
        assert_eq!(sched.now() - start, Duration::from_secs(4));
    }

    #[tokio::test]
    async fn tokio_timer_reports_its_id() {
        let mut sched = TokioScheduler::new();
        let id = sched.schedule(Duration::from_millis(10));
        assert_eq!(sched.poll_fired(), None);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sched.poll_fired(), Some(id));
        assert_eq!(sched.poll_fired(), None);
        assert_eq!(sched.live_count(), 0);
    }

    #[tokio::test]
    async fn tokio_cancel_is_total() {
        let mut sched = TokioScheduler::new();
        let id = sched.schedule(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        // the sleep has finished and its id may already be queued
        sched.cancel(id);
        assert_eq!(sched.poll_fired(), None);
        assert_eq!(sched.live_count(), 0);
    }
}
