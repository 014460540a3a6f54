//! Autoplay engine.
//!
//! The player cycles through a snapshot of the deck, one timer per slide,
//! looping until closed. It owns at most one armed timer at any moment and
//! ignores any timer event that is not the one it armed last.

/// Cancellable timer sources
pub mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler, TimerId, TokioScheduler};

use std::time::{Duration, Instant};

use crate::constants::player::MIN_DWELL;
use crate::deck::Slide;

/// Where the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Not playing; no timer armed.
    #[default]
    Stopped,
    /// Showing `index` of the snapshot.
    Playing {
        /// Zero-based position in the snapshot.
        index: usize,
    },
}

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback began at the first slide.
    Started,
    /// The snapshot was empty; nothing was armed.
    NothingToPlay,
}

/// How long a slide stays on screen. Zero-length slides get one tick.
pub fn dwell(slide: &Slide) -> Duration {
    Duration::from_secs(u64::from(slide.duration)).max(MIN_DWELL)
}

/// The autoplay state machine.
#[derive(Debug, Default)]
pub struct Player {
    snapshot: Vec<Slide>,
    state: PlayerState,
    armed: Option<TimerId>,
    entered_at: Option<Instant>,
}

impl Player {
    /// A stopped player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether the player is cycling slides.
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PlayerState::Playing { .. })
    }

    /// Index into the snapshot, if playing.
    pub const fn index(&self) -> Option<usize> {
        match self.state {
            PlayerState::Playing { index } => Some(index),
            PlayerState::Stopped => None,
        }
    }

    /// Slide on screen, if playing.
    pub fn current(&self) -> Option<&Slide> {
        self.index().and_then(|i| self.snapshot.get(i))
    }

    /// Number of slides captured when play started.
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.len()
    }

    /// The timer currently armed, if any.
    pub const fn armed_timer(&self) -> Option<TimerId> {
        self.armed
    }

    /// Start from the first slide with a fresh copy of `slides`.
    ///
    /// Any timer from a previous run is cancelled first.
    pub fn play<S: Scheduler>(&mut self, slides: &[Slide], scheduler: &mut S) -> PlayOutcome {
        self.disarm(scheduler);
        self.snapshot = slides.to_vec();
        if self.snapshot.is_empty() {
            tracing::info!("play requested with no slides");
            self.state = PlayerState::Stopped;
            self.entered_at = None;
            return PlayOutcome::NothingToPlay;
        }
        tracing::info!(slides = self.snapshot.len(), "playback started");
        self.enter(0, scheduler);
        PlayOutcome::Started
    }

    /// Handle a fired timer. Returns whether the player advanced.
    pub fn on_timer<S: Scheduler>(&mut self, id: TimerId, scheduler: &mut S) -> bool {
        let PlayerState::Playing { index } = self.state else {
            return false;
        };
        if self.armed != Some(id) {
            tracing::debug!(?id, "ignoring stale timer");
            return false;
        }
        self.armed = None;
        let next = (index + 1) % self.snapshot.len();
        self.enter(next, scheduler);
        true
    }

    /// Stop playback and cancel the pending timer.
    pub fn close<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.disarm(scheduler);
        if self.is_playing() {
            tracing::info!("playback closed");
        }
        self.state = PlayerState::Stopped;
        self.snapshot.clear();
        self.entered_at = None;
    }

    /// Fraction of the current slide's time that has elapsed, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let (Some(slide), Some(entered)) = (self.current(), self.entered_at) else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(entered).as_secs_f64();
        (elapsed / dwell(slide).as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Time left on the current slide.
    pub fn remaining(&self, now: Instant) -> Duration {
        let (Some(slide), Some(entered)) = (self.current(), self.entered_at) else {
            return Duration::ZERO;
        };
        dwell(slide).saturating_sub(now.saturating_duration_since(entered))
    }

    fn enter<S: Scheduler>(&mut self, index: usize, scheduler: &mut S) {
        let delay = dwell(&self.snapshot[index]);
        self.state = PlayerState::Playing { index };
        self.entered_at = Some(scheduler.now());
        self.armed = Some(scheduler.schedule(delay));
        tracing::debug!(index, ?delay, "showing slide");
    }

    fn disarm<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.armed.take() {
            scheduler.cancel(id);
        }
    }
}
