//! Timing profiles and the session scheduler
//!
//! Every delayed behaviour of a session (spin reveal, auto-spin cadence,
//! level-up banner, mini-game close, game-over reset) is a [`Transition`]
//! queued on a virtual clock. Nothing runs until the owner advances the
//! clock, so a session is fully deterministic for a given seed and
//! sequence of calls.

use serde::{Deserialize, Serialize};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast mode
    Turbo,
    /// Zero delays (simulation, tests)
    Instant,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Delays used by the session, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// From spin start to reel reveal and resolution
    pub spin_reveal_ms: f64,

    /// Between automated free spins
    pub auto_spin_interval_ms: f64,

    /// Level-up banner before automation resumes
    pub level_up_display_ms: f64,

    /// After a mini-game closes, before free spins resume
    pub feature_resume_ms: f64,

    /// From a mini-game result to the mini-game closing
    pub feature_close_ms: f64,

    /// From game over to the automatic reset
    pub game_over_reset_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            spin_reveal_ms: 500.0,
            auto_spin_interval_ms: 1000.0,
            level_up_display_ms: 3000.0,
            feature_resume_ms: 500.0,
            feature_close_ms: 1500.0,
            game_over_reset_ms: 1000.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            ..Self::normal().scaled(0.4)
        }
    }

    /// No delays at all
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            ..Self::normal().scaled(0.0)
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Every delay multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            profile: self.profile,
            spin_reveal_ms: self.spin_reveal_ms * factor,
            auto_spin_interval_ms: self.auto_spin_interval_ms * factor,
            level_up_display_ms: self.level_up_display_ms * factor,
            feature_resume_ms: self.feature_resume_ms * factor,
            feature_close_ms: self.feature_close_ms * factor,
            game_over_reset_ms: self.game_over_reset_ms * factor,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCHEDULER
// ═══════════════════════════════════════════════════════════════════════════

/// A delayed session behaviour.
///
/// Transitions carry no state: they are applied against whatever the session
/// looks like when they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Reels land, the spin is evaluated and settled
    RevealSpin,
    /// Next automated free spin
    AutoSpin,
    /// Level-up banner goes away
    DismissLevelUp,
    /// Resolved mini-game closes and pays out
    CloseFeature,
    /// Game over: restore starting values
    ResetSession,
}

/// Handle for cancelling a scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: f64,
    transition: Transition,
}

/// Cancellable timers on a virtual clock
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Queue `transition` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, transition: Transition) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            transition,
        });
        id
    }

    /// Cancel one timer; false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer for `transition`
    pub fn cancel_transition(&mut self, transition: Transition) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.transition != transition);
        before - self.timers.len()
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, transition: Transition) -> bool {
        self.timers.iter().any(|t| t.transition == transition)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest timer
    pub fn next_due_ms(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Pop the earliest timer due at or before `until_ms` and move the
    /// clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Transition> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer.transition)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
