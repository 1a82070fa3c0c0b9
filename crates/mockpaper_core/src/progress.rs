//! Simulated progress for a pending generation.
//!
//! The service reports nothing until the archive is ready, so the bar creeps
//! forward on a timer and only jumps to 100% when the request resolves.

use std::time::Duration;

/// Value shown as soon as a submission starts.
pub const PROGRESS_FLOOR: f64 = 2.0;
/// Highest value reachable while the request is still pending.
pub const PROGRESS_CAP: f64 = 90.0;
/// Largest increment applied by a single tick.
pub const PROGRESS_MAX_STEP: f64 = 6.0;
pub const PROGRESS_TICK_INTERVAL: Duration = Duration::from_millis(250);
/// How long the finished bar stays on screen before it is hidden.
pub const PROGRESS_HIDE_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressOutcome {
    #[default]
    None,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    percent: f64,
    active: bool,
    visible: bool,
    outcome: ProgressOutcome,
}

impl ProgressState {
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn outcome(&self) -> ProgressOutcome {
        self.outcome
    }

    pub(crate) fn start(&mut self) {
        self.percent = PROGRESS_FLOOR;
        self.active = true;
        self.visible = true;
        self.outcome = ProgressOutcome::None;
    }

    /// Apply one tick. Returns whether the value changed.
    pub(crate) fn advance(&mut self, increment: f64) -> bool {
        if !self.active {
            return false;
        }
        let step = if increment.is_finite() {
            increment.clamp(0.0, PROGRESS_MAX_STEP)
        } else {
            0.0
        };
        let next = (self.percent + step).min(PROGRESS_CAP).max(self.percent);
        let changed = next != self.percent;
        self.percent = next;
        changed
    }

    pub(crate) fn finish(&mut self, outcome: ProgressOutcome) {
        self.active = false;
        self.visible = true;
        self.percent = 100.0;
        self.outcome = outcome;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
