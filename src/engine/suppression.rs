//! Grace-period state machine gating automatic behavior
//!
//! Disruptive events (scene loads, roster churn, assist toggles) open a
//! suppression window during which automatic target acquisition and
//! automatic casting are disabled. Manual actions are never gated by
//! this. The window only ever extends; nothing is sticky beyond its
//! timestamp.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::Seconds;

/// Why automatic behavior is currently paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuppressReason {
    /// Startup, before the first valid roster snapshot
    Initializing,
    /// The active area/scene changed
    ContextChanged,
    /// Party composition changed (join, leave, membership churn)
    RosterChanged,
    /// Automatic assistance was just switched on
    AssistEnabled,
    /// A target handle could not be acquired at dispatch time
    AcquireFailed,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Initializing => "initializing",
            Self::ContextChanged => "context changed",
            Self::RosterChanged => "roster changed",
            Self::AssistEnabled => "assist starting",
            Self::AcquireFailed => "acquisition failed",
        };
        f.write_str(text)
    }
}

/// Exactly one per session
#[derive(Debug, Clone)]
pub struct SuppressionController {
    resume_at: Seconds,
    reason: SuppressReason,
}

impl SuppressionController {
    /// Starts suppressed so nothing fires before the first valid snapshot
    pub fn new(now: Seconds, grace: Seconds) -> Self {
        let mut controller = Self {
            resume_at: now,
            reason: SuppressReason::Initializing,
        };
        controller.trigger(SuppressReason::Initializing, now, grace);
        controller
    }

    /// Enter (or extend) suppression. A positive grace extends the window
    /// to at least `now + grace`; it never shortens an active one. A
    /// non-positive grace is the explicit immediate-resume variant and
    /// sets the resume time to `now`.
    pub fn trigger(&mut self, reason: SuppressReason, now: Seconds, grace: Seconds) {
        if grace <= 0.0 {
            self.resume_at = now;
        } else {
            self.resume_at = self.resume_at.max(now + grace);
        }
        self.reason = reason;
    }

    /// Purely time-based: suppression lifts once `now` reaches the
    /// resume timestamp
    pub fn is_suppressed(&self, now: Seconds) -> bool {
        now < self.resume_at
    }

    /// Seconds until automatic behavior resumes (0 once lifted)
    pub fn remaining(&self, now: Seconds) -> Seconds {
        (self.resume_at - now).max(0.0)
    }

    /// Most recent trigger reason, for passive display only
    pub fn reason(&self) -> SuppressReason {
        self.reason
    }

    pub fn resume_at(&self) -> Seconds {
        self.resume_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_suppressed() {
        let controller = SuppressionController::new(10.0, 2.0);
        assert!(controller.is_suppressed(10.0));
        assert!(controller.is_suppressed(11.9));
        assert!(!controller.is_suppressed(12.0));
        assert_eq!(controller.reason(), SuppressReason::Initializing);
    }

    #[test]
    fn test_triggers_extend_never_shorten() {
        let mut controller = SuppressionController::new(0.0, 5.0);
        assert_eq!(controller.resume_at(), 5.0);

        // A shorter window while suppressed does not pull resume_at back
        controller.trigger(SuppressReason::RosterChanged, 1.0, 2.0);
        assert_eq!(controller.resume_at(), 5.0);
        assert_eq!(controller.reason(), SuppressReason::RosterChanged);

        // A longer one pushes it out
        controller.trigger(SuppressReason::ContextChanged, 2.0, 10.0);
        assert_eq!(controller.resume_at(), 12.0);
    }

    #[test]
    fn test_immediate_resume() {
        let mut controller = SuppressionController::new(0.0, 5.0);
        controller.trigger(SuppressReason::AssistEnabled, 1.0, 0.0);
        assert_eq!(controller.resume_at(), 1.0);
        assert!(!controller.is_suppressed(1.0));
    }

    #[test]
    fn test_remaining_clamps_to_zero() {
        let controller = SuppressionController::new(0.0, 2.0);
        assert_eq!(controller.remaining(1.0), 1.0);
        assert_eq!(controller.remaining(5.0), 0.0);
    }
}
