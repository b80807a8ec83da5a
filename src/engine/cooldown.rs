//! Action readiness tracking
//!
//! The host's own cooldown enforcement is not guaranteed to be queryable,
//! so readiness combines two signals: an authoritative remaining-cooldown
//! value when the host exposes one, and a local table of earliest-retry
//! timestamps maintained from our own attempts. The local table is an
//! anti-spam measure and applies regardless of what the host reports.

use ahash::AHashMap;

use crate::actions::catalog::{DurationUnit, RawDuration};
use crate::core::config::EngineConfig;
use crate::core::types::Seconds;
use crate::host::CastingHost;

/// Remaining cooldowns below this are noise, not a real block
const READY_EPSILON: Seconds = 1e-3;

#[derive(Debug)]
pub struct CooldownTracker {
    /// Earliest timestamp each action may be attempted again, keyed by
    /// resolved action name
    ready_at: AHashMap<String, Seconds>,
    cooldown_floor: Seconds,
    millis_threshold: f64,
}

impl CooldownTracker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            ready_at: AHashMap::new(),
            cooldown_floor: config.cooldown_floor,
            millis_threshold: config.millis_threshold,
        }
    }

    /// True when neither the host nor the local table blocks the action
    pub fn is_ready(&self, host: &impl CastingHost, action_name: &str, now: Seconds) -> bool {
        self.remaining(host, action_name, now).is_none()
    }

    /// Remaining block duration, if any. Host-reported first, then local.
    pub fn remaining(
        &self,
        host: &impl CastingHost,
        action_name: &str,
        now: Seconds,
    ) -> Option<Seconds> {
        if let Some(host_remaining) = host.remaining_cooldown(action_name) {
            if host_remaining > READY_EPSILON {
                return Some(host_remaining);
            }
        }

        match self.ready_at.get(action_name) {
            Some(&ready) if ready > now => Some(ready - now),
            _ => None,
        }
    }

    /// Record a cast attempt: the action becomes retryable at
    /// `now + max(declared, default)`, floored to prevent thrashing.
    /// Timestamps never move backwards for an action.
    pub fn record_attempt(
        &mut self,
        action_name: &str,
        declared: Option<&RawDuration>,
        default_secs: Seconds,
        now: Seconds,
    ) {
        let declared_secs = declared
            .map(|raw| self.normalize(raw))
            .unwrap_or(0.0);
        let duration = declared_secs.max(default_secs).max(self.cooldown_floor);

        let ready = now + duration;
        let entry = self.ready_at.entry(action_name.to_string()).or_insert(ready);
        *entry = entry.max(ready);
    }

    /// Interpret a raw host duration in seconds. Values tagged as
    /// sub-second units, or implausibly large for seconds, are treated as
    /// milliseconds.
    fn normalize(&self, raw: &RawDuration) -> Seconds {
        match raw.unit {
            Some(DurationUnit::Millis) => raw.value / 1000.0,
            Some(DurationUnit::Seconds) => raw.value,
            None if raw.value > self.millis_threshold => raw.value / 1000.0,
            None => raw.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;

    fn tracker() -> CooldownTracker {
        CooldownTracker::new(&EngineConfig::default())
    }

    #[test]
    fn test_unknown_action_is_ready() {
        let host = SimHost::new("Aria");
        assert!(tracker().is_ready(&host, "Minor Healing", 0.0));
    }

    #[test]
    fn test_default_duration_applies() {
        let host = SimHost::new("Aria");
        let mut cooldowns = tracker();

        cooldowns.record_attempt("Minor Healing", None, 1.5, 10.0);
        assert!(!cooldowns.is_ready(&host, "Minor Healing", 10.0));
        assert!(!cooldowns.is_ready(&host, "Minor Healing", 11.4));
        assert!(cooldowns.is_ready(&host, "Minor Healing", 11.5));
    }

    #[test]
    fn test_declared_overrides_smaller_default() {
        let host = SimHost::new("Aria");
        let mut cooldowns = tracker();

        cooldowns.record_attempt("Group Heal", Some(&RawDuration::new(6.0)), 1.5, 0.0);
        assert!(!cooldowns.is_ready(&host, "Group Heal", 5.9));
        assert!(cooldowns.is_ready(&host, "Group Heal", 6.0));
    }

    #[test]
    fn test_millis_normalization() {
        let host = SimHost::new("Aria");
        let mut cooldowns = tracker();

        // 1500 is implausible as seconds; read as 1.5s
        cooldowns.record_attempt("Renew", Some(&RawDuration::new(1500.0)), 0.0, 0.0);
        assert!(!cooldowns.is_ready(&host, "Renew", 1.0));
        assert!(cooldowns.is_ready(&host, "Renew", 1.6));

        // Explicit unit hint wins even for small values
        cooldowns.record_attempt(
            "Ward",
            Some(&RawDuration::with_unit(90.0, DurationUnit::Millis)),
            0.0,
            0.0,
        );
        assert!(cooldowns.is_ready(&host, "Ward", 0.2));
    }

    #[test]
    fn test_floor_prevents_zero_duration() {
        let host = SimHost::new("Aria");
        let mut cooldowns = tracker();

        cooldowns.record_attempt("Renew", None, 0.0, 100.0);
        assert!(!cooldowns.is_ready(&host, "Renew", 100.0));
        assert!(cooldowns.is_ready(&host, "Renew", 100.06));
    }

    #[test]
    fn test_ready_at_is_monotonic() {
        let host = SimHost::new("Aria");
        let mut cooldowns = tracker();

        cooldowns.record_attempt("Renew", None, 10.0, 0.0);
        // A later attempt with a shorter window must not shorten the block
        cooldowns.record_attempt("Renew", None, 1.0, 2.0);
        assert!(!cooldowns.is_ready(&host, "Renew", 9.0));
        assert!(cooldowns.is_ready(&host, "Renew", 10.0));
    }

    #[test]
    fn test_host_reported_cooldown_wins() {
        let mut host = SimHost::new("Aria");
        host.set_remaining_cooldown("Minor Healing", 4.0);

        let cooldowns = tracker();
        assert!(!cooldowns.is_ready(&host, "Minor Healing", 0.0));
        assert_eq!(cooldowns.remaining(&host, "Minor Healing", 0.0), Some(4.0));
    }
}
