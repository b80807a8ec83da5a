//! Engine configuration with documented constants
//!
//! These are engine-level tuning values, distinct from per-character
//! assist settings (see `profile`). They exist because the host gives us
//! no reliable signals for them and the fallbacks have to be chosen
//! somewhere visible.

/// Fixed tuning values for the decision core
///
/// Changing them alters how aggressively the engine backs off after
/// failures and how it interprets host-declared cooldown data.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Forced suppression window after a target handle cannot be acquired
    /// or a host call fails mid-dispatch (seconds)
    ///
    /// Short on purpose: long enough to stop hot-looping on a persistently
    /// failing host call, short enough that a one-off glitch barely
    /// registers. Independent of the configured grace period.
    pub acquire_fail_grace: f64,

    /// Minimum local cooldown applied after any attempt (seconds)
    ///
    /// Prevents zero-duration thrashing when both the host-declared
    /// cooldown and the configured default come out as zero.
    pub cooldown_floor: f64,

    /// Raw duration values above this are assumed to be milliseconds
    ///
    /// Host action data is incompletely typed; a "cooldown" of 1500 is
    /// far likelier to mean 1.5s than 25 minutes. Values above the
    /// threshold are divided by 1000.
    pub millis_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            acquire_fail_grace: 0.5,
            cooldown_floor: 0.05,
            millis_threshold: 120.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.acquire_fail_grace <= 0.0 {
            return Err(format!(
                "acquire_fail_grace ({}) must be positive",
                self.acquire_fail_grace
            ));
        }

        if self.cooldown_floor <= 0.0 {
            return Err(format!(
                "cooldown_floor ({}) must be positive",
                self.cooldown_floor
            ));
        }

        // Anything lower would reinterpret ordinary second-scale cooldowns
        if self.millis_threshold < 10.0 {
            return Err(format!(
                "millis_threshold ({}) should be at least 10 seconds",
                self.millis_threshold
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let mut config = EngineConfig::default();
        config.millis_threshold = 1.0;
        assert!(config.validate().is_err());
    }
}
