//! One full attempt to act on a target
//!
//! Resolve the requested name, re-validate safety, check cooldowns,
//! acquire the target, invoke the cast, record the attempt. Policy
//! outcomes (not found, blocked) are ordinary values; only host call
//! failures surface as errors, and the tick loop converts those into a
//! short forced suppression so we back off instead of hot-looping.

use std::fmt;

use serde::Serialize;

use crate::actions::catalog::sanitize_action_name;
use crate::actions::resolver::resolve;
use crate::actions::safety::is_safe;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::Seconds;
use crate::engine::cooldown::CooldownTracker;
use crate::host::Host;
use crate::roster::Member;

/// Why a dispatch was refused without touching the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BlockReason {
    /// Empty request or the explicit "no action" sentinel
    NoAction,
    /// Resolved action failed the safety classifier under restricted mode
    Unsafe,
    CoolingDown { remaining: Seconds },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAction => write!(f, "no action bound"),
            Self::Unsafe => write!(f, "action not safe to automate"),
            Self::CoolingDown { remaining } => {
                write!(f, "cooling down ({:.1}s remaining)", remaining)
            }
        }
    }
}

/// Result of a dispatch attempt. No retry happens automatically; a
/// blocked or unresolved request is simply dropped until the next
/// trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DispatchOutcome {
    Cast { action: String, target: String },
    NotFound { request: String },
    Blocked { reason: BlockReason },
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cast { action, target } => write!(f, "cast {} on {}", action, target),
            Self::NotFound { request } => write!(f, "action '{}' not found", request),
            Self::Blocked { reason } => write!(f, "blocked: {}", reason),
        }
    }
}

#[derive(Debug)]
pub struct ActionDispatcher {
    cooldowns: CooldownTracker,
}

impl ActionDispatcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cooldowns: CooldownTracker::new(config),
        }
    }

    /// Attempt to act on `target`. Host targeting or casting failures
    /// propagate as errors for the caller to convert into back-off.
    pub fn try_dispatch(
        &mut self,
        host: &mut impl Host,
        target: &Member,
        requested: &str,
        restrict_to_safe: bool,
        default_cooldown_secs: Seconds,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let Some(request) = sanitize_action_name(requested) else {
            return Ok(DispatchOutcome::Blocked {
                reason: BlockReason::NoAction,
            });
        };

        let known = host.known_actions();
        let catalog = host.all_cataloged_actions();
        let Some(action) = resolve(request, &known, &catalog, restrict_to_safe).cloned() else {
            tracing::warn!("action '{}' not found", request);
            return Ok(DispatchOutcome::NotFound {
                request: request.to_string(),
            });
        };

        // The resolver already filtered under restricted mode; re-validate
        // at the dispatch boundary anyway since it gates a hostile-capable
        // cast.
        if restrict_to_safe && !is_safe(&action.name) {
            tracing::warn!("blocked unsafe action '{}'", action.name);
            return Ok(DispatchOutcome::Blocked {
                reason: BlockReason::Unsafe,
            });
        }

        if let Some(remaining) = self.cooldowns.remaining(&*host, &action.name, now) {
            tracing::debug!("'{}' cooling down, {:.1}s remaining", action.name, remaining);
            return Ok(DispatchOutcome::Blocked {
                reason: BlockReason::CoolingDown { remaining },
            });
        }

        host.clear_current_target();
        host.set_current_target(target.id)?;
        host.begin_cast(&action.name, target.id)?;

        self.cooldowns.record_attempt(
            &action.name,
            action.declared_cooldown.as_ref(),
            default_cooldown_secs,
            now,
        );

        tracing::info!("cast '{}' on {}", action.name, target.name);
        Ok(DispatchOutcome::Cast {
            action: action.name,
            target: target.name.clone(),
        })
    }
}
