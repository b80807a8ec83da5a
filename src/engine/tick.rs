//! Tick orchestration
//!
//! One tick runs in a fixed order: roster refresh, suppression update,
//! target evaluation, then any dispatch triggered this tick. The order
//! matters: a roster change detected this tick must suppress this tick's
//! automatic dispatch, not merely future ones.

use serde::Serialize;

use crate::core::config::EngineConfig;
use crate::core::error::{MendError, Result};
use crate::core::types::{MemberId, Seconds};
use crate::engine::dispatcher::{ActionDispatcher, DispatchOutcome};
use crate::engine::suppression::{SuppressReason, SuppressionController};
use crate::engine::target;
use crate::host::Host;
use crate::profile::{CharacterProfile, ProfileStore, Trigger};
use crate::roster::{Roster, RosterTracker};

/// Events produced by one tick, for the presentation layer's action log
#[derive(Debug, Clone, Serialize)]
pub enum EngineEvent {
    CompositionChanged {
        members: Vec<String>,
    },
    Suppressed {
        reason: SuppressReason,
        resume_in: Seconds,
    },
    AutoDispatched {
        target: String,
        outcome: DispatchOutcome,
    },
    /// A host call failed mid-dispatch; the engine backed off
    HostFault {
        detail: String,
    },
}

/// Best-candidate information for passive display
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatus {
    pub id: MemberId,
    pub name: String,
    pub health_fraction: f64,
    /// Action automatic assistance would use
    pub action: String,
}

/// Everything the presentation layer reads, recomputed on demand
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub auto_assist: bool,
    pub suppressed: bool,
    pub suppress_reason: Option<String>,
    pub suppress_remaining: Seconds,
    pub candidate: Option<CandidateStatus>,
    pub last_outcome: Option<String>,
}

/// The assistive automation engine: owns the decision components and the
/// active character's settings, driven by the host's per-frame tick.
pub struct Engine {
    config: EngineConfig,
    profile: CharacterProfile,
    tracker: RosterTracker,
    suppression: SuppressionController,
    dispatcher: ActionDispatcher,
    roster: Roster,
    prev_context: Option<String>,
    prev_auto: bool,
    candidate: Option<CandidateStatus>,
    last_outcome: Option<DispatchOutcome>,
    store: Option<Box<dyn ProfileStore>>,
    active_character: Option<String>,
}

impl Engine {
    pub fn new(config: EngineConfig, now: Seconds) -> Self {
        let profile = CharacterProfile::default();
        let suppression = SuppressionController::new(now, profile.grace_secs);
        let dispatcher = ActionDispatcher::new(&config);
        let prev_auto = profile.auto_assist;
        Self {
            config,
            profile,
            tracker: RosterTracker::new(),
            suppression,
            dispatcher,
            roster: Roster::default(),
            prev_context: None,
            prev_auto,
            candidate: None,
            last_outcome: None,
            store: None,
            active_character: None,
        }
    }

    pub fn with_store(mut self, store: Box<dyn ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Advance one tick. Ordering within the tick: roster refresh,
    /// suppression updates, target evaluation, automatic dispatch.
    pub fn tick(&mut self, host: &mut impl Host, now: Seconds) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let grace = self.profile.grace_secs;
        let session_active = host.is_interactable_session_active();

        let (roster, composition_changed) = if session_active {
            self.tracker.refresh(host)
        } else {
            // Menus and loading screens: treat host state as absent
            self.tracker.refresh_empty()
        };

        if session_active {
            let context = host.current_context_id();
            if self.prev_context.as_deref() != Some(context.as_str()) {
                if self.prev_context.is_some() {
                    self.suppress(SuppressReason::ContextChanged, now, grace, &mut events);
                }
                self.prev_context = Some(context);
            }
        }

        if composition_changed {
            events.push(EngineEvent::CompositionChanged {
                members: roster.members().iter().map(|m| m.name.clone()).collect(),
            });
            self.suppress(SuppressReason::RosterChanged, now, grace, &mut events);
        }

        if self.profile.auto_assist && !self.prev_auto {
            self.suppress(SuppressReason::AssistEnabled, now, grace, &mut events);
        }
        self.prev_auto = self.profile.auto_assist;

        self.candidate = target::lowest(&roster).map(|m| CandidateStatus {
            id: m.id,
            name: m.name.clone(),
            health_fraction: m.health_fraction().unwrap_or(0.0),
            action: self.profile.bindings.auto_action.clone(),
        });

        if session_active && self.profile.auto_assist && !self.suppression.is_suppressed(now) {
            if let Some(member) = target::actionable(&roster, self.profile.health_threshold) {
                let requested = self.profile.bindings.auto_action.clone();
                let result = self.dispatcher.try_dispatch(
                    host,
                    member,
                    &requested,
                    self.profile.restrict_to_safe,
                    self.profile.default_cooldown_secs,
                    now,
                );
                match result {
                    Ok(outcome) => {
                        events.push(EngineEvent::AutoDispatched {
                            target: member.name.clone(),
                            outcome: outcome.clone(),
                        });
                        self.last_outcome = Some(outcome);
                    }
                    Err(e) => {
                        tracing::warn!("auto dispatch host failure: {}", e);
                        events.push(EngineEvent::HostFault {
                            detail: e.to_string(),
                        });
                        self.suppress(
                            SuppressReason::AcquireFailed,
                            now,
                            self.config.acquire_fail_grace,
                            &mut events,
                        );
                    }
                }
            }
        }

        self.roster = roster;
        events
    }

    fn suppress(
        &mut self,
        reason: SuppressReason,
        now: Seconds,
        grace: Seconds,
        events: &mut Vec<EngineEvent>,
    ) {
        self.suppression.trigger(reason, now, grace);
        events.push(EngineEvent::Suppressed {
            reason,
            resume_in: self.suppression.remaining(now),
        });
    }

    /// Manually triggered cast on a specific member. Not gated by
    /// suppression; shares the full dispatch pipeline.
    pub fn cast_on_member(
        &mut self,
        host: &mut impl Host,
        member_id: MemberId,
        requested: &str,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let member = self
            .roster
            .get(member_id)
            .cloned()
            .ok_or_else(|| MendError::MemberNotFound(format!("{:?}", member_id)))?;
        self.dispatch_manual(host, &member, requested, now)
    }

    /// Cast the trigger's bound action on a member (click-to-assist hook)
    pub fn cast_trigger(
        &mut self,
        host: &mut impl Host,
        member_id: MemberId,
        trigger: Trigger,
        modified: bool,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let requested = self.profile.bindings.for_trigger(trigger, modified).to_string();
        self.cast_on_member(host, member_id, &requested, now)
    }

    /// Cast a slot's bound action: slot 0 is self, 1.. are group members
    /// in roster order (hotkey handlers call this)
    pub fn cast_on_slot(
        &mut self,
        host: &mut impl Host,
        slot: usize,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let member = self
            .roster
            .slot(slot)
            .cloned()
            .ok_or_else(|| MendError::MemberNotFound(format!("slot {}", slot)))?;
        let requested = self
            .profile
            .bindings
            .slot_actions
            .get(slot)
            .cloned()
            .unwrap_or_default();
        self.dispatch_manual(host, &member, &requested, now)
    }

    /// Cast on a member found by (normalized) name
    pub fn cast_by_name(
        &mut self,
        host: &mut impl Host,
        member_name: &str,
        requested: &str,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let member = self
            .roster
            .find_by_name(member_name)
            .cloned()
            .ok_or_else(|| MendError::MemberNotFound(member_name.to_string()))?;
        self.dispatch_manual(host, &member, requested, now)
    }

    fn dispatch_manual(
        &mut self,
        host: &mut impl Host,
        member: &crate::roster::Member,
        requested: &str,
        now: Seconds,
    ) -> Result<DispatchOutcome> {
        let result = self.dispatcher.try_dispatch(
            host,
            member,
            requested,
            self.profile.restrict_to_safe,
            self.profile.default_cooldown_secs,
            now,
        );
        match &result {
            Ok(outcome) => self.last_outcome = Some(outcome.clone()),
            Err(e) => {
                tracing::warn!("manual dispatch host failure: {}", e);
                self.suppression.trigger(
                    SuppressReason::AcquireFailed,
                    now,
                    self.config.acquire_fail_grace,
                );
            }
        }
        result
    }

    pub fn profile(&self) -> &CharacterProfile {
        &self.profile
    }

    /// Edit the active settings; persisted immediately when a store and
    /// character are attached
    pub fn update_profile(&mut self, edit: impl FnOnce(&mut CharacterProfile)) -> Result<()> {
        edit(&mut self.profile);
        self.persist_active()
    }

    pub fn set_auto_assist(&mut self, enabled: bool) -> Result<()> {
        self.update_profile(|p| p.auto_assist = enabled)
    }

    /// Switch the active character: save the outgoing profile first, then
    /// load (or create) the incoming one. The engine re-enters its
    /// initializing grace window so the new character's roster settles
    /// before automation resumes.
    pub fn set_active_character(&mut self, character: Option<&str>, now: Seconds) -> Result<()> {
        self.persist_active()?;

        self.active_character = character.map(str::to_string);
        if let Some(name) = self.active_character.clone() {
            let loaded = match self.store.as_ref() {
                Some(store) => store.load_profile(&name)?,
                None => None,
            };
            let first_sight = loaded.is_none();
            self.profile = match loaded {
                Some(profile) => match profile.validate() {
                    Ok(()) => profile,
                    Err(detail) => {
                        tracing::warn!("profile for '{}' invalid ({}), using defaults", name, detail);
                        CharacterProfile::default()
                    }
                },
                None => CharacterProfile::default(),
            };
            if first_sight {
                self.persist_active()?;
            }
            tracing::info!("active character: {}", name);
        }

        self.prev_auto = self.profile.auto_assist;
        self.suppression
            .trigger(SuppressReason::Initializing, now, self.profile.grace_secs);
        Ok(())
    }

    /// Save the active character's profile; call at shutdown
    pub fn shutdown(&mut self) -> Result<()> {
        self.persist_active()
    }

    fn persist_active(&mut self) -> Result<()> {
        if let (Some(store), Some(character)) =
            (self.store.as_mut(), self.active_character.as_ref())
        {
            store.save_profile(character, &self.profile)?;
        }
        Ok(())
    }

    /// Last refreshed roster (for presentation and manual-cast lookups)
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn status(&self, now: Seconds) -> StatusSnapshot {
        let suppressed = self.suppression.is_suppressed(now);
        StatusSnapshot {
            auto_assist: self.profile.auto_assist,
            suppressed,
            suppress_reason: suppressed.then(|| self.suppression.reason().to_string()),
            suppress_remaining: self.suppression.remaining(now),
            candidate: self.candidate.clone(),
            last_outcome: self.last_outcome.as_ref().map(|o| o.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::catalog::ActionDescriptor;
    use crate::host::sim::SimHost;

    fn ready_engine(host: &mut SimHost, now: &mut Seconds) -> Engine {
        let mut engine = Engine::new(EngineConfig::default(), *now);
        // Run past the initializing grace and the first roster change
        for _ in 0..40 {
            engine.tick(host, *now);
            *now += 0.25;
        }
        engine
    }

    #[test]
    fn test_roster_change_suppresses_same_tick() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        // A hurt member joins: the join itself must suppress this tick's dispatch
        host.add_member("Brock", 10, 100);
        let events = engine.tick(&mut host, now);

        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::CompositionChanged { .. })));
        assert!(host.cast_log.is_empty());
    }

    #[test]
    fn test_auto_dispatch_after_grace() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        host.add_member("Brock", 10, 100);
        engine.tick(&mut host, now);

        // Within the grace window: still nothing
        now += 1.0;
        engine.tick(&mut host, now);
        assert!(host.cast_log.is_empty());

        // Past the window: the cast fires
        now += 2.0;
        let events = engine.tick(&mut host, now);
        assert_eq!(host.cast_log.len(), 1);
        assert_eq!(host.cast_log[0].0, "Minor Healing");
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::AutoDispatched { .. })));
    }

    #[test]
    fn test_context_change_suppresses() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        host.set_context("dungeon");
        let events = engine.tick(&mut host, now);
        assert!(events.iter().any(|e| matches!(
            e,
            EngineEvent::Suppressed {
                reason: SuppressReason::ContextChanged,
                ..
            }
        )));
    }

    #[test]
    fn test_manual_cast_ignores_suppression() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));

        let mut engine = Engine::new(EngineConfig::default(), 0.0);
        engine.tick(&mut host, 0.0);
        assert!(engine.status(0.0).suppressed);

        let player = host.player_id().unwrap();
        let outcome = engine
            .cast_on_member(&mut host, player, "Minor Healing", 0.0)
            .unwrap();
        assert!(matches!(outcome, DispatchOutcome::Cast { .. }));
    }

    #[test]
    fn test_host_fault_backs_off() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        host.add_member("Brock", 10, 100);
        host.fail_targeting = true;

        // Ride out the roster-change grace; dispatch attempts now fail
        // and each failure forces a short back-off
        let mut saw_fault = false;
        for _ in 0..20 {
            let events = engine.tick(&mut host, now);
            saw_fault |= events
                .iter()
                .any(|e| matches!(e, EngineEvent::HostFault { .. }));
            now += 0.25;
        }
        assert!(saw_fault);
        assert!(host.cast_log.is_empty());

        // Back-off window expires and the dispatch succeeds
        host.fail_targeting = false;
        now += 1.0;
        engine.tick(&mut host, now);
        assert_eq!(host.cast_log.len(), 1);
    }

    #[test]
    fn test_inactive_session_disables_auto() {
        let mut host = SimHost::new("Aria");
        host.learn(ActionDescriptor::new("Minor Healing"));
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        host.add_member("Brock", 10, 100);
        host.set_session_active(false);
        for _ in 0..30 {
            engine.tick(&mut host, now);
            now += 0.25;
        }
        assert!(host.cast_log.is_empty());
    }

    #[test]
    fn test_status_reports_candidate() {
        let mut host = SimHost::new("Aria");
        let mut now = 0.0;
        let mut engine = ready_engine(&mut host, &mut now);

        host.add_member("Brock", 40, 100);
        engine.tick(&mut host, now);

        let status = engine.status(now);
        let candidate = status.candidate.unwrap();
        assert_eq!(candidate.name, "Brock");
        assert!((candidate.health_fraction - 0.4).abs() < 1e-9);
        assert_eq!(candidate.action, "Minor Healing");
    }
}
