//! Scriptable in-memory host
//!
//! Stands in for the game runtime in the demo binary and in tests:
//! roster, spell list and failure modes are all poked directly.

use ahash::AHashMap;

use super::{CastingHost, MemberStats, Targeting, WorldState};
use crate::actions::catalog::ActionDescriptor;
use crate::core::error::{MendError, Result};
use crate::core::types::{MemberId, Seconds};

#[derive(Debug, Clone)]
struct SimMember {
    id: MemberId,
    name: String,
    current_hp: i32,
    max_hp: i32,
}

#[derive(Debug, Default)]
pub struct SimHost {
    context_id: String,
    session_active: bool,
    player: Option<SimMember>,
    group: Vec<SimMember>,
    known: Vec<ActionDescriptor>,
    catalog: Vec<ActionDescriptor>,
    host_cooldowns: AHashMap<String, Seconds>,
    pub current_target: Option<MemberId>,
    /// Every begin_cast call, in order
    pub cast_log: Vec<(String, MemberId)>,
    pub fail_targeting: bool,
    pub fail_casting: bool,
}

impl SimHost {
    pub fn new(player_name: &str) -> Self {
        let player = SimMember {
            id: MemberId::new(),
            name: player_name.to_string(),
            current_hp: 100,
            max_hp: 100,
        };
        Self {
            context_id: "town".to_string(),
            session_active: true,
            player: Some(player),
            ..Self::default()
        }
    }

    pub fn player_id(&self) -> Option<MemberId> {
        self.player.as_ref().map(|p| p.id)
    }

    pub fn add_member(&mut self, name: &str, current_hp: i32, max_hp: i32) -> MemberId {
        let member = SimMember {
            id: MemberId::new(),
            name: name.to_string(),
            current_hp,
            max_hp,
        };
        let id = member.id;
        self.group.push(member);
        id
    }

    pub fn remove_member(&mut self, id: MemberId) {
        self.group.retain(|m| m.id != id);
    }

    pub fn set_hp(&mut self, id: MemberId, current_hp: i32) {
        if let Some(player) = self.player.as_mut() {
            if player.id == id {
                player.current_hp = current_hp;
                return;
            }
        }
        if let Some(member) = self.group.iter_mut().find(|m| m.id == id) {
            member.current_hp = current_hp;
        }
    }

    pub fn set_context(&mut self, context_id: &str) {
        self.context_id = context_id.to_string();
    }

    pub fn set_session_active(&mut self, active: bool) {
        self.session_active = active;
    }

    pub fn learn(&mut self, action: ActionDescriptor) {
        if !self.catalog.contains(&action) {
            self.catalog.push(action.clone());
        }
        self.known.push(action);
    }

    pub fn catalog_only(&mut self, action: ActionDescriptor) {
        self.catalog.push(action);
    }

    pub fn set_remaining_cooldown(&mut self, action_name: &str, remaining: Seconds) {
        self.host_cooldowns.insert(action_name.to_string(), remaining);
    }

    pub fn clear_remaining_cooldown(&mut self, action_name: &str) {
        self.host_cooldowns.remove(action_name);
    }

    fn stats_of(member: &SimMember) -> MemberStats {
        MemberStats {
            id: member.id,
            name: if member.name.is_empty() {
                None
            } else {
                Some(member.name.clone())
            },
            fallback_name: None,
            current_hp: member.current_hp,
            max_hp: member.max_hp,
        }
    }
}

impl WorldState for SimHost {
    fn current_self(&self) -> Option<MemberStats> {
        if !self.session_active {
            return None;
        }
        self.player.as_ref().map(Self::stats_of)
    }

    fn current_group(&self) -> Vec<MemberStats> {
        if !self.session_active {
            return Vec::new();
        }
        self.group.iter().map(Self::stats_of).collect()
    }

    fn current_context_id(&self) -> String {
        self.context_id.clone()
    }

    fn is_interactable_session_active(&self) -> bool {
        self.session_active
    }
}

impl CastingHost for SimHost {
    fn known_actions(&self) -> Vec<ActionDescriptor> {
        self.known.clone()
    }

    fn all_cataloged_actions(&self) -> Vec<ActionDescriptor> {
        self.catalog.clone()
    }

    fn remaining_cooldown(&self, action_name: &str) -> Option<Seconds> {
        self.host_cooldowns.get(action_name).copied()
    }

    fn begin_cast(&mut self, action_name: &str, target: MemberId) -> Result<()> {
        if self.fail_casting {
            return Err(MendError::CastFailed(format!(
                "sim host refused to cast '{}'",
                action_name
            )));
        }
        self.cast_log.push((action_name.to_string(), target));
        Ok(())
    }
}

impl Targeting for SimHost {
    fn set_current_target(&mut self, member: MemberId) -> Result<()> {
        if self.fail_targeting {
            return Err(MendError::TargetingFailed(
                "sim host refused to acquire target".to_string(),
            ));
        }
        self.current_target = Some(member);
        Ok(())
    }

    fn clear_current_target(&mut self) {
        self.current_target = None;
    }
}
