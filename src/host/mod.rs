//! Collaborator interfaces implemented by the host integration
//!
//! The decision core never touches the game runtime directly; everything
//! it needs arrives through these traits, injected by construction. All
//! calls are synchronous and best-effort: a host with nothing to report
//! returns `None`/empty rather than blocking.

pub mod sim;

use crate::actions::catalog::ActionDescriptor;
use crate::core::error::Result;
use crate::core::types::{MemberId, Seconds};

/// Raw per-member stats as the host reports them
///
/// Only a snapshot; the engine re-reads these every tick and never holds
/// onto them across ticks.
#[derive(Debug, Clone)]
pub struct MemberStats {
    pub id: MemberId,
    /// Display name from the stats object, if it has one
    pub name: Option<String>,
    /// Host-side fallback identifier (e.g. a sim or NPC name)
    pub fallback_name: Option<String>,
    pub current_hp: i32,
    pub max_hp: i32,
}

/// Authoritative world state, read once per tick
pub trait WorldState {
    /// Stats for the controlled character, if one is active
    fn current_self(&self) -> Option<MemberStats>;

    /// Stats for current group members, in host-reported order
    fn current_group(&self) -> Vec<MemberStats>;

    /// Identifier of the active area/scene
    fn current_context_id(&self) -> String;

    /// False while on character select, loading screens and menus;
    /// gates all automatic behavior
    fn is_interactable_session_active(&self) -> bool;
}

/// Capability list and cast invocation
pub trait CastingHost {
    /// Actions the performer has learned; changes at runtime
    fn known_actions(&self) -> Vec<ActionDescriptor>;

    /// Every action cataloged by the host, superset of `known_actions`,
    /// used as a fallback resolution source
    fn all_cataloged_actions(&self) -> Vec<ActionDescriptor>;

    /// Authoritative remaining cooldown, when the host can report one
    fn remaining_cooldown(&self, action_name: &str) -> Option<Seconds>;

    fn begin_cast(&mut self, action_name: &str, target: MemberId) -> Result<()>;
}

/// Current-target manipulation
pub trait Targeting {
    fn set_current_target(&mut self, member: MemberId) -> Result<()>;

    fn clear_current_target(&mut self);
}

/// Umbrella trait for a full host implementation
pub trait Host: WorldState + CastingHost + Targeting {}

impl<T: WorldState + CastingHost + Targeting> Host for T {}
