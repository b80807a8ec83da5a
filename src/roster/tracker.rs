//! Per-tick roster snapshots with composition change detection
//!
//! Refreshed once per tick from authoritative host state. The tracker's
//! single contribution to the suppression machinery is the "composition
//! changed" signal: the identity set differs from last tick's, regardless
//! of order or health.

use ahash::AHashSet;

use super::{Member, Roster};
use crate::core::types::MemberId;
use crate::host::{MemberStats, WorldState};

#[derive(Debug, Default)]
pub struct RosterTracker {
    prev_ids: AHashSet<MemberId>,
    last_logged_count: Option<usize>,
}

impl RosterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current party. Returns the roster and whether its
    /// composition differs from the previous tick.
    pub fn refresh(&mut self, world: &impl WorldState) -> (Roster, bool) {
        let mut members = Vec::new();
        let mut seen = AHashSet::new();

        if let Some(stats) = world.current_self() {
            seen.insert(stats.id);
            members.push(build_member(stats, 0, true));
        }

        // The host already omits group entries without backing stats, but
        // some report self inside the group list as well; keep one entry
        // per identity
        for (i, stats) in world.current_group().into_iter().enumerate() {
            if !seen.insert(stats.id) {
                continue;
            }
            members.push(build_member(stats, i + 1, false));
        }

        self.finish(Roster::new(members))
    }

    /// Host state is transiently unavailable this tick: an empty roster,
    /// never an error. Leaving a populated party still counts as a change.
    pub fn refresh_empty(&mut self) -> (Roster, bool) {
        self.finish(Roster::default())
    }

    fn finish(&mut self, roster: Roster) -> (Roster, bool) {
        let ids = roster.identity_set();
        let changed = ids != self.prev_ids;
        self.prev_ids = ids;

        if self.last_logged_count != Some(roster.len()) {
            self.last_logged_count = Some(roster.len());
            let names: Vec<&str> = roster.members().iter().map(|m| m.name.as_str()).collect();
            tracing::info!("party roster: {} member(s) [{}]", roster.len(), names.join(", "));
        }

        (roster, changed)
    }
}

/// Display name resolution order: stats-provided name, host fallback
/// identifier, synthesized "Member{N}" ("Player" for self).
fn build_member(stats: MemberStats, position: usize, is_self: bool) -> Member {
    let name = stats
        .name
        .filter(|n| !n.is_empty())
        .or_else(|| stats.fallback_name.clone().filter(|n| !n.is_empty()))
        .unwrap_or_else(|| {
            if is_self {
                "Player".to_string()
            } else {
                format!("Member{}", position)
            }
        });

    Member {
        id: stats.id,
        name,
        current_hp: stats.current_hp,
        max_hp: stats.max_hp,
        is_self,
    }
}
