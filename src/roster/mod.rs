//! Party roster model: who can be assisted right now

pub mod tracker;

pub use tracker::RosterTracker;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::actions::resolver::normalize_name;
use crate::core::types::MemberId;

/// A participant eligible to be assisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub current_hp: i32,
    pub max_hp: i32,
    pub is_self: bool,
}

impl Member {
    /// Current/max health clamped to [0, 1], or `None` when max health is
    /// invalid (such members are never assist candidates)
    pub fn health_fraction(&self) -> Option<f64> {
        if self.max_hp <= 0 {
            return None;
        }
        let fraction = self.current_hp as f64 / self.max_hp as f64;
        Some(fraction.clamp(0.0, 1.0))
    }
}

/// Ordered sequence of members: self first, then group members in
/// host-reported order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// The member at a manual-assist slot: 0 is self, 1.. are group
    /// members in roster order
    pub fn slot(&self, slot: usize) -> Option<&Member> {
        self.members.get(slot)
    }

    /// Find a member by name, using the same normalization as action
    /// resolution so "mend-bot" matches "Mendbot"
    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.members
            .iter()
            .find(|m| normalize_name(&m.name) == wanted)
    }

    /// Composition is the set of identities; order and health are ignored
    /// so HP ticking never reads as churn
    pub fn identity_set(&self) -> AHashSet<MemberId> {
        self.members.iter().map(|m| m.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, hp: i32, max: i32) -> Member {
        Member {
            id: MemberId::new(),
            name: name.to_string(),
            current_hp: hp,
            max_hp: max,
            is_self: false,
        }
    }

    #[test]
    fn test_health_fraction_clamped() {
        assert_eq!(member("a", 50, 100).health_fraction(), Some(0.5));
        assert_eq!(member("a", 150, 100).health_fraction(), Some(1.0));
        assert_eq!(member("a", -10, 100).health_fraction(), Some(0.0));
    }

    #[test]
    fn test_invalid_max_health_is_none() {
        assert_eq!(member("a", 50, 0).health_fraction(), None);
        assert_eq!(member("a", 50, -5).health_fraction(), None);
    }

    #[test]
    fn test_find_by_name_normalizes() {
        let roster = Roster::new(vec![member("Brina Swift", 10, 10)]);
        assert!(roster.find_by_name("brina-swift").is_some());
        assert!(roster.find_by_name("brina").is_none());
        assert!(roster.find_by_name("").is_none());
    }

    #[test]
    fn test_identity_set_ignores_order_and_health() {
        let a = member("a", 10, 10);
        let b = member("b", 5, 10);
        let forward = Roster::new(vec![a.clone(), b.clone()]);

        let mut hurt_b = b.clone();
        hurt_b.current_hp = 1;
        let reversed = Roster::new(vec![hurt_b, a]);

        assert_eq!(forward.identity_set(), reversed.identity_set());
    }
}
