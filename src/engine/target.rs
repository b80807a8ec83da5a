//! Choosing whom to assist
//!
//! Always the lowest health fraction among members with valid max health.
//! Ties break by roster order (first wins), which keeps selection stable
//! across ticks with identical health.

use ordered_float::OrderedFloat;

use crate::roster::{Member, Roster};

/// Lowest-fraction member for passive display, ignoring any threshold
pub fn lowest(roster: &Roster) -> Option<&Member> {
    let mut best: Option<(&Member, OrderedFloat<f64>)> = None;

    for member in roster.members() {
        let Some(fraction) = member.health_fraction() else {
            continue;
        };
        let fraction = OrderedFloat(fraction);
        match best {
            // Strict comparison: earlier roster entries win ties
            Some((_, best_fraction)) if fraction >= best_fraction => {}
            _ => best = Some((member, fraction)),
        }
    }

    best.map(|(member, _)| member)
}

/// The candidate for automatic assistance: lowest fraction among living
/// members strictly below the threshold. A zero threshold disables
/// automatic engagement entirely.
pub fn actionable(roster: &Roster, threshold: f64) -> Option<&Member> {
    if threshold <= 0.0 {
        return None;
    }

    let mut best: Option<(&Member, OrderedFloat<f64>)> = None;

    for member in roster.members() {
        // Dead members still display, but are not auto-assist targets
        if member.current_hp <= 0 {
            continue;
        }
        let Some(fraction) = member.health_fraction() else {
            continue;
        };
        if fraction >= threshold {
            continue;
        }
        let fraction = OrderedFloat(fraction);
        match best {
            Some((_, best_fraction)) if fraction >= best_fraction => {}
            _ => best = Some((member, fraction)),
        }
    }

    best.map(|(member, _)| member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemberId;

    fn member(name: &str, hp: i32, max: i32) -> Member {
        Member {
            id: MemberId::new(),
            name: name.to_string(),
            current_hp: hp,
            max_hp: max,
            is_self: name == "Self",
        }
    }

    #[test]
    fn test_lowest_fraction_wins() {
        let roster = Roster::new(vec![
            member("Self", 100, 100),
            member("A", 40, 100),
            member("B", 10, 100),
        ]);
        assert_eq!(lowest(&roster).unwrap().name, "B");
    }

    #[test]
    fn test_ties_break_by_roster_order() {
        let roster = Roster::new(vec![member("Self", 30, 100), member("A", 30, 100)]);
        assert_eq!(lowest(&roster).unwrap().name, "Self");
    }

    #[test]
    fn test_invalid_max_health_ignored() {
        let roster = Roster::new(vec![member("Ghost", 0, 0), member("A", 90, 100)]);
        assert_eq!(lowest(&roster).unwrap().name, "A");
    }

    #[test]
    fn test_threshold_gates_actionable() {
        let roster = Roster::new(vec![member("Self", 100, 100), member("A", 60, 100)]);
        assert!(actionable(&roster, 0.5).is_none());
        assert_eq!(actionable(&roster, 0.7).unwrap().name, "A");
        // Strictly below: a member exactly at the threshold is not actionable
        assert!(actionable(&roster, 0.6).is_none());
    }

    #[test]
    fn test_zero_threshold_disables_auto() {
        let roster = Roster::new(vec![member("A", 1, 100)]);
        assert!(actionable(&roster, 0.0).is_none());
    }

    #[test]
    fn test_dead_members_skipped_for_auto() {
        let roster = Roster::new(vec![member("A", 0, 100), member("B", 20, 100)]);
        // Display still shows the dead member as lowest
        assert_eq!(lowest(&roster).unwrap().name, "A");
        // Auto-assist goes to the lowest living member instead
        assert_eq!(actionable(&roster, 0.5).unwrap().name, "B");
    }
}
