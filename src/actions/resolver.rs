//! Free-text action name resolution
//!
//! Requests come from user-edited bindings ("Minor Heal", "grp heal"),
//! while the host's capability list holds the canonical names ("Minor
//! Healing"). Resolution runs four tiers against the performer's learned
//! actions first, then the same tiers against the full catalog. Within a
//! tier, the safety classifier filters candidates when restricted mode is
//! on; a tier whose best candidate fails classification is skipped, not
//! fatal.

use super::catalog::ActionDescriptor;
use super::safety::is_safe;

/// Lowercase a name and strip all non-alphanumeric characters.
///
/// "Minor-Heal " and "minor heal" normalize identically, which is what
/// makes the containment tier tolerant of hyphens, spaces and suffixes.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Resolve a requested action name against the learned set, falling back
/// to the full catalog. Returns `None` when no tier yields an accepted
/// candidate.
pub fn resolve<'a>(
    request: &str,
    known: &'a [ActionDescriptor],
    catalog: &'a [ActionDescriptor],
    restrict_safe: bool,
) -> Option<&'a ActionDescriptor> {
    resolve_in(request, known, restrict_safe).or_else(|| resolve_in(request, catalog, restrict_safe))
}

fn resolve_in<'a>(
    request: &str,
    pool: &'a [ActionDescriptor],
    restrict_safe: bool,
) -> Option<&'a ActionDescriptor> {
    let accept = |action: &ActionDescriptor| !restrict_safe || is_safe(&action.name);

    // Tier 1: case-insensitive exact match
    if let Some(exact) = pool
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(request))
    {
        if accept(exact) {
            return Some(exact);
        }
    }

    // Tier 2: normalized mutual containment ("Minor Heal" vs "Minor Healing")
    let wanted = normalize_name(request);
    if !wanted.is_empty() {
        let found = pool
            .iter()
            .filter(|a| {
                let n = normalize_name(&a.name);
                !n.is_empty() && (n.contains(&wanted) || wanted.contains(&n))
            })
            .find(|a| accept(a));
        if found.is_some() {
            return found;
        }
    }

    // Tier 3: heal-family keyword heuristic
    if wanted.contains("heal") {
        let contains = |a: &ActionDescriptor, token: &str| a.name.to_lowercase().contains(token);

        let qualifier = if wanted.contains("minor") {
            Some("minor")
        } else if wanted.contains("major") {
            Some("major")
        } else {
            None
        };

        if let Some(q) = qualifier {
            let found = pool
                .iter()
                .filter(|a| contains(a, q) && contains(a, "heal"))
                .find(|a| accept(a));
            if found.is_some() {
                return found;
            }
        }

        // Any heal-family action as a last resort
        return pool
            .iter()
            .filter(|a| contains(a, "heal"))
            .find(|a| accept(a));
    }

    None
}
