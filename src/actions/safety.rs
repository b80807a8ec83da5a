//! Keyword-based safety classification
//!
//! Gates automatic casting: only actions that read as clearly beneficial
//! may be fired at party members without a human in the loop. The
//! classifier is deliberately conservative; an action matching neither
//! keyword set is treated as unsafe.

/// Substrings that mark an action as beneficial
const BENEFICIAL: &[&str] = &[
    "heal",
    "healing",
    "regrowth",
    "regenerate",
    "regeneration",
    "revitalize",
    "revive",
    "resurrect",
    "protection",
    "protect",
    "shield",
    "barrier",
    "ward",
    "bless",
    "blessing",
    "aura",
    "renew",
    "cure",
    "antidote",
    "cleanse",
    "invigor",
    "vital",
    "vigor",
    "fortify",
    "haste",
    "buff",
    "presence",
    "gift",
];

/// Substrings that mark an action as harmful, overriding any beneficial match
const HARMFUL: &[&str] = &[
    "bolt",
    "blast",
    "shock",
    "strike",
    "smite",
    "quake",
    "fang",
    "thorn",
    "poison",
    "rot",
    "decay",
    "death",
    "void",
    "inferno",
    "immolation",
    "storm",
    "lightning",
    "ice",
    "fire",
    "lava",
    "venom",
    "annihil",
    "devour",
    "doom",
    "sting",
    "fury",
    "rage",
    "wrath",
    "bite",
    "bleed",
];

/// Classify an action name as safe to automate.
///
/// Harmful keywords win over beneficial ones ("Fire Blessing" is unsafe),
/// and unknown names default to unsafe.
pub fn is_safe(action_name: &str) -> bool {
    if action_name.is_empty() {
        return false;
    }

    let name = action_name.to_lowercase();

    if HARMFUL.iter().any(|k| name.contains(k)) {
        return false;
    }

    BENEFICIAL.iter().any(|k| name.contains(k))
}
