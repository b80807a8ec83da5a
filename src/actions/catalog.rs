//! Action descriptors as reported by the host integration
//!
//! The host's capability list is dynamic (actions are learned at runtime)
//! and incompletely typed, so a descriptor carries only what the narrow
//! capability interface can promise: a name, and maybe a raw duration
//! value of uncertain unit.

use serde::{Deserialize, Serialize};

/// Unit hint for a raw duration field, when the host integration knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    Seconds,
    Millis,
}

/// A duration-like value probed from host action data, not yet normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDuration {
    pub value: f64,
    /// None when the host field carried no unit information
    pub unit: Option<DurationUnit>,
}

impl RawDuration {
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }

    pub fn with_unit(value: f64, unit: DurationUnit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }
}

/// An invocable capability known to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    /// Declared cooldown from the action's own data, if any
    pub declared_cooldown: Option<RawDuration>,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_cooldown: None,
        }
    }

    pub fn with_cooldown(name: impl Into<String>, cooldown: RawDuration) -> Self {
        Self {
            name: name.into(),
            declared_cooldown: Some(cooldown),
        }
    }
}

/// Trim a requested action name, treating empty input and the literal
/// "None" sentinel as "no action bound".
pub fn sanitize_action_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed)
    }
}
