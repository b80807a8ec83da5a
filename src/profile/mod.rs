//! Per-character assist settings
//!
//! One profile per character identity, loaded at switch-in, saved on edit
//! and at switch-out. The profile doubles as the engine's live settings;
//! there is no separate runtime copy to drift out of sync.

pub mod store;

pub use store::{MemoryProfileStore, ProfileStore, TomlProfileStore};

use serde::{Deserialize, Serialize};

/// A click trigger's bound action, with an optional modifier variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    /// Requested action name; empty means "no action"
    pub action: String,
    /// Variant used while the modifier key is held
    pub modified_action: String,
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            action: String::new(),
            modified_action: String::new(),
        }
    }
}

impl Binding {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            modified_action: String::new(),
        }
    }
}

/// Trigger inputs the presentation layer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Primary,
    Secondary,
    Tertiary,
}

/// All action bindings for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub primary: Binding,
    pub secondary: Binding,
    pub tertiary: Binding,
    /// Action used by automatic assistance
    pub auto_action: String,
    /// Manual slots: self, then group members 1..3
    pub slot_actions: [String; 4],
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            primary: Binding::new("Minor Healing"),
            secondary: Binding::new("Major Healing"),
            tertiary: Binding::new("Group Heal"),
            auto_action: "Minor Healing".to_string(),
            slot_actions: [
                "Minor Healing".to_string(),
                "Minor Healing".to_string(),
                "Minor Healing".to_string(),
                "Minor Healing".to_string(),
            ],
        }
    }
}

impl Bindings {
    /// Bound action for a trigger, honoring the modifier variant when it
    /// is non-empty
    pub fn for_trigger(&self, trigger: Trigger, modified: bool) -> &str {
        let binding = match trigger {
            Trigger::Primary => &self.primary,
            Trigger::Secondary => &self.secondary,
            Trigger::Tertiary => &self.tertiary,
        };
        if modified && !binding.modified_action.is_empty() {
            &binding.modified_action
        } else {
            &binding.action
        }
    }
}

/// Persisted assist configuration for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterProfile {
    /// Master switch for automatic target acquisition and casting
    pub auto_assist: bool,
    /// Health fraction below which a member needs help, in (0, 1];
    /// zero disables automatic engagement
    pub health_threshold: f64,
    /// Delay before automatic behavior resumes after a disruptive event
    pub grace_secs: f64,
    /// Fallback minimum time between casts when the host declares no
    /// usable cooldown
    pub default_cooldown_secs: f64,
    /// Only allow actions the safety classifier accepts
    pub restrict_to_safe: bool,
    pub bindings: Bindings,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            auto_assist: true,
            health_threshold: 0.5,
            grace_secs: 2.0,
            default_cooldown_secs: 1.5,
            restrict_to_safe: true,
            bindings: Bindings::default(),
        }
    }
}

impl CharacterProfile {
    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.health_threshold) {
            return Err(format!(
                "health_threshold ({}) must be within [0, 1]",
                self.health_threshold
            ));
        }

        if self.grace_secs < 0.0 {
            return Err(format!("grace_secs ({}) must not be negative", self.grace_secs));
        }

        if self.default_cooldown_secs < 0.0 {
            return Err(format!(
                "default_cooldown_secs ({}) must not be negative",
                self.default_cooldown_secs
            ));
        }

        Ok(())
    }
}
