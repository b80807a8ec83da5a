//! Keyed profile persistence
//!
//! Character switches are serialized by the single tick thread, so the
//! store needs no concurrency handling; the engine just guarantees
//! save-before-load ordering on switch.

use std::fs;
use std::path::PathBuf;

use ahash::AHashMap;

use super::CharacterProfile;
use crate::core::error::Result;

pub trait ProfileStore {
    /// Load the profile for a character, `None` on first sight
    fn load_profile(&self, character_id: &str) -> Result<Option<CharacterProfile>>;

    fn save_profile(&mut self, character_id: &str, profile: &CharacterProfile) -> Result<()>;
}

/// One TOML file per character under a settings directory
#[derive(Debug, Clone)]
pub struct TomlProfileStore {
    dir: PathBuf,
}

impl TomlProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn profile_path(&self, character_id: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", sanitize_file_stem(character_id)))
    }
}

impl ProfileStore for TomlProfileStore {
    fn load_profile(&self, character_id: &str) -> Result<Option<CharacterProfile>> {
        let path = self.profile_path(character_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let profile: CharacterProfile = toml::from_str(&content)?;
        Ok(Some(profile))
    }

    fn save_profile(&mut self, character_id: &str, profile: &CharacterProfile) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(profile)?;
        fs::write(self.profile_path(character_id), content)?;
        tracing::debug!("saved profile for '{}'", character_id);
        Ok(())
    }
}

/// Character names come from the game; keep only filesystem-safe characters
fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "default".to_string()
    } else {
        stem
    }
}

/// In-memory store for tests and the demo binary's no-persistence mode
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: AHashMap<String, CharacterProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_profile(&self, character_id: &str) -> Result<Option<CharacterProfile>> {
        Ok(self.profiles.get(character_id).cloned())
    }

    fn save_profile(&mut self, character_id: &str, profile: &CharacterProfile) -> Result<()> {
        self.profiles.insert(character_id.to_string(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlProfileStore::new(dir.path());

        assert!(store.load_profile("Aria").unwrap().is_none());

        let mut profile = CharacterProfile::default();
        profile.health_threshold = 0.35;
        profile.bindings.auto_action = "Renew".to_string();
        store.save_profile("Aria", &profile).unwrap();

        let loaded = store.load_profile("Aria").unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_awkward_character_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlProfileStore::new(dir.path());

        let profile = CharacterProfile::default();
        store.save_profile("Sir Reginald / III", &profile).unwrap();
        assert!(store.load_profile("Sir Reginald / III").unwrap().is_some());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryProfileStore::new();
        let profile = CharacterProfile::default();
        store.save_profile("Aria", &profile).unwrap();
        assert_eq!(store.load_profile("Aria").unwrap(), Some(profile));
    }
}
