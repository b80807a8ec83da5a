//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle for a roster member, stable for the member's lifetime
/// in the roster. The host integration mints these; the engine only ever
/// compares and forwards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

/// Host session time in seconds. The engine never reads a clock; every
/// entry point takes `now` from the caller so tests stay deterministic.
pub type Seconds = f64;
