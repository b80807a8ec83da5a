//! Mendbot - real-time party-assist automation engine
//!
//! Watches a live party roster, picks whom to help, resolves free-text
//! action names against the host's capability list, and dispatches casts
//! through injected host interfaces. The decision core is deterministic
//! and clock-free; a synthetic host under `host::sim` drives it in tests
//! and the demo binary.

pub mod actions;
pub mod core;
pub mod engine;
pub mod host;
pub mod profile;
pub mod roster;
