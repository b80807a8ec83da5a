//! The decision core: suppression, targeting, cooldowns, dispatch, tick loop

pub mod cooldown;
pub mod dispatcher;
pub mod suppression;
pub mod target;
pub mod tick;

pub use cooldown::CooldownTracker;
pub use dispatcher::{ActionDispatcher, BlockReason, DispatchOutcome};
pub use suppression::{SuppressReason, SuppressionController};
pub use tick::{Engine, EngineEvent, StatusSnapshot};
