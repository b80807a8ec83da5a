//! Action model: descriptors from the host, name resolution, safety classification

pub mod catalog;
pub mod resolver;
pub mod safety;

pub use catalog::{sanitize_action_name, ActionDescriptor, DurationUnit, RawDuration};
pub use resolver::{normalize_name, resolve};
pub use safety::is_safe;
