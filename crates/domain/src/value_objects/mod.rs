//! Value objects: immutable domain values with their invariants.

pub mod block;
pub mod config;
pub mod progress;

pub use block::{BlockKind, BlockPos, BlockSnapshot, Growth, HarvestMethod};
pub use config::ConfigValue;
pub use progress::{IncrementOutcome, TaskProgress};
