//! Use cases: event-to-progress orchestration.

pub mod farming;

pub use farming::FarmingTaskHandler;
