//! Questline domain: core types, value objects, and invariants for the
//! quest progress engine. No I/O, no async, no engine concerns.

pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use entities::{FarmingTaskConfig, Quest, Task, DEFAULT_ACTIVITY_LOOKBACK_SECS, FARMING_TASK_TYPE};
pub use error::DomainError;
pub use events::{Actor, ChangeRecord, HarvestEvent};
pub use ids::{PlayerId, QuestId, TaskId};
pub use value_objects::{
    BlockKind, BlockPos, BlockSnapshot, ConfigValue, Growth, HarvestMethod, IncrementOutcome,
    TaskProgress,
};
