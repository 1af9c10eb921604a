//! Domain entities (explicit re-export list).

pub mod quest;

pub use quest::{FarmingTaskConfig, Quest, Task, DEFAULT_ACTIVITY_LOOKBACK_SECS, FARMING_TASK_TYPE};
