//! Quest and task definitions.
//!
//! A quest owns an ordered list of tasks. Task options arrive as a raw
//! `ConfigValue` map straight from the authoring layer; the engine only ever
//! sees the typed `FarmingTaskConfig` parsed from that map at load time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{QuestId, TaskId};
use crate::value_objects::{BlockKind, ConfigValue, HarvestMethod};

/// Default lookback window for the asynchronous placement lookup, in seconds.
pub const DEFAULT_ACTIVITY_LOOKBACK_SECS: u64 = 3600;

/// Task type name handled by the farming progress engine.
pub const FARMING_TASK_TYPE: &str = "farming";

/// One authored task inside a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    task_type: String,
    options: HashMap<String, ConfigValue>,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        task_type: impl Into<String>,
        options: HashMap<String, ConfigValue>,
    ) -> Self {
        Self {
            id: id.into(),
            task_type: task_type.into(),
            options,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    pub fn option(&self, key: &str) -> Option<&ConfigValue> {
        self.options.get(key)
    }
}

/// A quest: an identifier plus its ordered tasks. Immutable for the duration
/// of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    id: QuestId,
    tasks: Vec<Task>,
}

impl Quest {
    pub fn new(id: impl Into<QuestId>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            tasks,
        }
    }

    pub fn id(&self) -> &QuestId {
        &self.id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Typed, validated configuration for one farming task.
///
/// Parsed once when quest definitions load; event handling never touches the
/// raw option map. Unknown option keys are ignored for forward
/// compatibility.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmingTaskConfig {
    /// Number of accepted changes required to complete the task.
    pub amount: u32,
    /// Accepted block kinds. `None` means any kind matches.
    pub blocks: Option<Vec<BlockKind>>,
    /// Optional metadata/variant filter on the harvested block.
    pub data: Option<i32>,
    /// Optional constraint on how the block left the world.
    pub mode: Option<HarvestMethod>,
    /// Gate progress behind the synchronous placement tracker.
    pub check_block_tracker: bool,
    /// Gate progress behind the asynchronous activity-log lookup.
    pub check_activity_log: bool,
    /// Lookback window for the activity-log lookup.
    pub activity_lookback_secs: u64,
}

impl FarmingTaskConfig {
    /// Parse and validate a task's raw options.
    ///
    /// This is the load-time validation step; a task that fails here is
    /// rejected before the engine ever processes an event for it.
    pub fn parse(task: &Task) -> Result<Self, DomainError> {
        let task_id = task.id().as_str();

        let amount = task
            .option("amount")
            .ok_or_else(|| DomainError::config(task_id, "missing required option 'amount'"))?
            .as_int()
            .ok_or_else(|| DomainError::config(task_id, "'amount' must be an integer"))?;
        if amount <= 0 {
            return Err(DomainError::config(task_id, "'amount' must be positive"));
        }
        let amount = u32::try_from(amount)
            .map_err(|_| DomainError::config(task_id, "'amount' is out of range"))?;

        // "block" and "blocks" are aliases; either may hold one kind or a list.
        let blocks = match task.option("blocks").or_else(|| task.option("block")) {
            Some(value) => {
                let names = value.as_str_list().ok_or_else(|| {
                    DomainError::config(task_id, "'block'/'blocks' must be a string or string list")
                })?;
                Some(names.into_iter().map(BlockKind::new).collect())
            }
            None => None,
        };

        let data = match task.option("data") {
            Some(value) => {
                let raw = value
                    .as_int()
                    .ok_or_else(|| DomainError::config(task_id, "'data' must be an integer"))?;
                Some(
                    i32::try_from(raw)
                        .map_err(|_| DomainError::config(task_id, "'data' is out of range"))?,
                )
            }
            None => None,
        };

        let mode = match task.option("mode") {
            Some(value) => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| DomainError::config(task_id, "'mode' must be a string"))?;
                Some(HarvestMethod::parse(raw).ok_or_else(|| {
                    DomainError::config(task_id, format!("unrecognized mode '{raw}'"))
                })?)
            }
            None => None,
        };

        let check_block_tracker = Self::parse_bool(task, "check-playerblocktracker")?;
        let check_activity_log = Self::parse_bool(task, "check-coreprotect")?;

        let activity_lookback_secs = match task.option("check-coreprotect-time") {
            Some(value) => {
                let secs = value.as_int().ok_or_else(|| {
                    DomainError::config(task_id, "'check-coreprotect-time' must be an integer")
                })?;
                if secs <= 0 {
                    return Err(DomainError::config(
                        task_id,
                        "'check-coreprotect-time' must be positive",
                    ));
                }
                secs as u64
            }
            None => DEFAULT_ACTIVITY_LOOKBACK_SECS,
        };

        Ok(Self {
            amount,
            blocks,
            data,
            mode,
            check_block_tracker,
            check_activity_log,
            activity_lookback_secs,
        })
    }

    fn parse_bool(task: &Task, key: &str) -> Result<bool, DomainError> {
        match task.option(key) {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| DomainError::config(task.id().as_str(), format!("'{key}' must be a boolean"))),
            None => Ok(false),
        }
    }

    /// Whether the given kind satisfies this task's material constraint.
    pub fn matches_kind(&self, kind: &BlockKind) -> bool {
        match &self.blocks {
            Some(blocks) => blocks.contains(kind),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(entries: Vec<(&str, ConfigValue)>) -> HashMap<String, ConfigValue> {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[test]
    fn parses_minimal_task() {
        let task = Task::new("farm-crops", FARMING_TASK_TYPE, options(vec![("amount", ConfigValue::Int(5))]));
        let config = FarmingTaskConfig::parse(&task).expect("valid config");
        assert_eq!(config.amount, 5);
        assert_eq!(config.blocks, None);
        assert!(!config.check_block_tracker);
        assert!(!config.check_activity_log);
        assert_eq!(config.activity_lookback_secs, DEFAULT_ACTIVITY_LOOKBACK_SECS);
    }

    #[test]
    fn missing_amount_is_a_config_error() {
        let task = Task::new("farm-crops", FARMING_TASK_TYPE, options(vec![]));
        assert!(FarmingTaskConfig::parse(&task).is_err());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let task = Task::new("farm-crops", FARMING_TASK_TYPE, options(vec![("amount", ConfigValue::Int(0))]));
        assert!(FarmingTaskConfig::parse(&task).is_err());
    }

    #[test]
    fn amount_beyond_u32_range_is_rejected() {
        let task = Task::new(
            "farm-crops",
            FARMING_TASK_TYPE,
            options(vec![("amount", ConfigValue::Int(u32::MAX as i64 + 2))]),
        );
        assert!(FarmingTaskConfig::parse(&task).is_err());
    }

    #[test]
    fn data_beyond_i32_range_is_rejected() {
        let task = Task::new(
            "farm-crops",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(1)),
                ("data", ConfigValue::Int(i32::MAX as i64 + 1)),
            ]),
        );
        assert!(FarmingTaskConfig::parse(&task).is_err());
    }

    #[test]
    fn block_and_blocks_are_aliases() {
        let single = Task::new(
            "a",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(1)),
                ("block", ConfigValue::from("wheat")),
            ]),
        );
        let listed = Task::new(
            "b",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(1)),
                ("blocks", ConfigValue::from(vec!["wheat", "carrots"])),
            ]),
        );
        let single = FarmingTaskConfig::parse(&single).expect("valid");
        let listed = FarmingTaskConfig::parse(&listed).expect("valid");
        assert!(single.matches_kind(&BlockKind::new("wheat")));
        assert!(!single.matches_kind(&BlockKind::new("carrots")));
        assert!(listed.matches_kind(&BlockKind::new("carrots")));
    }

    #[test]
    fn no_block_list_matches_any_kind() {
        let task = Task::new("farm-crops", FARMING_TASK_TYPE, options(vec![("amount", ConfigValue::Int(1))]));
        let config = FarmingTaskConfig::parse(&task).expect("valid");
        assert!(config.matches_kind(&BlockKind::new("bamboo")));
    }

    #[test]
    fn parses_verification_options() {
        let task = Task::new(
            "farm-crops",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(3)),
                ("check-playerblocktracker", ConfigValue::Bool(true)),
                ("check-coreprotect", ConfigValue::Bool(true)),
                ("check-coreprotect-time", ConfigValue::Int(600)),
            ]),
        );
        let config = FarmingTaskConfig::parse(&task).expect("valid");
        assert!(config.check_block_tracker);
        assert!(config.check_activity_log);
        assert_eq!(config.activity_lookback_secs, 600);
    }

    #[test]
    fn unrecognized_mode_is_rejected() {
        let task = Task::new(
            "farm-crops",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(1)),
                ("mode", ConfigValue::from("plant")),
            ]),
        );
        assert!(FarmingTaskConfig::parse(&task).is_err());
    }

    #[test]
    fn unknown_options_are_ignored() {
        let task = Task::new(
            "farm-crops",
            FARMING_TASK_TYPE,
            options(vec![
                ("amount", ConfigValue::Int(1)),
                ("worlds", ConfigValue::from(vec!["overworld"])),
            ]),
        );
        assert!(FarmingTaskConfig::parse(&task).is_ok());
    }
}
