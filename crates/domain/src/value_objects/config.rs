//! Raw task configuration values.
//!
//! Quest definition files hand each task an arbitrary map of named options.
//! `ConfigValue` is the typed-but-unvalidated form of one option; the typed
//! per-task-kind records (see `entities::FarmingTaskConfig`) are parsed from
//! this map once at load time and are immutable afterwards.

use serde::{Deserialize, Serialize};

/// One raw configuration option value as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Bool(bool),
    Str(String),
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// A string option, or a list of string options, flattened. Authored
    /// files allow `block: wheat` and `blocks: [wheat, carrots]`
    /// interchangeably.
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::Str(v) => Some(vec![v.as_str()]),
            Self::List(items) => items.iter().map(|item| item.as_str()).collect(),
            _ => None,
        }
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(ConfigValue::from).collect())
    }
}
