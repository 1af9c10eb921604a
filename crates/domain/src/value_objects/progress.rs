//! Per-(player, task) progress state.

use serde::{Deserialize, Serialize};

/// Outcome of one increment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOutcome {
    /// Counter advanced to this value.
    Advanced(u32),
    /// The task was already completed; the counter was left untouched.
    AlreadyCompleted,
}

/// Mutable progress record for one (player, task) pair.
///
/// Invariant: once `completed` is set, the counter never moves again.
/// `increment` enforces this directly so the invariant holds even if an
/// upstream guard is bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    amount: u32,
    completed: bool,
}

impl TaskProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance the counter by one, unless the task is already completed.
    pub fn increment(&mut self) -> IncrementOutcome {
        if self.completed {
            return IncrementOutcome::AlreadyCompleted;
        }
        self.amount += 1;
        IncrementOutcome::Advanced(self.amount)
    }

    /// Mark the task completed. Idempotent.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}
