//! Progress mutation: the single write path for task progress.

use std::sync::Arc;

use questline_domain::{IncrementOutcome, PlayerId};

use crate::infrastructure::ports::{AdvancementPort, DiagnosticsPort, ProgressRepo, RepoError};

use super::matcher::PendingTask;

/// Applies one accepted change to a task's progress.
///
/// Called exactly once per accepted (task, change) pair, either inline
/// during event handling or later from a verification callback. It depends
/// only on the captured `PendingTask`, so the callback context needs no
/// state from the original call.
pub struct ProgressMutator {
    progress: Arc<dyn ProgressRepo>,
    advancement: Arc<dyn AdvancementPort>,
    diagnostics: Arc<dyn DiagnosticsPort>,
}

impl ProgressMutator {
    pub fn new(
        progress: Arc<dyn ProgressRepo>,
        advancement: Arc<dyn AdvancementPort>,
        diagnostics: Arc<dyn DiagnosticsPort>,
    ) -> Self {
        Self {
            progress,
            advancement,
            diagnostics,
        }
    }

    pub async fn apply(&self, player: PlayerId, pending: &PendingTask) -> Result<(), RepoError> {
        let task = &pending.task;
        let amount = match self
            .progress
            .increment(player, &task.quest_id, &task.task_id)
            .await?
        {
            // The store refused the increment: the task completed between
            // matching and this call (a late verification callback).
            IncrementOutcome::AlreadyCompleted => return Ok(()),
            IncrementOutcome::Advanced(amount) => amount,
        };

        self.diagnostics.debug(
            &format!("Incrementing task progress (now {amount})"),
            &task.quest_id,
            &task.task_id,
            player,
        );

        let target = task.config.amount;
        if amount >= target {
            self.diagnostics.debug(
                "Marking task as complete",
                &task.quest_id,
                &task.task_id,
                player,
            );
            self.progress
                .complete(player, &task.quest_id, &task.task_id)
                .await?;
        }

        self.advancement
            .progress_made(player, &task.quest_id, &task.task_id, amount, target);
        Ok(())
    }
}
