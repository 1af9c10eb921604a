//! Declarative task matching.

use std::sync::Arc;

use questline_domain::{ChangeRecord, HarvestMethod, PlayerId};

use crate::infrastructure::ports::{
    DiagnosticsPort, EligibilityPort, FarmingTaskRef, QuestCatalogPort,
};

/// One candidate match produced by the matcher: a task whose constraints the
/// change satisfies, awaiting verification. Ephemeral; the deferred
/// verification path captures a clone and nothing else.
#[derive(Clone)]
pub struct PendingTask {
    pub task: Arc<FarmingTaskRef>,
}

/// Enumerates every task, across every active quest, that a change may
/// advance for a player.
///
/// Tasks are evaluated independently: a rejection of one task never
/// short-circuits its siblings, and the same change may match any number of
/// tasks across different quests at once.
pub struct TaskMatcher {
    catalog: Arc<dyn QuestCatalogPort>,
    eligibility: Arc<dyn EligibilityPort>,
    diagnostics: Arc<dyn DiagnosticsPort>,
}

impl TaskMatcher {
    pub fn new(
        catalog: Arc<dyn QuestCatalogPort>,
        eligibility: Arc<dyn EligibilityPort>,
        diagnostics: Arc<dyn DiagnosticsPort>,
    ) -> Self {
        Self {
            catalog,
            eligibility,
            diagnostics,
        }
    }

    pub fn matches(
        &self,
        player: PlayerId,
        method: HarvestMethod,
        change: &ChangeRecord,
    ) -> Vec<PendingTask> {
        let mut pending = Vec::new();

        for task in self.catalog.farming_tasks() {
            if !self
                .eligibility
                .is_eligible(player, &task.quest_id, &task.task_id)
            {
                continue;
            }

            self.diagnostics.debug(
                &format!("Player farmed a crop {}", change.block.kind),
                &task.quest_id,
                &task.task_id,
                player,
            );

            if !task.config.matches_kind(&change.block.kind) {
                self.diagnostics
                    .debug("Block does not match, continuing...", &task.quest_id, &task.task_id, player);
                continue;
            }

            if let Some(data) = task.config.data {
                if change.block.data != Some(data) {
                    self.diagnostics
                        .debug("Data value does not match, continuing...", &task.quest_id, &task.task_id, player);
                    continue;
                }
            }

            if let Some(mode) = task.config.mode {
                if mode != method {
                    self.diagnostics
                        .debug("Harvest mode does not match, continuing...", &task.quest_id, &task.task_id, player);
                    continue;
                }
            }

            pending.push(PendingTask { task });
        }

        pending
    }
}
