//! Session quest catalog.
//!
//! Quest authoring and validation live outside this engine; the catalog is
//! handed a fully loaded quest set, parses the farming task configs once,
//! and serves them unchanged for the rest of the session.

use std::sync::Arc;

use questline_domain::{
    DomainError, FarmingTaskConfig, PlayerId, Quest, QuestId, TaskId, FARMING_TASK_TYPE,
};

use super::ports::{EligibilityPort, FarmingTaskRef, QuestCatalogPort};
use super::progress::InMemoryProgressRepo;

/// Immutable catalog of the session's farming tasks.
pub struct StaticQuestCatalog {
    tasks: Vec<Arc<FarmingTaskRef>>,
}

impl StaticQuestCatalog {
    /// Build the catalog from loaded quest definitions, validating every
    /// farming task's options up front. A single bad task rejects the load;
    /// configuration errors must never surface during event handling.
    pub fn new(quests: &[Quest]) -> Result<Self, DomainError> {
        let mut tasks = Vec::new();
        for quest in quests {
            for task in quest.tasks() {
                if task.task_type() != FARMING_TASK_TYPE {
                    continue;
                }
                let config = FarmingTaskConfig::parse(task)?;
                tasks.push(Arc::new(FarmingTaskRef {
                    quest_id: quest.id().clone(),
                    task_id: task.id().clone(),
                    config,
                }));
            }
        }
        Ok(Self { tasks })
    }
}

impl QuestCatalogPort for StaticQuestCatalog {
    fn farming_tasks(&self) -> Vec<Arc<FarmingTaskRef>> {
        self.tasks.clone()
    }
}

/// Default eligibility adapter: a player may progress a task as long as it
/// is not completed. The full framework predicate (quest started, task
/// unlocked, prerequisites) belongs to the excluded authoring framework and
/// can be wired in behind the same port.
pub struct CatalogEligibility {
    progress: Arc<InMemoryProgressRepo>,
}

impl CatalogEligibility {
    pub fn new(progress: Arc<InMemoryProgressRepo>) -> Self {
        Self { progress }
    }
}

impl EligibilityPort for CatalogEligibility {
    fn is_eligible(&self, player: PlayerId, quest: &QuestId, task: &TaskId) -> bool {
        !self.progress.is_completed(player, quest, task)
    }
}
