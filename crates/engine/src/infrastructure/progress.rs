//! In-memory progress store.
//!
//! Default `ProgressRepo` adapter; a persistent backend can replace it
//! behind the same port. Entry-level locking in `DashMap` gives the atomic
//! read-modify-write that `ProgressRepo::increment` requires: two
//! verification callbacks finishing at the same time for the same
//! (player, quest, task) key serialize on the entry and can neither lose an
//! update nor advance a completed record.

use async_trait::async_trait;
use dashmap::DashMap;
use questline_domain::{IncrementOutcome, PlayerId, QuestId, TaskId, TaskProgress};

use super::ports::{ProgressRepo, RepoError};

type ProgressKey = (PlayerId, QuestId, TaskId);

#[derive(Default)]
pub struct InMemoryProgressRepo {
    records: DashMap<ProgressKey, TaskProgress>,
}

impl InMemoryProgressRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous completed-check, used by the default eligibility adapter.
    pub fn is_completed(&self, player: PlayerId, quest: &QuestId, task: &TaskId) -> bool {
        self.records
            .get(&(player, quest.clone(), task.clone()))
            .map(|entry| entry.is_completed())
            .unwrap_or(false)
    }
}

#[async_trait]
impl ProgressRepo for InMemoryProgressRepo {
    async fn get(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<Option<TaskProgress>, RepoError> {
        Ok(self
            .records
            .get(&(player, quest.clone(), task.clone()))
            .map(|entry| entry.clone()))
    }

    async fn increment(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<IncrementOutcome, RepoError> {
        let mut entry = self
            .records
            .entry((player, quest.clone(), task.clone()))
            .or_default();
        Ok(entry.increment())
    }

    async fn complete(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<(), RepoError> {
        let mut entry = self
            .records
            .entry((player, quest.clone(), task.clone()))
            .or_default();
        entry.complete();
        Ok(())
    }
}
