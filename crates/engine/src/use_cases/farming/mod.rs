//! Farming task use cases.
//!
//! Converts one block-harvest event into progress on every listening task.
//! The flow per event is:
//! 1. Drop NPC actors and players without an active session
//! 2. Derive the change set (a stacking break may be several changes)
//! 3. Per change: maturity gate, then declarative task matching
//! 4. Per matched task: verification (sync inline, async deferred)
//! 5. Per accepted pair: mutate progress, exactly once

use std::sync::Arc;

use questline_domain::{HarvestEvent, PlayerId};

use crate::infrastructure::ports::SessionPort;

mod derive;
mod matcher;
mod maturity;
mod progress;
mod verify;

pub use derive::ChangeSetDeriver;
pub use matcher::{PendingTask, TaskMatcher};
pub use maturity::MaturityFilter;
pub use progress::ProgressMutator;
pub use verify::{
    ActivityLogProvider, BlockTrackerProvider, Evaluation, VerificationCoordinator,
    VerificationFailure, VerificationProvider, Verdict,
};

/// Entry point for the farming progress pipeline, invoked by the event
/// subscription layer once per triggering event.
pub struct FarmingTaskHandler {
    session: Arc<dyn SessionPort>,
    deriver: ChangeSetDeriver,
    maturity: MaturityFilter,
    matcher: TaskMatcher,
    coordinator: VerificationCoordinator,
    mutator: Arc<ProgressMutator>,
}

impl FarmingTaskHandler {
    pub fn new(
        session: Arc<dyn SessionPort>,
        deriver: ChangeSetDeriver,
        maturity: MaturityFilter,
        matcher: TaskMatcher,
        coordinator: VerificationCoordinator,
        mutator: Arc<ProgressMutator>,
    ) -> Self {
        Self {
            session,
            deriver,
            maturity,
            matcher,
            coordinator,
            mutator,
        }
    }

    /// Handle one triggering event for its player.
    ///
    /// Synchronous matches are fully processed before this returns; matches
    /// gated on the asynchronous verification source resolve later on their
    /// own tasks and never delay the rest of the event. A store failure on
    /// one task is logged and never blocks sibling tasks or the remaining
    /// changes of the event.
    pub async fn handle(&self, event: HarvestEvent) {
        if event.actor.is_npc {
            return;
        }
        let player: PlayerId = event.actor.player_id;
        if !self.session.is_connected(player) {
            return;
        }

        for change in self.deriver.derive(&event) {
            if !self.maturity.passes(&change) {
                continue;
            }
            for pending in self.matcher.matches(player, event.method, &change) {
                match self.coordinator.verify(player, &pending, &change) {
                    Verdict::Accept => {
                        if let Err(e) = self.mutator.apply(player, &pending).await {
                            tracing::error!(
                                quest_id = %pending.task.quest_id,
                                task_id = %pending.task.task_id,
                                player_id = %player,
                                error = %e,
                                "progress update failed"
                            );
                        }
                    }
                    Verdict::Reject | Verdict::Deferred => {}
                }
            }
        }
    }
}
