//! Verification coordination: is the change attributable to the player?
//!
//! Each matched task consults a set of verification providers. A provider
//! answers immediately, answers later through a future, or has no opinion
//! for that task. Providers whose backing integration is missing fail
//! closed: the pair is rejected and a diagnostic is recorded, never the
//! other way around.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use questline_domain::{ChangeRecord, PlayerId};

use crate::infrastructure::ports::{
    ActivityLogPort, BlockTrackerPort, DiagnosticsPort,
};

use super::matcher::PendingTask;
use super::progress::ProgressMutator;

/// A provider's answer for one (task, change) pair. `true` accepts.
pub enum Evaluation {
    /// Provider is not configured for this task.
    Skip,
    /// Answer available now.
    Immediate(bool),
    /// Answer arrives later; the future resolves to the accept decision.
    Deferred(BoxFuture<'static, Result<bool, VerificationFailure>>),
}

/// A deferred lookup that did not produce an answer. Logged, treated as a
/// rejection, never retried and never shown to the player.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct VerificationFailure(String);

/// One verification source. Implementations decide per task whether they
/// apply, using the task's parsed configuration.
pub trait VerificationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        player: PlayerId,
        pending: &PendingTask,
        change: &ChangeRecord,
        diagnostics: &dyn DiagnosticsPort,
    ) -> Evaluation;
}

/// Source A: the synchronous placement tracker.
pub struct BlockTrackerProvider {
    integration: Option<Arc<dyn BlockTrackerPort>>,
}

impl BlockTrackerProvider {
    pub fn new(integration: Option<Arc<dyn BlockTrackerPort>>) -> Self {
        Self { integration }
    }
}

impl VerificationProvider for BlockTrackerProvider {
    fn name(&self) -> &'static str {
        "playerblocktracker"
    }

    fn evaluate(
        &self,
        player: PlayerId,
        pending: &PendingTask,
        change: &ChangeRecord,
        diagnostics: &dyn DiagnosticsPort,
    ) -> Evaluation {
        let task = &pending.task;
        if !task.config.check_block_tracker {
            return Evaluation::Skip;
        }

        let Some(tracker) = &self.integration else {
            diagnostics.debug(
                "check-playerblocktracker is enabled, but the tracker integration is not available",
                &task.quest_id,
                &task.task_id,
                player,
            );
            return Evaluation::Immediate(false);
        };

        diagnostics.debug(
            "Running playerblocktracker lookup",
            &task.quest_id,
            &task.task_id,
            player,
        );
        if tracker.is_player_placed(change.pos) {
            diagnostics.debug(
                "Lookup indicates this is a player placed block, continuing...",
                &task.quest_id,
                &task.task_id,
                player,
            );
            return Evaluation::Immediate(false);
        }
        diagnostics.debug("Lookup OK", &task.quest_id, &task.task_id, player);
        Evaluation::Immediate(true)
    }
}

/// Source B: the asynchronous activity-log lookup.
pub struct ActivityLogProvider {
    integration: Option<Arc<dyn ActivityLogPort>>,
}

impl ActivityLogProvider {
    pub fn new(integration: Option<Arc<dyn ActivityLogPort>>) -> Self {
        Self { integration }
    }
}

impl VerificationProvider for ActivityLogProvider {
    fn name(&self) -> &'static str {
        "activitylog"
    }

    fn evaluate(
        &self,
        player: PlayerId,
        pending: &PendingTask,
        change: &ChangeRecord,
        diagnostics: &dyn DiagnosticsPort,
    ) -> Evaluation {
        let task = &pending.task;
        if !task.config.check_activity_log {
            return Evaluation::Skip;
        }

        let Some(log) = &self.integration else {
            diagnostics.debug(
                "check-coreprotect is enabled, but the activity log integration is not available",
                &task.quest_id,
                &task.task_id,
                player,
            );
            return Evaluation::Immediate(false);
        };

        diagnostics.debug(
            "Running activity log lookup (may take a while)",
            &task.quest_id,
            &task.task_id,
            player,
        );

        let log = Arc::clone(log);
        let pos = change.pos;
        let lookback = task.config.activity_lookback_secs;
        Evaluation::Deferred(
            async move {
                log.was_placed_by_player(pos, lookback)
                    .await
                    .map(|placed| !placed)
                    .map_err(|e| VerificationFailure(e.to_string()))
            }
            .boxed(),
        )
    }
}

/// Outcome of coordination for one (task, change) pair.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// All enabled providers answered inline and accepted.
    Accept,
    /// An enabled provider rejected the pair (or was fail-closed).
    Reject,
    /// At least one answer is pending; the progress mutator will run from
    /// the callback if every deferred answer accepts.
    Deferred,
}

/// Runs every provider for a pair and combines their answers.
///
/// Providers are evaluated in registration order; the first inline
/// rejection stops the pair. Deferred answers compose require-ALL: every
/// pending future must accept before progress moves. Other matches of the
/// same event never wait on a deferral.
pub struct VerificationCoordinator {
    providers: Vec<Arc<dyn VerificationProvider>>,
    mutator: Arc<ProgressMutator>,
    diagnostics: Arc<dyn DiagnosticsPort>,
}

impl VerificationCoordinator {
    pub fn new(
        providers: Vec<Arc<dyn VerificationProvider>>,
        mutator: Arc<ProgressMutator>,
        diagnostics: Arc<dyn DiagnosticsPort>,
    ) -> Self {
        Self {
            providers,
            mutator,
            diagnostics,
        }
    }

    pub fn verify(
        &self,
        player: PlayerId,
        pending: &PendingTask,
        change: &ChangeRecord,
    ) -> Verdict {
        let mut deferred = Vec::new();

        for provider in &self.providers {
            match provider.evaluate(player, pending, change, self.diagnostics.as_ref()) {
                Evaluation::Skip => {}
                Evaluation::Immediate(true) => {}
                Evaluation::Immediate(false) => return Verdict::Reject,
                Evaluation::Deferred(future) => deferred.push((provider.name(), future)),
            }
        }

        if deferred.is_empty() {
            return Verdict::Accept;
        }

        // The accept decision now belongs to a later turn. The spawned task
        // owns everything it needs; nothing from this call may be assumed
        // valid by the time it runs.
        let mutator = Arc::clone(&self.mutator);
        let diagnostics = Arc::clone(&self.diagnostics);
        let pending = pending.clone();
        tokio::spawn(async move {
            let task = Arc::clone(&pending.task);
            for (name, future) in deferred {
                match future.await {
                    Ok(true) => {
                        diagnostics.debug(
                            &format!("{name} lookup OK"),
                            &task.quest_id,
                            &task.task_id,
                            player,
                        );
                    }
                    Ok(false) => {
                        diagnostics.debug(
                            &format!("{name} lookup indicates this is a player placed block, continuing..."),
                            &task.quest_id,
                            &task.task_id,
                            player,
                        );
                        return;
                    }
                    Err(failure) => {
                        diagnostics.debug(
                            &format!("{name} lookup failed: {failure}"),
                            &task.quest_id,
                            &task.task_id,
                            player,
                        );
                        tracing::warn!(
                            provider = name,
                            quest_id = %task.quest_id,
                            task_id = %task.task_id,
                            player_id = %player,
                            error = %failure,
                            "verification lookup failed; change not counted"
                        );
                        return;
                    }
                }
            }

            if let Err(e) = mutator.apply(player, &pending).await {
                tracing::error!(
                    quest_id = %task.quest_id,
                    task_id = %task.task_id,
                    player_id = %player,
                    error = %e,
                    "progress update from verification callback failed"
                );
            }
        });

        Verdict::Deferred
    }
}
