//! Tracing-backed diagnostics adapter.

use questline_domain::{PlayerId, QuestId, TaskId};

use super::ports::DiagnosticsPort;

/// Writes per-task diagnostics as structured `tracing` debug events.
#[derive(Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsPort for TracingDiagnostics {
    fn debug(&self, message: &str, quest: &QuestId, task: &TaskId, player: PlayerId) {
        tracing::debug!(
            quest_id = %quest,
            task_id = %task,
            player_id = %player,
            "{message}"
        );
    }
}
