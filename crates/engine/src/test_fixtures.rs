//! Shared fixtures for unit and scenario tests: an in-memory world, a
//! gate-controlled activity log, and recording notification/diagnostics
//! sinks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;

use questline_domain::{
    BlockPos, BlockSnapshot, ConfigValue, FarmingTaskConfig, PlayerId, Quest, QuestId, Task,
    TaskId, FARMING_TASK_TYPE,
};

use crate::infrastructure::ports::{
    ActivityLogError, ActivityLogPort, AdvancementPort, DiagnosticsPort, FarmingTaskRef,
    GrowthCapabilityPort, SessionPort, WorldQueryPort,
};
use crate::use_cases::farming::PendingTask;

// =============================================================================
// Task / quest builders
// =============================================================================

/// Builder for a farming task definition used across tests.
#[derive(Clone)]
pub struct FixtureTask {
    pub id: &'static str,
    pub amount: i64,
    pub blocks: Option<Vec<&'static str>>,
    pub data: Option<i64>,
    pub mode: Option<&'static str>,
    pub check_block_tracker: bool,
    pub check_activity_log: bool,
    pub lookback_secs: Option<i64>,
}

impl Default for FixtureTask {
    fn default() -> Self {
        Self {
            id: "harvest-crops",
            amount: 10,
            blocks: None,
            data: None,
            mode: None,
            check_block_tracker: false,
            check_activity_log: false,
            lookback_secs: None,
        }
    }
}

impl FixtureTask {
    pub fn id(mut self, id: &'static str) -> Self {
        self.id = id;
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn blocks(mut self, blocks: Vec<&'static str>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn data(mut self, data: i64) -> Self {
        self.data = Some(data);
        self
    }

    pub fn mode(mut self, mode: &'static str) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn check_block_tracker(mut self) -> Self {
        self.check_block_tracker = true;
        self
    }

    pub fn check_activity_log(mut self) -> Self {
        self.check_activity_log = true;
        self
    }

    pub fn build(&self) -> Task {
        let mut options = HashMap::new();
        options.insert("amount".to_string(), ConfigValue::Int(self.amount));
        if let Some(blocks) = &self.blocks {
            options.insert("blocks".to_string(), ConfigValue::from(blocks.clone()));
        }
        if let Some(data) = self.data {
            options.insert("data".to_string(), ConfigValue::Int(data));
        }
        if let Some(mode) = self.mode {
            options.insert("mode".to_string(), ConfigValue::from(mode));
        }
        if self.check_block_tracker {
            options.insert(
                "check-playerblocktracker".to_string(),
                ConfigValue::Bool(true),
            );
        }
        if self.check_activity_log {
            options.insert("check-coreprotect".to_string(), ConfigValue::Bool(true));
        }
        if let Some(secs) = self.lookback_secs {
            options.insert("check-coreprotect-time".to_string(), ConfigValue::Int(secs));
        }
        Task::new(self.id, FARMING_TASK_TYPE, options)
    }
}

/// A single-task quest from a fixture task.
pub fn fixture_quest(quest_id: &str, task: FixtureTask) -> Quest {
    Quest::new(quest_id, vec![task.build()])
}

/// A `PendingTask` as the matcher would emit it, for exercising the
/// verification and mutation stages directly.
pub fn pending_task(task: FixtureTask) -> PendingTask {
    let built = task.build();
    let config = FarmingTaskConfig::parse(&built).expect("fixture config must parse");
    PendingTask {
        task: Arc::new(FarmingTaskRef {
            quest_id: QuestId::new("fixture-quest"),
            task_id: built.id().clone(),
            config,
        }),
    }
}

// =============================================================================
// World / session / growth fixtures
// =============================================================================

/// Mutable in-memory world for driving the change-set walk.
#[derive(Default)]
pub struct InMemoryWorld {
    blocks: Mutex<HashMap<BlockPos, BlockSnapshot>>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pos: BlockPos, block: BlockSnapshot) {
        self.blocks
            .lock()
            .expect("world lock poisoned")
            .insert(pos, block);
    }

    pub fn clear(&self, pos: BlockPos) {
        self.blocks.lock().expect("world lock poisoned").remove(&pos);
    }
}

impl WorldQueryPort for InMemoryWorld {
    fn block_at(&self, pos: BlockPos) -> Option<BlockSnapshot> {
        self.blocks
            .lock()
            .expect("world lock poisoned")
            .get(&pos)
            .cloned()
    }
}

/// Session registry that knows every player.
pub struct AlwaysConnected;

impl SessionPort for AlwaysConnected {
    fn is_connected(&self, _player: PlayerId) -> bool {
        true
    }
}

/// Growth capability lookup with no special mature variants.
pub struct NoSpecialGrowth;

impl GrowthCapabilityPort for NoSpecialGrowth {
    fn is_special_mature_variant(&self, _block: &BlockSnapshot) -> bool {
        false
    }
}

// =============================================================================
// Recording sinks
// =============================================================================

/// One delivered advancement notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advancement {
    pub player: PlayerId,
    pub quest: QuestId,
    pub task: TaskId,
    pub amount: u32,
    pub target: u32,
}

/// Advancement sink that forwards every notification to a channel so tests
/// can await deliveries from verification callbacks.
pub struct RecordingAdvancement {
    tx: UnboundedSender<Advancement>,
}

impl RecordingAdvancement {
    pub fn new() -> (Arc<Self>, UnboundedReceiver<Advancement>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl AdvancementPort for RecordingAdvancement {
    fn progress_made(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
        amount: u32,
        target: u32,
    ) {
        // Receiver may be gone if the test only cares about side effects.
        let _ = self.tx.send(Advancement {
            player,
            quest: quest.clone(),
            task: task.clone(),
            amount,
            target,
        });
    }
}

/// Diagnostics sink that remembers every message.
#[derive(Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .expect("diagnostics lock poisoned")
            .iter()
            .any(|m| m.contains(needle))
    }
}

impl DiagnosticsPort for RecordingDiagnostics {
    fn debug(&self, message: &str, _quest: &QuestId, _task: &TaskId, _player: PlayerId) {
        self.messages
            .lock()
            .expect("diagnostics lock poisoned")
            .push(message.to_string());
    }
}

// =============================================================================
// Gated activity log
// =============================================================================

/// Test handle releasing gated lookups.
pub struct GateRelease {
    gate: Arc<Semaphore>,
}

impl GateRelease {
    pub fn release(&self, lookups: usize) {
        self.gate.add_permits(lookups);
    }
}

/// Activity-log integration whose lookups block until the test releases
/// them, then all resolve to the same scripted answer. Lets tests observe
/// the window between the original event-handling call returning and the
/// verification callback firing.
pub struct GatedActivityLog {
    gate: Arc<Semaphore>,
    answer: Result<bool, ActivityLogError>,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl GatedActivityLog {
    pub fn new(answer: Result<bool, ActivityLogError>) -> (Arc<Self>, GateRelease) {
        let gate = Arc::new(Semaphore::new(0));
        let log = Arc::new(Self {
            gate: Arc::clone(&gate),
            answer,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        });
        (log, GateRelease { gate })
    }

    pub fn lookups_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Wait until `lookups` gated lookups have resolved, then yield so the
    /// verification callbacks that consume them run to completion.
    pub async fn wait_for_settled(&self, lookups: usize) {
        while self.finished.load(Ordering::SeqCst) < lookups {
            tokio::task::yield_now().await;
        }
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ActivityLogPort for GatedActivityLog {
    async fn was_placed_by_player(
        &self,
        _pos: BlockPos,
        _lookback_secs: u64,
    ) -> Result<bool, ActivityLogError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ActivityLogError::LookupFailed("gate closed".to_string()))?;
        permit.forget();
        self.finished.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}
