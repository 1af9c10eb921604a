// Port traits define the full contract - many methods are for future use
#![allow(dead_code)]

//! Port traits for every external seam of the progress engine.
//!
//! The engine core is pure orchestration; everything it needs from the
//! outside world (session registry, world state, anti-grief backends,
//! progress storage, notification delivery, diagnostics) comes in through
//! these traits. Verification integrations are wired as
//! `Option<Arc<dyn _>>` at composition time: `None` means the backing
//! integration is absent from the running environment, which the
//! coordinator treats as fail-closed.

mod error;

pub use error::{ActivityLogError, RepoError};

use std::sync::Arc;

use async_trait::async_trait;
use questline_domain::{
    BlockPos, BlockSnapshot, FarmingTaskConfig, IncrementOutcome, PlayerId, QuestId, TaskId,
    TaskProgress,
};

/// One farming task as resolved by the quest catalog: its owning quest, its
/// id, and its already-parsed configuration.
#[derive(Debug, Clone)]
pub struct FarmingTaskRef {
    pub quest_id: QuestId,
    pub task_id: TaskId,
    pub config: FarmingTaskConfig,
}

/// Supplies the session's active farming tasks. Quest definitions are
/// immutable for the duration of a session; configs are parsed at load time.
pub trait QuestCatalogPort: Send + Sync {
    fn farming_tasks(&self) -> Vec<Arc<FarmingTaskRef>>;
}

/// Black-box eligibility predicate of the authoring framework: whether the
/// player may currently make progress on the task (quest started, task
/// unlocked, not completed, and whatever else the framework enforces).
#[cfg_attr(test, mockall::automock)]
pub trait EligibilityPort: Send + Sync {
    fn is_eligible(&self, player: PlayerId, quest: &QuestId, task: &TaskId) -> bool;
}

/// Player/session registry boundary. Players are looked up per event and
/// never cached across events by the engine.
#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    fn is_connected(&self, player: PlayerId) -> bool;
}

/// Read access to current world state, used only by the change-set walk.
#[cfg_attr(test, mockall::automock)]
pub trait WorldQueryPort: Send + Sync {
    fn block_at(&self, pos: BlockPos) -> Option<BlockSnapshot>;
}

/// Version-dependent capability lookup for mature variants that do not
/// expose a growth stage (berry-bearing vine plants and the like).
#[cfg_attr(test, mockall::automock)]
pub trait GrowthCapabilityPort: Send + Sync {
    fn is_special_mature_variant(&self, block: &BlockSnapshot) -> bool;
}

/// Synchronous placement-tracker integration (verification Source A).
/// Answers whether the block at a position was placed by a player.
#[cfg_attr(test, mockall::automock)]
pub trait BlockTrackerPort: Send + Sync {
    fn is_player_placed(&self, pos: BlockPos) -> bool;
}

/// Asynchronous activity-log integration (verification Source B). The
/// lookup scans a lookback window and may fail; failures are the caller's
/// problem to log and treat as non-accept.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogPort: Send + Sync {
    async fn was_placed_by_player(
        &self,
        pos: BlockPos,
        lookback_secs: u64,
    ) -> Result<bool, ActivityLogError>;
}

/// Progress storage boundary. Records are created lazily on first increment;
/// `increment` must be atomic per (player, quest, task) key and must refuse
/// to advance a completed record, so that concurrently completing
/// verification callbacks can never lose or double an update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepo: Send + Sync {
    async fn get(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<Option<TaskProgress>, RepoError>;

    async fn increment(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<IncrementOutcome, RepoError>;

    async fn complete(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
    ) -> Result<(), RepoError>;
}

/// Delivery of visible progress notifications. Fire-and-forget; the engine
/// never waits on delivery.
#[cfg_attr(test, mockall::automock)]
pub trait AdvancementPort: Send + Sync {
    fn progress_made(
        &self,
        player: PlayerId,
        quest: &QuestId,
        task: &TaskId,
        amount: u32,
        target: u32,
    );
}

/// Advisory per-task diagnostics sink. Never affects control flow.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticsPort: Send + Sync {
    fn debug(&self, message: &str, quest: &QuestId, task: &TaskId, player: PlayerId);
}
