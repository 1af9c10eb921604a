//! Domain events consumed by the progress engine.
//!
//! `HarvestEvent` is the triggering event handed over by the event
//! subscription layer; `ChangeRecord` is the engine's internal description of
//! one discrete world change derived from it. Both carry captured block
//! state, not live world references, because the world has already mutated
//! by the time the pipeline runs.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value_objects::{BlockPos, BlockSnapshot, HarvestMethod};

/// The acting entity behind a triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub player_id: PlayerId,
    /// Automated actors are excluded from all processing.
    pub is_npc: bool,
}

impl Actor {
    pub fn player(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_npc: false,
        }
    }

    pub fn npc(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_npc: true,
        }
    }
}

/// One block-harvest event as delivered by the subscription layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestEvent {
    pub actor: Actor,
    /// State of the primary harvested block at the moment of the event.
    pub block: BlockSnapshot,
    pub pos: BlockPos,
    pub method: HarvestMethod,
}

/// One discrete world change derived from a triggering event. Ephemeral.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub block: BlockSnapshot,
    pub pos: BlockPos,
    /// Whether the eligibility filter must verify maturity before this
    /// change may count. Stacking kinds never require the check.
    pub requires_maturity_check: bool,
}

impl ChangeRecord {
    pub fn new(block: BlockSnapshot, pos: BlockPos, requires_maturity_check: bool) -> Self {
        Self {
            block,
            pos,
            requires_maturity_check,
        }
    }
}
