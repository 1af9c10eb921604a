//! Change-set derivation: one triggering event becomes one or more discrete
//! world changes.

use std::sync::Arc;

use questline_domain::{ChangeRecord, HarvestEvent};

use crate::infrastructure::ports::WorldQueryPort;

/// Expands a harvest event into the list of blocks it actually removed.
///
/// Stacking kinds (bamboo, cactus, and friends) break as a contiguous
/// vertical run: harvesting the bottom segment drops everything above it, so
/// each contiguous segment of the same kind counts as its own change. All
/// other kinds yield exactly one change, which must still pass the maturity
/// check downstream.
pub struct ChangeSetDeriver {
    world: Arc<dyn WorldQueryPort>,
}

impl ChangeSetDeriver {
    pub fn new(world: Arc<dyn WorldQueryPort>) -> Self {
        Self { world }
    }

    pub fn derive(&self, event: &HarvestEvent) -> Vec<ChangeRecord> {
        let kind = event.block.kind.clone();
        if !kind.is_stacking() {
            return vec![ChangeRecord::new(event.block.clone(), event.pos, true)];
        }

        // Growth stage is meaningless for stacking kinds; no record carries
        // the maturity flag. Walk upward until the run ends, never
        // revisiting a position.
        let mut records = vec![ChangeRecord::new(event.block.clone(), event.pos, false)];
        let mut pos = event.pos.above();
        while let Some(block) = self.world.block_at(pos) {
            if block.kind != kind {
                break;
            }
            records.push(ChangeRecord::new(block, pos, false));
            pos = pos.above();
        }
        records
    }
}
