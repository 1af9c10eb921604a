//! Maturity gate for non-stacking changes.

use std::sync::Arc;

use questline_domain::ChangeRecord;

use crate::infrastructure::ports::GrowthCapabilityPort;

/// Decides whether a change is allowed to count at all.
///
/// Operates on the snapshot captured in the triggering event, never on a
/// fresh world read: by the time this filter runs, the block on the ground
/// is already in its post-harvest state and a live query would produce the
/// wrong answer.
pub struct MaturityFilter {
    capability: Arc<dyn GrowthCapabilityPort>,
}

impl MaturityFilter {
    pub fn new(capability: Arc<dyn GrowthCapabilityPort>) -> Self {
        Self { capability }
    }

    pub fn passes(&self, change: &ChangeRecord) -> bool {
        if !change.requires_maturity_check {
            return true;
        }
        change.block.is_fully_grown() || self.capability.is_special_mature_variant(&change.block)
    }
}
