//! Block value objects: kinds, positions, and captured block state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The material category of a block (e.g. "wheat", "cactus").
///
/// Kind names are normalized to lowercase so that authored quest files and
/// world snapshots compare consistently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockKind(String);

/// Kinds that grow as a contiguous vertical run and are harvested
/// segment-by-segment rather than by growth stage.
const STACKING_KINDS: &[&str] = &["bamboo", "cactus", "kelp", "sugar_cane"];

impl BlockKind {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this kind belongs to the stacking family. Stacking kinds have
    /// no meaningful growth stage; every segment of the run counts.
    pub fn is_stacking(&self) -> bool {
        STACKING_KINDS.contains(&self.0.as_str())
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlockKind {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A block position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position directly above this one (the growth direction for
    /// stacking kinds).
    pub fn above(&self) -> Self {
        Self {
            x: self.x,
            y: self.y + 1,
            z: self.z,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Growth state of an ageable block: current stage out of a kind-specific
/// maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Growth {
    pub stage: u8,
    pub max_stage: u8,
}

impl Growth {
    pub fn new(stage: u8, max_stage: u8) -> Self {
        Self { stage, max_stage }
    }

    pub fn is_mature(&self) -> bool {
        self.stage >= self.max_stage
    }
}

/// The state of one block captured at the moment the triggering event fired.
///
/// Eligibility checks must read this snapshot, never the live world: by the
/// time the pipeline runs, the block on the ground already reflects the
/// post-harvest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub kind: BlockKind,
    /// Growth state, for ageable kinds. Stacking kinds carry `None`.
    pub growth: Option<Growth>,
    /// Raw metadata/variant value, matched against a task's `data` filter.
    pub data: Option<i32>,
}

impl BlockSnapshot {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            growth: None,
            data: None,
        }
    }

    pub fn with_growth(mut self, stage: u8, max_stage: u8) -> Self {
        self.growth = Some(Growth::new(stage, max_stage));
        self
    }

    pub fn with_data(mut self, data: i32) -> Self {
        self.data = Some(data);
        self
    }

    /// Whether the snapshot is at its maximum growth stage. Blocks without
    /// growth state are never considered mature by this check; the special
    /// mature variants are recognized by a capability lookup instead.
    pub fn is_fully_grown(&self) -> bool {
        self.growth.map(|g| g.is_mature()).unwrap_or(false)
    }
}

/// How the block left the world: broken outright or harvested in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarvestMethod {
    Break,
    Harvest,
}

impl HarvestMethod {
    /// Parse an authored `mode` option value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "break" => Some(Self::Break),
            "harvest" => Some(Self::Harvest),
            _ => None,
        }
    }
}

impl fmt::Display for HarvestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Break => write!(f, "break"),
            Self::Harvest => write!(f, "harvest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_normalize_to_lowercase() {
        assert_eq!(BlockKind::new("WHEAT"), BlockKind::new("wheat"));
        assert_eq!(BlockKind::new("Sugar_Cane").as_str(), "sugar_cane");
    }

    #[test]
    fn stacking_family_membership() {
        for kind in ["bamboo", "cactus", "kelp", "sugar_cane"] {
            assert!(BlockKind::new(kind).is_stacking(), "{kind} should stack");
        }
        assert!(!BlockKind::new("wheat").is_stacking());
        assert!(!BlockKind::new("carrots").is_stacking());
    }

    #[test]
    fn above_moves_up_one() {
        assert_eq!(BlockPos::new(1, 64, -3).above(), BlockPos::new(1, 65, -3));
    }

    #[test]
    fn growth_maturity() {
        assert!(Growth::new(7, 7).is_mature());
        assert!(!Growth::new(6, 7).is_mature());
    }

    #[test]
    fn snapshot_without_growth_is_not_fully_grown() {
        assert!(!BlockSnapshot::new(BlockKind::new("cactus")).is_fully_grown());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(HarvestMethod::parse("Break"), Some(HarvestMethod::Break));
        assert_eq!(
            HarvestMethod::parse("harvest"),
            Some(HarvestMethod::Harvest)
        );
        assert_eq!(HarvestMethod::parse("plant"), None);
    }
}
