//! Buried reward instances

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// One tile's share of a buried item.
///
/// Every tile covered by an item carries its own copy, all sharing the same
/// `reward_id`. Only `rewarded` changes after placement, and it is always
/// flipped for the whole group at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(rename = "id")]
    reward_id: u32,
    #[serde(rename = "undergroundItemID")]
    item_id: u32,
    local_coordinate: Coordinate,
    background_position: String,
    rotations: u32,
    rewarded: bool,
}

impl Reward {
    pub fn new(
        reward_id: u32,
        item_id: u32,
        local_coordinate: Coordinate,
        background_position: String,
        rotations: u32,
    ) -> Self {
        Self {
            reward_id,
            item_id,
            local_coordinate,
            background_position,
            rotations,
            rewarded: false,
        }
    }

    pub fn reward_id(&self) -> u32 {
        self.reward_id
    }

    /// Catalog id of the buried item
    pub fn item_id(&self) -> u32 {
        self.item_id
    }

    /// Offset of this tile inside the rotated footprint
    pub fn local_coordinate(&self) -> Coordinate {
        self.local_coordinate
    }

    /// CSS-style `"x% y%"` sprite anchor
    pub fn background_position(&self) -> &str {
        &self.background_position
    }

    /// Quarter turns clockwise, 0-3
    pub fn rotations(&self) -> u32 {
        self.rotations
    }

    pub fn is_rewarded(&self) -> bool {
        self.rewarded
    }

    pub(crate) fn mark_rewarded(&mut self) {
        self.rewarded = true;
    }
}
