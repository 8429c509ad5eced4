//! Grid cells

use serde::{Deserialize, Serialize};

use super::Reward;

/// Survey value of a tile nobody has surveyed
pub const SURVEY_UNSET: i32 = -1;

fn survey_unset() -> i32 {
    SURVEY_UNSET
}

/// One cell of the mine grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    layer_depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reward: Option<Reward>,
    #[serde(default = "survey_unset")]
    survey: i32,
}

impl Tile {
    pub fn new(layer_depth: u32) -> Self {
        Self {
            layer_depth,
            reward: None,
            survey: SURVEY_UNSET,
        }
    }

    /// Layers left before the tile is exposed
    pub fn layer_depth(&self) -> u32 {
        self.layer_depth
    }

    pub fn is_exposed(&self) -> bool {
        self.layer_depth == 0
    }

    pub fn reward(&self) -> Option<&Reward> {
        self.reward.as_ref()
    }

    pub fn is_rewarded(&self) -> bool {
        self.reward.as_ref().is_some_and(Reward::is_rewarded)
    }

    /// Survey hint, `SURVEY_UNSET` if never surveyed
    pub fn survey(&self) -> i32 {
        self.survey
    }

    /// Remove up to `layers` layers, stopping at 0.
    ///
    /// Returns true if this call exposed the tile.
    pub(crate) fn dig(&mut self, layers: u32) -> bool {
        let was_exposed = self.is_exposed();
        self.layer_depth = self.layer_depth.saturating_sub(layers);
        !was_exposed && self.is_exposed()
    }

    pub(crate) fn set_reward(&mut self, reward: Reward) {
        self.reward = Some(reward);
    }

    pub(crate) fn set_survey(&mut self, range: i32) {
        self.survey = range;
    }

    pub(crate) fn mark_rewarded(&mut self) {
        if let Some(reward) = self.reward.as_mut() {
            reward.mark_rewarded();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dig_clamps_at_zero() {
        let mut tile = Tile::new(2);
        assert!(!tile.dig(1));
        assert_eq!(tile.layer_depth(), 1);
        assert!(tile.dig(5));
        assert_eq!(tile.layer_depth(), 0);
        assert!(!tile.dig(1), "already exposed");
        assert_eq!(tile.layer_depth(), 0);
    }

    #[test]
    fn test_new_tile_is_unsurveyed() {
        let tile = Tile::new(3);
        assert_eq!(tile.survey(), SURVEY_UNSET);
        assert!(tile.reward().is_none());
        assert!(!tile.is_rewarded());
    }

    #[test]
    fn test_tile_json_defaults() {
        let tile: Tile = serde_json::from_str(r#"{"layerDepth": 4}"#).unwrap();
        assert_eq!(tile, Tile::new(4));

        let json = serde_json::to_value(Tile::new(2)).unwrap();
        assert_eq!(json, serde_json::json!({"layerDepth": 2, "survey": -1}));
    }

    #[test]
    fn test_negative_depth_rejected() {
        assert!(serde_json::from_str::<Tile>(r#"{"layerDepth": -1, "survey": -1}"#).is_err());
    }
}
