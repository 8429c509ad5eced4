//! Save and restore mine state
//!
//! The persisted shape is a plain structure with `properties`, `grid`,
//! `timeUntilDiscovery` and `completed` keys. Item counters are never
//! stored; they are rebuilt from the grid on load.

use serde::{Deserialize, Serialize};

use super::{Mine, MineProperties, Tile};
use crate::error::SaveError;

/// Structural snapshot of a [`Mine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineSave {
    pub properties: MineProperties,
    /// Tiles in row-major order; empty for an ungenerated mine
    #[serde(default)]
    pub grid: Vec<Tile>,
    /// Falls back to `properties.time_to_discover` when absent
    #[serde(default)]
    pub time_until_discovery: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

impl Mine {
    pub fn save(&self) -> MineSave {
        MineSave {
            properties: self.properties.clone(),
            grid: self.grid.clone(),
            time_until_discovery: Some(self.time_until_discovery),
            completed: self.completed,
        }
    }

    /// Rebuild a mine from a snapshot, recomputing every item counter
    pub fn load(save: MineSave) -> Result<Mine, SaveError> {
        let MineSave {
            properties,
            grid,
            time_until_discovery,
            completed,
        } = save;

        let expected = properties.cell_count();
        if !grid.is_empty() && grid.len() != expected {
            return Err(SaveError::GridSizeMismatch {
                width: properties.width,
                height: properties.height,
                expected,
                found: grid.len(),
            });
        }
        if let Some((index, rotations)) = grid.iter().enumerate().find_map(|(index, tile)| {
            tile.reward()
                .map(|reward| reward.rotations())
                .filter(|&rotations| rotations > 3)
                .map(|rotations| (index, rotations))
        }) {
            return Err(SaveError::InvalidRotation { index, rotations });
        }

        let mut mine = Mine::new(properties);
        mine.grid = grid;
        if let Some(time) = time_until_discovery {
            mine.time_until_discovery = time;
        }
        mine.completed = completed;
        mine.refresh_counters();
        Ok(mine)
    }
}

/// Serialize a mine to compact JSON
pub fn to_json(mine: &Mine) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&mine.save())?)
}

/// Serialize a mine to indented JSON
pub fn to_json_pretty(mine: &Mine) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&mine.save())?)
}

/// Parse and rebuild a mine from JSON
pub fn from_json(json: &str) -> Result<Mine, SaveError> {
    let save: MineSave = serde_json::from_str(json)?;
    Mine::load(save)
}
