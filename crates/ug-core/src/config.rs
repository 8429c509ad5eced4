//! Mine type metadata and item catalogs
//!
//! Generation only ever sees the [`MineConfig`] trait. [`StaticMineConfig`]
//! is a plain data catalog that hosts can deserialize from JSON.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Kind of mine, which selects the item pool upstream.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum MineType {
    #[default]
    Random,
    Diamond,
    Gem,
    Shard,
    Fossil,
    Plate,
    Special,
}

/// One buryable item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Footprint mask, row-major; any non-zero cell is occupied
    pub space: Vec<Vec<u8>>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl ItemDefinition {
    pub fn new(id: u32, name: impl Into<String>, space: Vec<Vec<u8>>, weight: f64) -> Self {
        Self {
            id,
            name: name.into(),
            space,
            weight,
        }
    }

    /// Relative likelihood of being picked for burial
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of tiles the footprint covers
    pub fn cell_count(&self) -> usize {
        self.space.iter().flatten().filter(|&&cell| cell != 0).count()
    }
}

/// Item source consumed by mine generation.
pub trait MineConfig {
    fn mine_type(&self) -> MineType;

    /// Overrides the randomized item count when set
    fn fixed_item_count(&self) -> Option<u32> {
        None
    }

    fn available_items(&self) -> &[ItemDefinition];

    fn item_by_id(&self, id: u32) -> Option<&ItemDefinition> {
        self.available_items().iter().find(|item| item.id == id)
    }
}

/// Catalog validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("item {id} has an empty footprint")]
    EmptyFootprint { id: u32 },

    #[error("item {id} footprint row {row} has {found} cells, expected {expected}")]
    RaggedFootprint {
        id: u32,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("item {id} has invalid weight {weight}")]
    InvalidWeight { id: u32, weight: f64 },

    #[error("duplicate item id {id}")]
    DuplicateId { id: u32 },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Data-only catalog for one mine type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMineConfig {
    #[serde(rename = "type", default)]
    pub mine_type: MineType,
    #[serde(default)]
    pub fixed_item_count: Option<u32>,
    pub items: Vec<ItemDefinition>,
}

impl StaticMineConfig {
    pub fn new(mine_type: MineType, items: Vec<ItemDefinition>) -> Self {
        Self {
            mine_type,
            fixed_item_count: None,
            items,
        }
    }

    pub fn with_fixed_item_count(mut self, count: u32) -> Self {
        self.fixed_item_count = Some(count);
        self
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject footprints that rotation and placement cannot handle
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = hashbrown::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(ConfigError::DuplicateId { id: item.id });
            }
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    id: item.id,
                    weight: item.weight,
                });
            }
            let expected = item.space.first().map_or(0, Vec::len);
            if expected == 0 || item.cell_count() == 0 {
                return Err(ConfigError::EmptyFootprint { id: item.id });
            }
            if let Some((row, cells)) = item
                .space
                .iter()
                .enumerate()
                .find(|(_, cells)| cells.len() != expected)
            {
                return Err(ConfigError::RaggedFootprint {
                    id: item.id,
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }
}

impl MineConfig for StaticMineConfig {
    fn mine_type(&self) -> MineType {
        self.mine_type
    }

    fn fixed_item_count(&self) -> Option<u32> {
        self.fixed_item_count
    }

    fn available_items(&self) -> &[ItemDefinition] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let json = r#"{
            "type": "Fossil",
            "items": [
                {"id": 1, "name": "Helix Fossil", "space": [[1, 1], [1, 1]], "weight": 2.5},
                {"id": 2, "space": [[1]]}
            ]
        }"#;
        let config = StaticMineConfig::from_json(json).unwrap();
        assert_eq!(config.mine_type(), MineType::Fossil);
        assert_eq!(config.fixed_item_count(), None);
        assert_eq!(config.available_items().len(), 2);
        assert_eq!(config.item_by_id(1).unwrap().cell_count(), 4);
        assert_eq!(config.item_by_id(2).unwrap().weight(), 1.0);
        assert!(config.item_by_id(3).is_none());
    }

    #[test]
    fn test_reject_ragged_footprint() {
        let config = StaticMineConfig::new(
            MineType::Gem,
            vec![ItemDefinition::new(4, "Bad", vec![vec![1, 1], vec![1]], 1.0)],
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RaggedFootprint {
                id: 4,
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_reject_empty_and_duplicate() {
        let empty = StaticMineConfig::new(
            MineType::Gem,
            vec![ItemDefinition::new(1, "Air", vec![vec![0, 0]], 1.0)],
        );
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyFootprint { id: 1 })));

        let duplicate = StaticMineConfig::new(
            MineType::Gem,
            vec![
                ItemDefinition::new(1, "A", vec![vec![1]], 1.0),
                ItemDefinition::new(1, "B", vec![vec![1]], 1.0),
            ],
        );
        assert!(matches!(duplicate.validate(), Err(ConfigError::DuplicateId { id: 1 })));
    }

    #[test]
    fn test_reject_negative_weight() {
        let config = StaticMineConfig::new(
            MineType::Shard,
            vec![ItemDefinition::new(9, "Shard", vec![vec![1]], -1.0)],
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { id: 9, .. })
        ));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let err = StaticMineConfig::from_json(r#"{"type": "Gem", "items": [{"id": 1}]}"#)
            .unwrap_err();
        let ConfigError::Parse(source) = &err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert!(source.is_data());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_mine_type_parses_case_insensitive() {
        assert_eq!("diamond".parse::<MineType>().unwrap(), MineType::Diamond);
        assert_eq!(MineType::Plate.to_string(), "Plate");
    }
}
