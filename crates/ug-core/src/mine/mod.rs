//! Underground mine grid
//!
//! A [`Mine`] owns a row-major grid of [`Tile`]s. Items from a
//! [`MineConfig`](crate::config::MineConfig) are buried across several tiles
//! each, then dug out and collected through the operations in `dig`.
//!
//! The three item counters are always derived from the grid itself, never
//! carried forward incrementally, so a loaded mine reports the same numbers
//! as the one that was saved.

mod dig;
mod generation;
mod reward;
pub mod save;
mod tile;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::MineType;
use crate::rng::RandomProvider;

pub use dig::FoundItem;
pub use generation::{MAXIMUM_PLACEMENT_ATTEMPTS, background_positions};
pub use reward::Reward;
pub use save::MineSave;
pub use tile::{SURVEY_UNSET, Tile};

/// Minimum tile depth when the properties leave it unset
pub const DEFAULT_MINIMUM_DEPTH: u32 = 3;

/// Extra random depth when the properties leave it unset
pub const DEFAULT_MAXIMUM_EXTRA_LAYERS: u32 = 2;

/// Grid position; x is the column, y the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Resolved depth settings for grid generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRange {
    pub minimum: u32,
    pub extra_layers: u32,
}

impl DepthRange {
    /// Deepest a freshly generated tile can be
    pub fn maximum(&self) -> u32 {
        self.minimum.saturating_add(self.extra_layers)
    }
}

/// Construction parameters, persisted verbatim with the mine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineProperties {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_extra_layers: Option<u32>,
    pub minimum_items_to_generate: u32,
    pub extra_items_to_generate: u32,
    pub time_to_discover: f64,
    /// Mine type of the catalog the mine was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<MineType>,
}

impl MineProperties {
    /// Properties for a `width`×`height` mine burying exactly one item
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            minimum_depth: None,
            maximum_extra_layers: None,
            minimum_items_to_generate: 1,
            extra_items_to_generate: 0,
            time_to_discover: 0.0,
            config: None,
        }
    }

    pub fn with_depth(mut self, minimum_depth: u32, maximum_extra_layers: u32) -> Self {
        self.minimum_depth = Some(minimum_depth);
        self.maximum_extra_layers = Some(maximum_extra_layers);
        self
    }

    pub fn with_items(mut self, minimum: u32, extra: u32) -> Self {
        self.minimum_items_to_generate = minimum;
        self.extra_items_to_generate = extra;
        self
    }

    pub fn with_time_to_discover(mut self, time: f64) -> Self {
        self.time_to_discover = time;
        self
    }

    /// Depth settings with defaults applied for unset fields
    pub fn depth_range(&self) -> DepthRange {
        DepthRange {
            minimum: self.minimum_depth.unwrap_or(DEFAULT_MINIMUM_DEPTH),
            extra_layers: self
                .maximum_extra_layers
                .unwrap_or(DEFAULT_MAXIMUM_EXTRA_LAYERS),
        }
    }

    /// Number of tiles in a generated grid
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Lifecycle of a mine as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum MineState {
    /// Host has no mine
    None,
    /// Constructed but not generated
    Loading,
    /// Waiting for `time_until_discovery` to run out
    Undiscovered,
    Active,
    Completed,
    /// Left by the player before completion; only ever set by the host
    Abandoned,
}

/// One underground mining session
#[derive(Debug, Clone, PartialEq)]
pub struct Mine {
    properties: MineProperties,
    grid: Vec<Tile>,
    time_until_discovery: f64,
    completed: bool,
    items_buried: u32,
    items_found: u32,
    items_partially_found: u32,
}

impl Mine {
    /// Create an ungenerated mine; call [`Mine::generate`] to fill the grid
    pub fn new(properties: MineProperties) -> Self {
        let time_until_discovery = properties.time_to_discover;
        Self {
            properties,
            grid: Vec::new(),
            time_until_discovery,
            completed: false,
            items_buried: 0,
            items_found: 0,
            items_partially_found: 0,
        }
    }

    pub fn properties(&self) -> &MineProperties {
        &self.properties
    }

    pub fn grid(&self) -> &[Tile] {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.properties.width
    }

    pub fn height(&self) -> u32 {
        self.properties.height
    }

    pub fn mine_type(&self) -> Option<MineType> {
        self.properties.config
    }

    pub fn initial_time_to_discover(&self) -> f64 {
        self.properties.time_to_discover
    }

    pub fn time_until_discovery(&self) -> f64 {
        self.time_until_discovery
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Distinct rewards buried in the grid
    pub fn items_buried(&self) -> u32 {
        self.items_buried
    }

    /// Rewards whose every tile has been collected
    pub fn items_found(&self) -> u32 {
        self.items_found
    }

    /// Rewards whose every tile is exposed, collected or not
    pub fn items_partially_found(&self) -> u32 {
        self.items_partially_found
    }

    /// Current lifecycle state. Never returns `None` or `Abandoned`.
    pub fn state(&self) -> MineState {
        if self.grid.is_empty() {
            MineState::Loading
        } else if self.completed {
            MineState::Completed
        } else if self.time_until_discovery > 0.0 {
            MineState::Undiscovered
        } else {
            MineState::Active
        }
    }

    /// Advance the discovery timer. Stops once the layer is completed.
    pub fn tick(&mut self, delta_time: f64) {
        if !self.completed {
            self.time_until_discovery -= delta_time;
        }
    }

    /// Uniform position inside the grid bounds
    pub fn random_coordinate<R: RandomProvider>(&self, rng: &mut R) -> Coordinate {
        Coordinate {
            x: rng.floor(self.properties.width) as i32,
            y: rng.floor(self.properties.height) as i32,
        }
    }

    pub fn grid_index_for_coordinate(&self, coordinate: Coordinate) -> Option<usize> {
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;
        let width = self.properties.width as usize;
        if x >= width || y >= self.properties.height as usize {
            return None;
        }
        Some(y * width + x)
    }

    /// Inverse of [`Mine::grid_index_for_coordinate`]; `None` past the grid
    pub fn coordinate_for_grid_index(&self, index: usize) -> Option<Coordinate> {
        if index >= self.grid.len() {
            return None;
        }
        let width = self.properties.width as usize;
        Some(Coordinate::new((index % width) as i32, (index / width) as i32))
    }

    pub fn tile(&self, coordinate: Coordinate) -> Option<&Tile> {
        self.grid_index_for_coordinate(coordinate)
            .and_then(|index| self.grid.get(index))
    }

    fn tile_mut(&mut self, coordinate: Coordinate) -> Option<&mut Tile> {
        self.grid_index_for_coordinate(coordinate)
            .and_then(|index| self.grid.get_mut(index))
    }

    /// Coordinates of every tile belonging to one reward
    pub fn reward_tiles(&self, reward_id: u32) -> Vec<Coordinate> {
        self.reward_indices(reward_id)
            .into_iter()
            .filter_map(|index| self.coordinate_for_grid_index(index))
            .collect()
    }

    fn reward_indices(&self, reward_id: u32) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.reward().is_some_and(|r| r.reward_id() == reward_id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Count reward groups in which every tile satisfies `predicate`
    fn count_reward_groups(&self, predicate: impl Fn(&Tile) -> bool) -> u32 {
        let mut groups: HashMap<u32, bool> = HashMap::new();
        for tile in &self.grid {
            if let Some(reward) = tile.reward() {
                let all = groups.entry(reward.reward_id()).or_insert(true);
                *all &= predicate(tile);
            }
        }
        groups.values().filter(|&&all| all).count() as u32
    }

    fn refresh_items_partially_found(&mut self) {
        self.items_partially_found = self.count_reward_groups(Tile::is_exposed);
    }

    fn refresh_items_found(&mut self) {
        self.items_found = self.count_reward_groups(Tile::is_rewarded);
    }

    fn refresh_counters(&mut self) {
        self.items_buried = self.count_reward_groups(|_| true);
        self.refresh_items_found();
        self.refresh_items_partially_found();
    }
}
