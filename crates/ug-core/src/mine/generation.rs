//! Mine generation
//!
//! Fills the depth grid, then buries weighted-random catalog items at random
//! rotations and positions. Each item gets a bounded number of placement
//! attempts; an item that never fits is dropped and the mine simply holds
//! fewer rewards.

use tracing::debug;

use super::{Coordinate, Mine, Reward, Tile};
use crate::config::{ItemDefinition, MineConfig};
use crate::rng::RandomProvider;
use crate::shape::{dimensions, rotate_90_clockwise};

/// Placement tries per item before it is skipped
pub const MAXIMUM_PLACEMENT_ATTEMPTS: u32 = 1000;

impl Mine {
    /// Build the depth grid and bury items from `config`
    pub fn generate<R: RandomProvider>(&mut self, config: &dyn MineConfig, rng: &mut R) {
        self.properties.config = Some(config.mine_type());
        self.generate_grid(rng);
        self.generate_underground_items(config, rng);
    }

    fn generate_grid<R: RandomProvider>(&mut self, rng: &mut R) {
        let depth = self.properties.depth_range();
        self.grid = (0..self.properties.cell_count())
            .map(|_| {
                Tile::new(depth.minimum.saturating_add(rng.int_between(0, depth.extra_layers)))
            })
            .collect();
    }

    fn generate_underground_items<R: RandomProvider>(
        &mut self,
        config: &dyn MineConfig,
        rng: &mut R,
    ) {
        if self.grid.is_empty() {
            self.generate_grid(rng);
        }

        // Every item covers at least one tile
        let max_items = u32::try_from(self.grid.len()).unwrap_or(u32::MAX);
        let item_count = config
            .fixed_item_count()
            .unwrap_or_else(|| {
                self.properties
                    .minimum_items_to_generate
                    .saturating_add(rng.int_between(0, self.properties.extra_items_to_generate))
            })
            .min(max_items);
        let items = config.available_items();
        let weights: Vec<f64> = items.iter().map(ItemDefinition::weight).collect();

        let mut skipped = 0u32;
        for reward_index in 0..item_count {
            let Some(item) = rng.from_weighted(items, &weights) else {
                debug!(mine_type = ?config.mine_type(), "no items available to bury");
                break;
            };

            if !self.place_item(item, reward_index, rng) {
                skipped += 1;
                debug!(
                    reward_index,
                    item_id = item.id,
                    attempts = MAXIMUM_PLACEMENT_ATTEMPTS,
                    "item did not fit, skipping"
                );
            }
        }

        self.refresh_counters();
        debug!(
            width = self.properties.width,
            height = self.properties.height,
            requested = item_count,
            buried = self.items_buried,
            skipped,
            "mine generated"
        );
    }

    /// Try random rotations and origins until the item fits
    fn place_item<R: RandomProvider>(
        &mut self,
        item: &ItemDefinition,
        reward_index: u32,
        rng: &mut R,
    ) -> bool {
        if self.grid.is_empty() {
            return false;
        }

        for _ in 0..MAXIMUM_PLACEMENT_ATTEMPTS {
            let rotations = rng.floor(4);
            let local_space = rotate_90_clockwise(&item.space, rotations);
            let origin = self.random_coordinate(rng);

            if self.attempt_place_reward(item, reward_index, origin, &local_space, rotations) {
                return true;
            }
        }
        false
    }

    /// Whether `local_space` placed at `origin` stays in bounds and only
    /// covers tiles without a reward.
    pub fn can_place_reward(&self, origin: Coordinate, local_space: &[Vec<u8>]) -> bool {
        let (reward_width, reward_height) = dimensions(local_space);
        if reward_width == 0 || reward_height == 0 || origin.x < 0 || origin.y < 0 {
            return false;
        }
        if origin.x as usize + reward_width > self.properties.width as usize
            || origin.y as usize + reward_height > self.properties.height as usize
        {
            return false;
        }

        occupied_cells(local_space).all(|(local_x, local_y)| {
            self.tile(offset(origin, local_x, local_y))
                .is_some_and(|tile| tile.reward().is_none())
        })
    }

    fn attempt_place_reward(
        &mut self,
        item: &ItemDefinition,
        reward_index: u32,
        origin: Coordinate,
        local_space: &[Vec<u8>],
        rotations: u32,
    ) -> bool {
        if !self.can_place_reward(origin, local_space) {
            return false;
        }

        let anchors = rotate_90_clockwise(&background_positions(&item.space), rotations);
        let cells: Vec<(usize, usize)> = occupied_cells(local_space).collect();
        for (local_x, local_y) in cells {
            let reward = Reward::new(
                reward_index,
                item.id,
                Coordinate::new(local_x as i32, local_y as i32),
                anchors[local_y][local_x].clone(),
                rotations,
            );
            if let Some(tile) = self.tile_mut(offset(origin, local_x, local_y)) {
                tile.set_reward(reward);
            }
        }
        true
    }
}

/// Sprite anchors for an unrotated footprint, as `"x% y%"` strings.
///
/// Columns run from 0% to 100% left to right and rows top to bottom. A
/// single row or column sits at 0%.
pub fn background_positions<T>(space: &[Vec<T>]) -> Vec<Vec<String>> {
    let (width, height) = dimensions(space);
    let x_denominator = width.saturating_sub(1).max(1) as f64;
    let y_denominator = height.saturating_sub(1).max(1) as f64;

    (0..height)
        .map(|i| {
            (0..width)
                .map(|j| {
                    let x = 100.0 * j as f64 / x_denominator;
                    let y = 100.0 * i as f64 / y_denominator;
                    format!("{x:.2}% {y:.2}%")
                })
                .collect()
        })
        .collect()
}

/// (x, y) offsets of every non-zero mask cell
fn occupied_cells(local_space: &[Vec<u8>]) -> impl Iterator<Item = (usize, usize)> + '_ {
    local_space.iter().enumerate().flat_map(|(y, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(move |(x, _)| (x, y))
    })
}

fn offset(origin: Coordinate, local_x: usize, local_y: usize) -> Coordinate {
    Coordinate::new(origin.x + local_x as i32, origin.y + local_y as i32)
}
