//! Digging, surveying and collecting rewards

use tracing::{info, trace};

use super::{Coordinate, Mine};
use crate::error::HookError;
use crate::hooks::{Consumable, MineEvent, MineHooks};

/// A successfully collected reward.
///
/// Resolve `item_id` to its catalog definition with
/// [`MineConfig::item_by_id`](crate::config::MineConfig::item_by_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundItem {
    pub reward_id: u32,
    /// Catalog id of the collected item
    pub item_id: u32,
    pub amount: u32,
}

impl Mine {
    /// Store a survey hint on one tile. Out-of-bounds coordinates are ignored.
    pub fn survey(&mut self, coordinate: Coordinate, range: i32) {
        if let Some(tile) = self.tile_mut(coordinate) {
            tile.set_survey(range);
        }
    }

    /// Remove `layers` layers from a tile.
    ///
    /// Returns `Ok(false)` without side effects when the coordinate is out
    /// of bounds or the tile is already exposed.
    pub fn attempt_break_tile<H: MineHooks + ?Sized>(
        &mut self,
        coordinate: Coordinate,
        layers: u32,
        hooks: &mut H,
    ) -> Result<bool, HookError> {
        let Some(tile) = self.tile_mut(coordinate) else {
            return Ok(false);
        };
        if tile.is_exposed() {
            return Ok(false);
        }

        let exposed = tile.dig(layers);
        trace!(x = coordinate.x, y = coordinate.y, depth = tile.layer_depth(), "tile broken");
        if exposed {
            self.refresh_items_partially_found();
            hooks.on_event(&MineEvent::TileExposed { coordinate });
        }

        hooks.charge_energy()?;
        Ok(true)
    }

    /// Collect the reward under `coordinate`.
    ///
    /// Only succeeds once every tile of that reward is exposed, and only once
    /// per reward. The whole group is marked collected together.
    pub fn attempt_find_item<H: MineHooks + ?Sized>(
        &mut self,
        coordinate: Coordinate,
        hooks: &mut H,
    ) -> Result<Option<FoundItem>, HookError> {
        let Some(tile) = self.tile(coordinate) else {
            return Ok(None);
        };
        let Some(reward) = tile.reward() else {
            return Ok(None);
        };
        if !tile.is_exposed() || reward.is_rewarded() {
            return Ok(None);
        }

        let reward_id = reward.reward_id();
        let item_id = reward.item_id();
        let group = self.reward_indices(reward_id);
        if !group.iter().all(|&index| self.grid[index].is_exposed()) {
            return Ok(None);
        }

        for &index in &group {
            self.grid[index].mark_rewarded();
        }
        self.refresh_items_found();

        let amount = hooks.reward_amount()?;
        hooks.use_consumable(Consumable::TreasureScanner)?;
        hooks.record_items_found(amount)?;

        trace!(reward_id, item_id, amount, "item found");
        hooks.on_event(&MineEvent::ItemFound {
            reward_id,
            item_id,
            amount,
        });

        Ok(Some(FoundItem {
            reward_id,
            item_id,
            amount,
        }))
    }

    /// Mark the layer completed once every buried reward is collected.
    ///
    /// Returns true only for the call that performs the transition.
    pub fn attempt_complete_layer<H: MineHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
    ) -> Result<bool, HookError> {
        if self.completed || self.items_buried == 0 || self.items_found != self.items_buried {
            return Ok(false);
        }

        self.completed = true;
        hooks.record_layer_mined()?;
        hooks.use_consumable(Consumable::ExplosiveCharge)?;

        info!(items = self.items_buried, "mine layer completed");
        hooks.on_event(&MineEvent::LayerCompleted);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{NoopHooks, SessionStats};
    use crate::mine::{MineProperties, Reward, Tile};

    /// 3x1 mine: a two-tile reward on (0,0)-(1,0) and a bare tile at (2,0)
    fn strip_mine() -> Mine {
        let mut mine = Mine::new(MineProperties::new(3, 1));
        mine.grid = vec![Tile::new(2), Tile::new(1), Tile::new(3)];
        for x in 0..2 {
            mine.grid[x].set_reward(Reward::new(
                0,
                42,
                Coordinate::new(x as i32, 0),
                String::new(),
                0,
            ));
        }
        mine.refresh_counters();
        mine
    }

    struct FailingBattery;

    impl MineHooks for FailingBattery {
        fn charge_energy(&mut self) -> Result<(), HookError> {
            Err(HookError::new("charge_energy", "battery full"))
        }
        fn reward_amount(&mut self) -> Result<u32, HookError> {
            Ok(1)
        }
        fn record_items_found(&mut self, _amount: u32) -> Result<(), HookError> {
            Ok(())
        }
        fn record_layer_mined(&mut self) -> Result<(), HookError> {
            Ok(())
        }
        fn use_consumable(&mut self, _consumable: Consumable) -> Result<(), HookError> {
            Ok(())
        }
    }

    /// Grants nothing and refuses to record anything
    struct BrokenLedger;

    impl MineHooks for BrokenLedger {
        fn charge_energy(&mut self) -> Result<(), HookError> {
            Ok(())
        }
        fn reward_amount(&mut self) -> Result<u32, HookError> {
            Err(HookError::new("reward_amount", "no reward table"))
        }
        fn record_items_found(&mut self, _amount: u32) -> Result<(), HookError> {
            Ok(())
        }
        fn record_layer_mined(&mut self) -> Result<(), HookError> {
            Err(HookError::new("record_layer_mined", "statistics offline"))
        }
        fn use_consumable(&mut self, _consumable: Consumable) -> Result<(), HookError> {
            Ok(())
        }
    }

    fn exposed_strip_mine() -> Mine {
        let mut mine = strip_mine();
        mine.attempt_break_tile(Coordinate::new(0, 0), 2, &mut NoopHooks).unwrap();
        mine.attempt_break_tile(Coordinate::new(1, 0), 1, &mut NoopHooks).unwrap();
        mine
    }

    #[test]
    fn test_find_hook_error_keeps_reward_collected() {
        let mut mine = exposed_strip_mine();
        let err = mine
            .attempt_find_item(Coordinate::new(0, 0), &mut BrokenLedger)
            .unwrap_err();
        assert_eq!(err.hook, "reward_amount");
        assert!(mine.grid()[0].is_rewarded());
        assert!(mine.grid()[1].is_rewarded());
        assert_eq!(mine.items_found(), 1);
        // Already collected, so a retry finds nothing
        assert_eq!(mine.attempt_find_item(Coordinate::new(0, 0), &mut NoopHooks).unwrap(), None);
    }

    #[test]
    fn test_complete_hook_error_keeps_layer_completed() {
        let mut mine = exposed_strip_mine();
        mine.attempt_find_item(Coordinate::new(0, 0), &mut NoopHooks).unwrap();

        let err = mine.attempt_complete_layer(&mut BrokenLedger).unwrap_err();
        assert_eq!(err.hook, "record_layer_mined");
        assert!(mine.is_completed());
        assert!(!mine.attempt_complete_layer(&mut NoopHooks).unwrap());
    }

    #[test]
    fn test_survey_sets_hint_only() {
        let mut mine = strip_mine();
        mine.survey(Coordinate::new(2, 0), 4);
        assert_eq!(mine.tile(Coordinate::new(2, 0)).unwrap().survey(), 4);
        assert_eq!(mine.tile(Coordinate::new(2, 0)).unwrap().layer_depth(), 3);

        let before = mine.clone();
        mine.survey(Coordinate::new(9, 0), 4);
        assert_eq!(mine, before);
    }

    #[test]
    fn test_break_tile_charges_energy() {
        let mut mine = strip_mine();
        let mut stats = SessionStats::default();
        assert!(mine.attempt_break_tile(Coordinate::new(2, 0), 1, &mut stats).unwrap());
        assert_eq!(mine.tile(Coordinate::new(2, 0)).unwrap().layer_depth(), 2);
        assert_eq!(stats.energy_charges, 1);
    }

    #[test]
    fn test_break_exposed_tile_fails() {
        let mut mine = strip_mine();
        let mut stats = SessionStats::default();
        assert!(mine.attempt_break_tile(Coordinate::new(1, 0), 5, &mut stats).unwrap());
        assert!(!mine.attempt_break_tile(Coordinate::new(1, 0), 1, &mut stats).unwrap());
        assert_eq!(stats.energy_charges, 1);
        assert_eq!(
            stats.events,
            vec![MineEvent::TileExposed {
                coordinate: Coordinate::new(1, 0)
            }]
        );
    }

    #[test]
    fn test_break_hook_error_propagates() {
        let mut mine = strip_mine();
        let err = mine
            .attempt_break_tile(Coordinate::new(2, 0), 1, &mut FailingBattery)
            .unwrap_err();
        assert_eq!(err.hook, "charge_energy");
        // The dig itself already happened
        assert_eq!(mine.tile(Coordinate::new(2, 0)).unwrap().layer_depth(), 2);
    }

    #[test]
    fn test_find_requires_whole_group_exposed() {
        let mut mine = strip_mine();
        let mut hooks = NoopHooks;
        mine.attempt_break_tile(Coordinate::new(1, 0), 1, &mut hooks).unwrap();
        assert_eq!(mine.items_partially_found(), 0);
        assert_eq!(mine.attempt_find_item(Coordinate::new(1, 0), &mut hooks).unwrap(), None);

        mine.attempt_break_tile(Coordinate::new(0, 0), 2, &mut hooks).unwrap();
        assert_eq!(mine.items_partially_found(), 1);
        let found = mine.attempt_find_item(Coordinate::new(1, 0), &mut hooks).unwrap();
        assert_eq!(
            found,
            Some(FoundItem {
                reward_id: 0,
                item_id: 42,
                amount: 1
            })
        );
        assert!(mine.grid()[0].is_rewarded());
        assert!(mine.grid()[1].is_rewarded());
        assert_eq!(mine.items_found(), 1);
    }

    #[test]
    fn test_find_twice_fails() {
        let mut mine = strip_mine();
        let mut stats = SessionStats::new(3);
        mine.attempt_break_tile(Coordinate::new(0, 0), 2, &mut stats).unwrap();
        mine.attempt_break_tile(Coordinate::new(1, 0), 1, &mut stats).unwrap();

        assert!(mine.attempt_find_item(Coordinate::new(0, 0), &mut stats).unwrap().is_some());
        assert_eq!(mine.attempt_find_item(Coordinate::new(0, 0), &mut stats).unwrap(), None);
        assert_eq!(mine.attempt_find_item(Coordinate::new(1, 0), &mut stats).unwrap(), None);
        assert_eq!(stats.items_found, 3);
        assert_eq!(stats.treasure_scanner_uses, 1);
    }

    #[test]
    fn test_find_on_empty_or_missing_tile() {
        let mut mine = strip_mine();
        let mut hooks = NoopHooks;
        mine.attempt_break_tile(Coordinate::new(2, 0), 3, &mut hooks).unwrap();
        assert_eq!(mine.attempt_find_item(Coordinate::new(2, 0), &mut hooks).unwrap(), None);
        assert_eq!(mine.attempt_find_item(Coordinate::new(-1, 0), &mut hooks).unwrap(), None);
    }

    #[test]
    fn test_complete_layer_fires_once() {
        let mut mine = strip_mine();
        let mut stats = SessionStats::default();
        assert!(!mine.attempt_complete_layer(&mut stats).unwrap());

        mine.attempt_break_tile(Coordinate::new(0, 0), 2, &mut stats).unwrap();
        mine.attempt_break_tile(Coordinate::new(1, 0), 1, &mut stats).unwrap();
        mine.attempt_find_item(Coordinate::new(0, 0), &mut stats).unwrap();

        assert!(mine.attempt_complete_layer(&mut stats).unwrap());
        assert!(mine.is_completed());
        assert!(!mine.attempt_complete_layer(&mut stats).unwrap());
        assert_eq!(stats.layers_mined, 1);
        assert_eq!(stats.explosive_charge_uses, 1);
        assert_eq!(stats.events.last(), Some(&MineEvent::LayerCompleted));
    }

    #[test]
    fn test_complete_layer_needs_buried_items() {
        let mut mine = Mine::new(MineProperties::new(2, 2));
        mine.grid = vec![Tile::new(0); 4];
        mine.refresh_counters();
        assert!(!mine.attempt_complete_layer(&mut NoopHooks).unwrap());
        assert!(!mine.is_completed());
    }
}
