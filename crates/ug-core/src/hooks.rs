//! Host collaborators invoked by dig, find and completion
//!
//! The mine never reaches for global game state. Everything outside the
//! grid (battery energy, statistics, consumable items, reward sizing and
//! UI notifications) goes through a [`MineHooks`] passed in per call.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::HookError;
use crate::mine::Coordinate;

/// Consumable items spent as a side effect of mining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Consumable {
    /// Used once per collected treasure
    TreasureScanner,
    /// Used once per cleared layer
    ExplosiveCharge,
}

/// State changes a UI may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MineEvent {
    /// A tile reached depth 0
    TileExposed { coordinate: Coordinate },
    /// A whole reward group was collected
    ItemFound {
        reward_id: u32,
        item_id: u32,
        amount: u32,
    },
    /// Every buried reward has been collected
    LayerCompleted,
}

/// Side-effect sinks the mine calls in-line.
///
/// Calls are never retried. An error aborts the operation and reaches the
/// caller; grid changes made before the failing call are kept.
pub trait MineHooks {
    /// Called after every successful tile break
    fn charge_energy(&mut self) -> Result<(), HookError>;

    /// Quantity granted for a collected treasure
    fn reward_amount(&mut self) -> Result<u32, HookError>;

    fn record_items_found(&mut self, amount: u32) -> Result<(), HookError>;

    fn record_layer_mined(&mut self) -> Result<(), HookError>;

    fn use_consumable(&mut self, consumable: Consumable) -> Result<(), HookError>;

    fn on_event(&mut self, _event: &MineEvent) {}
}

/// Hooks that accept everything and grant one item per find
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl MineHooks for NoopHooks {
    fn charge_energy(&mut self) -> Result<(), HookError> {
        Ok(())
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

/// Counting hooks for a single play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Amount granted per find
    pub amount_per_find: u32,
    pub energy_charges: u32,
    pub items_found: u64,
    pub layers_mined: u32,
    pub treasure_scanner_uses: u32,
    pub explosive_charge_uses: u32,
    #[serde(skip)]
    pub events: Vec<MineEvent>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SessionStats {
    pub fn new(amount_per_find: u32) -> Self {
        Self {
            amount_per_find,
            energy_charges: 0,
            items_found: 0,
            layers_mined: 0,
            treasure_scanner_uses: 0,
            explosive_charge_uses: 0,
            events: Vec::new(),
        }
    }
}

impl MineHooks for SessionStats {
    fn charge_energy(&mut self) -> Result<(), HookError> {
        self.energy_charges += 1;
        Ok(())
    }

    fn reward_amount(&mut self) -> Result<u32, HookError> {
        Ok(self.amount_per_find)
    }

    fn record_items_found(&mut self, amount: u32) -> Result<(), HookError> {
        self.items_found += u64::from(amount);
        Ok(())
    }

    fn record_layer_mined(&mut self) -> Result<(), HookError> {
        self.layers_mined += 1;
        Ok(())
    }

    fn use_consumable(&mut self, consumable: Consumable) -> Result<(), HookError> {
        match consumable {
            Consumable::TreasureScanner => self.treasure_scanner_uses += 1,
            Consumable::ExplosiveCharge => self.explosive_charge_uses += 1,
        }
        Ok(())
    }

    fn on_event(&mut self, event: &MineEvent) {
        self.events.push(event.clone());
    }
}
