//! ug-core: Core simulation for the underground mining mini-game
//!
//! This crate contains the mine grid, item burial, digging and
//! save/restore with no I/O dependencies. Everything the mine needs from
//! the surrounding game (item catalogs, energy, statistics, reward sizing)
//! is passed in through traits, so it is pure and testable.

pub mod config;
pub mod error;
pub mod hooks;
pub mod mine;
pub mod shape;

mod rng;

pub use config::{ItemDefinition, MineConfig, MineType, StaticMineConfig};
pub use error::{HookError, SaveError};
pub use hooks::{Consumable, MineEvent, MineHooks, NoopHooks, SessionStats};
pub use mine::{Coordinate, FoundItem, Mine, MineProperties, MineSave, MineState, Reward, Tile};
pub use rng::{GameRng, RandomProvider};
