//! Error types for the mine core
//!
//! Ordinary gameplay outcomes (nothing to dig, reward not exposed yet,
//! layer not finished) are plain return values. These errors cover the
//! cases that must fail loudly: broken collaborators and corrupt saves.

use thiserror::Error;

/// Failure reported by a host collaborator (battery, statistics, items).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{hook} failed: {reason}")]
pub struct HookError {
    pub hook: &'static str,
    pub reason: String,
}

impl HookError {
    pub fn new(hook: &'static str, reason: impl Into<String>) -> Self {
        Self {
            hook,
            reason: reason.into(),
        }
    }
}

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Grid has {found} tiles, expected {expected} for a {width}x{height} mine")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },

    #[error("Tile {index} has rotation {rotations}, expected 0-3")]
    InvalidRotation { index: usize, rotations: u32 },
}
