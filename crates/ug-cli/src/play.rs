//! Automatic excavation used by the `play` command

use tracing::debug;

use ug_core::{FoundItem, HookError, Mine, MineHooks};

/// What an automatic run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DigReport {
    pub tiles_broken: u32,
    pub found: Vec<FoundItem>,
    pub completed: bool,
}

/// Dig out every reward tile, collect everything, then close the layer.
///
/// Tiles without a reward are left alone.
pub fn auto_dig<H: MineHooks>(mine: &mut Mine, hooks: &mut H) -> Result<DigReport, HookError> {
    let mut report = DigReport::default();
    let reward_cells: Vec<_> = (0..mine.grid().len())
        .filter(|&index| mine.grid()[index].reward().is_some())
        .filter_map(|index| mine.coordinate_for_grid_index(index))
        .collect();

    for &coordinate in &reward_cells {
        while mine.attempt_break_tile(coordinate, 1, hooks)? {
            report.tiles_broken += 1;
        }
        if let Some(found) = mine.attempt_find_item(coordinate, hooks)? {
            debug!(reward_id = found.reward_id, item_id = found.item_id, "collected");
            report.found.push(found);
        }
    }

    report.completed = mine.attempt_complete_layer(hooks)?;
    Ok(report)
}
