//! ASCII rendering of a mine grid

use ug_core::{Mine, Tile};

/// Character for one tile.
///
/// Buried tiles show their remaining depth (capped at 9). With `reveal`,
/// buried tiles that hide a reward show `#` instead.
pub fn tile_glyph(tile: &Tile, reveal: bool) -> char {
    match (tile.layer_depth(), tile.reward()) {
        (0, None) => '.',
        (0, Some(reward)) if reward.is_rewarded() => '$',
        (0, Some(_)) => 'o',
        (_, Some(_)) if reveal => '#',
        (depth, _) => char::from_digit(depth.min(9), 10).unwrap_or('9'),
    }
}

/// Render the whole grid, one line per row
pub fn render(mine: &Mine, reveal: bool) -> String {
    let width = mine.width() as usize;
    if width == 0 || mine.grid().is_empty() {
        return String::from("(empty mine)\n");
    }

    let mut out = String::with_capacity(mine.grid().len() + mine.height() as usize);
    for row in mine.grid().chunks(width) {
        out.extend(row.iter().map(|tile| tile_glyph(tile, reveal)));
        out.push('\n');
    }
    out
}

/// One-line counter summary
pub fn summary(mine: &Mine) -> String {
    format!(
        "state={} buried={} exposed={} found={} discovery_in={:.1}",
        mine.state(),
        mine.items_buried(),
        mine.items_partially_found(),
        mine.items_found(),
        mine.time_until_discovery()
    )
}
