//! ASCII map rendering for the tile grid.
//!
//! Provides two views:
//! - **Overview**: each character represents a block of tiles, showing the
//!   most interesting tile type in the block
//! - **Detail**: 1 character per tile for a given rectangle
//!
//! Views are built on-demand from `&WorldMap`; nothing here mutates state.

use crate::bridge::has_bridge_above;
use crate::coords::TileIndex;
use crate::depot::{is_hangar_tile, is_rail_depot_tile, is_road_depot_tile, is_ship_depot_tile};
use crate::storage::{TileType, WorldMap};
use crate::tunnel_bridge::is_bridge;

/// Target edge length of the overview in characters.
const OVERVIEW_SIZE: u32 = 64;

/// Convert a single tile to its ASCII character representation.
///
/// A span crossing a non-structure tile is drawn as the span, since that
/// is what a viewer would see from above.
pub fn tile_char(map: &WorldMap, t: TileIndex) -> char {
    if has_bridge_above(map, t) && !map.is_tile_type(t, TileType::TunnelBridge) {
        return '=';
    }
    match map.tile_type(t) {
        TileType::Void => ' ',
        TileType::Clear => '.',
        TileType::Trees => 't',
        TileType::Water => {
            if is_ship_depot_tile(map, t) {
                'd'
            } else {
                '~'
            }
        }
        TileType::Railway => {
            if is_rail_depot_tile(map, t) {
                'D'
            } else {
                '+'
            }
        }
        TileType::Road => {
            if is_road_depot_tile(map, t) {
                'd'
            } else {
                '#'
            }
        }
        TileType::Station => {
            if is_hangar_tile(map, t) {
                'A'
            } else {
                'S'
            }
        }
        TileType::House => 'H',
        TileType::Industry => 'I',
        TileType::Object => 'O',
        TileType::TunnelBridge => {
            if is_bridge(map, t) {
                'B'
            } else {
                'u'
            }
        }
    }
}

/// Display priority for the overview downsampling; higher wins the block.
fn tile_rank(map: &WorldMap, t: TileIndex) -> u8 {
    if map.is_tile_type(t, TileType::TunnelBridge) {
        return 10;
    }
    if has_bridge_above(map, t) {
        return 9;
    }
    match map.tile_type(t) {
        TileType::Station => 8,
        TileType::Industry => 7,
        TileType::House => 6,
        TileType::Railway => 5,
        TileType::Road => 4,
        TileType::Object => 3,
        TileType::Water => 2,
        TileType::Trees => 1,
        TileType::Clear | TileType::Void | TileType::TunnelBridge => 0,
    }
}

/// Render the whole map downsampled to roughly [`OVERVIEW_SIZE`] columns.
/// Each character shows the highest-priority tile in its block.
pub fn render_overview(map: &WorldMap) -> String {
    let block = (map.width() / OVERVIEW_SIZE).max(1);
    let cols = map.width() / block;
    let rows = map.height() / block;

    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for by in 0..rows {
        for bx in 0..cols {
            let mut best = map.tile_xy(bx * block, by * block);
            let mut best_rank = tile_rank(map, best);
            for dy in 0..block {
                for dx in 0..block {
                    let t = map.tile_xy(bx * block + dx, by * block + dy);
                    let rank = tile_rank(map, t);
                    if rank > best_rank {
                        best = t;
                        best_rank = rank;
                    }
                }
            }
            out.push(tile_char(map, best));
        }
        out.push('\n');
    }
    out
}

/// Render one character per tile for the rectangle spanned by the two
/// corners (inclusive, clamped to the map).
pub fn render_detail(map: &WorldMap, x1: u32, y1: u32, x2: u32, y2: u32) -> String {
    let min_x = x1.min(x2);
    let max_x = x1.max(x2).min(map.width() - 1);
    let min_y = y1.min(y2);
    let max_y = y1.max(y2).min(map.height() - 1);

    let mut out = String::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            out.push(tile_char(map, map.tile_xy(x, y)));
        }
        out.push('\n');
    }
    out
}
