//! Void tiles: the unreachable rim around the playable map.

use crate::coords::TileIndex;
use crate::storage::{Tile, TileExt, TileType, WorldMap};

/// Reset a tile to void with every field zeroed. Unconditional and
/// idempotent; the only caller that transitions tiles *into* the void
/// state is map allocation.
pub fn make_void(map: &mut WorldMap, t: TileIndex) {
    *map.tile_mut(t) = Tile::default();
    *map.ext_mut(t) = TileExt::default();
    map.set_tile_type(t, TileType::Void);
}

pub fn is_void_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::Void)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Owner;

    #[test]
    fn test_make_void_is_idempotent() {
        let mut map = WorldMap::new(64, 64);
        let t = map.tile_xy(10, 10);
        map.set_tile_type(t, TileType::Water);
        map.set_owner(t, Owner(3));

        make_void(&mut map, t);
        let first = (*map.tile(t), *map.ext(t));
        make_void(&mut map, t);
        let second = (*map.tile(t), *map.ext(t));

        assert_eq!(first, second);
        assert!(is_void_tile(&map, t));
        assert_eq!(map.owner(t), Owner(0));
        assert_eq!(map.tile_z(t), 0);
    }

    #[test]
    fn test_make_void_clears_bridge_above() {
        let mut map = WorldMap::new(64, 64);
        let t = map.tile_xy(12, 12);
        crate::bridge::set_bridge_middle(&mut map, t, crate::coords::Axis::X);
        make_void(&mut map, t);
        assert!(!crate::bridge::has_bridge_above(&map, t));
    }
}
