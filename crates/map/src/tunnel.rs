//! Tunnel accessors: mouth construction, elevation-matched end finding,
//! and the construction-time "does a tunnel pass under here" probes.
//!
//! Unlike bridges, a tunnel leaves no trace on the tiles it passes under;
//! the bore exists only as the pair of mouth tiles. Locating the far end
//! therefore needs the elevation as a third matching criterion: several
//! bores may share the same (x, y) alignment at different depths.

use bevy::prelude::*;

use crate::coords::{DiagDirection, TileIndex};
use crate::storage::{Owner, RailTypeId, RoadTypeId, TileType, TransportType, WorldMap};
use crate::tile_assert;
use crate::tunnel_bridge::{
    is_tunnel_tile, set_road_owner, set_tram_owner, tunnel_bridge_direction, StructureError,
    DIRECTION_OFFSET, TRANSPORT_OFFSET,
};
use crate::bits::set_bits;

/// The mouth at the far end of the tunnel starting at mouth `t`.
///
/// A candidate only matches when its facing direction is the reverse of
/// ours AND it sits at our elevation; a bore at another depth along the
/// same alignment is skipped. Bounded by [`WorldMap::scan_bound`].
pub fn other_tunnel_end(map: &WorldMap, t: TileIndex) -> Result<TileIndex, StructureError> {
    tile_assert!(is_tunnel_tile(map, t), "tile {:?} is not a tunnel mouth", t);
    let dir = tunnel_bridge_direction(map, t);
    let back = dir.reverse();
    let z = map.tile_z(t);

    let mut cur = t;
    for _ in 0..map.scan_bound() {
        cur = match map.add_dir(cur, dir) {
            Some(next) => next,
            None => break,
        };
        if is_tunnel_tile(map, cur)
            && tunnel_bridge_direction(map, cur) == back
            && map.tile_z(cur) == z
        {
            return Ok(cur);
        }
    }
    warn!("no matching tunnel mouth found from {:?} at z {}", t, z);
    Err(StructureError::TunnelEndNotFound(t))
}

/// Does a bore at height `z` facing `dir` pass under `tile`?
///
/// Walks against `dir` while the terrain stays above `z`; the walk can
/// only end on a mouth tile at exactly `z` (then the bore continues under
/// us) or on lower ground (then nothing is buried here). Falling off the
/// grid means no tunnel either.
pub fn is_tunnel_in_way_dir(map: &WorldMap, tile: TileIndex, z: u8, dir: DiagDirection) -> bool {
    let mut t = tile;
    loop {
        t = match map.add_dir(t, dir.reverse()) {
            Some(next) => next,
            None => return false,
        };
        let height = map.tile_z(t);
        if height <= z {
            return height == z && is_tunnel_tile(map, t) && tunnel_bridge_direction(map, t) == dir;
        }
    }
}

/// Does any bore at height `z` pass under `tile`?
///
/// Probes both axes. Per axis the scan direction is chosen by which map
/// half the tile lies in, so the walk always heads for the nearer edge.
pub fn is_tunnel_in_way(map: &WorldMap, tile: TileIndex, z: u8) -> bool {
    let x_dir = if map.tile_x(tile) > map.width() / 2 {
        DiagDirection::NE
    } else {
        DiagDirection::SW
    };
    let y_dir = if map.tile_y(tile) > map.height() / 2 {
        DiagDirection::NW
    } else {
        DiagDirection::SE
    };
    is_tunnel_in_way_dir(map, tile, z, x_dir) || is_tunnel_in_way_dir(map, tile, z, y_dir)
}

// ---------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------

/// Re-encode `t` as a tunnel mouth (structure-kind bit clear).
fn make_tunnel(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    dir: DiagDirection,
    transport: TransportType,
) {
    map.set_tile_type(t, TileType::TunnelBridge);
    map.set_owner(t, owner);

    let tile = map.tile_mut(t);
    tile.m2 = 0;
    tile.m3 = 0;
    tile.m4 = 0;
    tile.m5 = 0;
    set_bits(&mut tile.m5, TRANSPORT_OFFSET, 2, transport as u32);
    set_bits(&mut tile.m5, DIRECTION_OFFSET, 2, dir as u32);

    let ext = map.ext_mut(t);
    ext.m6 = 0;
    ext.m7 = 0;
    ext.m8 = 0;
}

/// Build a road tunnel mouth at `t`, boring toward `dir`.
pub fn make_road_tunnel(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    dir: DiagDirection,
    road_type: RoadTypeId,
    tram_type: RoadTypeId,
) {
    make_tunnel(map, t, owner, dir, TransportType::Road);
    map.tile_mut(t).m4 = road_type.0;
    set_bits(&mut map.ext_mut(t).m8, 0, 8, tram_type.0 as u32);
    set_road_owner(map, t, owner);
    set_tram_owner(map, t, owner);
}

/// Build a rail tunnel mouth at `t`, boring toward `dir`.
pub fn make_rail_tunnel(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    dir: DiagDirection,
    rail_type: RailTypeId,
) {
    make_tunnel(map, t, owner, dir, TransportType::Rail);
    map.tile_mut(t).m4 = rail_type.0;
}
