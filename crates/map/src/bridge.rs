//! Bridge accessors: ramp construction, the independent bridge-above
//! flags carried by spanned tiles, and end finding.
//!
//! A bridge occupies the map as two ramp tiles of type
//! [`TileType::TunnelBridge`] facing each other, plus the per-axis
//! bridge-above flags on every tile in between. Middle tiles keep their
//! own tile type; only the two flag bits in the `kind` byte record that a
//! span crosses them, so setting and clearing them must never touch the
//! discriminant.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::bits::{clear_bit, get_bits, has_bit, set_bit, set_bits};
use crate::coords::{Axis, DiagDirection, TileIndex};
use crate::storage::{
    Owner, RailTypeId, RoadTypeId, TileType, TransportType, WorldMap, BRIDGE_ABOVE_OFFSET,
};
use crate::tile_assert;
use crate::tunnel_bridge::{
    is_bridge_tile, set_road_owner, set_tram_owner, tunnel_bridge_direction, StructureError,
    BRIDGE_TYPE_BITS, BRIDGE_TYPE_OFFSET, DIRECTION_OFFSET, STRUCTURE_KIND_BIT, TRANSPORT_OFFSET,
};

/// Bridge specification index (girder, suspension, ...), 4 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct BridgeType(pub u8);

// ---------------------------------------------------------------------
// Bridge-above flags (valid on every tile, independent of tile type)
// ---------------------------------------------------------------------

/// Does any bridge span this tile?
#[inline]
pub fn has_bridge_above(map: &WorldMap, t: TileIndex) -> bool {
    get_bits(map.tile(t).kind, BRIDGE_ABOVE_OFFSET, 2) != 0
}

/// Does a bridge along `axis` span this tile?
#[inline]
pub fn is_bridge_above_axis(map: &WorldMap, t: TileIndex, axis: Axis) -> bool {
    has_bit(map.tile(t).kind, BRIDGE_ABOVE_OFFSET + axis as u32)
}

/// The axis of the span above a middle tile. With two crossing spans the
/// X one is reported; callers that care about both query per axis.
#[inline]
pub fn bridge_axis(map: &WorldMap, t: TileIndex) -> Axis {
    tile_assert!(
        has_bridge_above(map, t),
        "tile {:?} has no bridge above it",
        t
    );
    if is_bridge_above_axis(map, t, Axis::X) {
        Axis::X
    } else {
        Axis::Y
    }
}

/// Mark a span along `axis` above this tile.
#[inline]
pub fn set_bridge_middle(map: &mut WorldMap, t: TileIndex, axis: Axis) {
    set_bit(&mut map.tile_mut(t).kind, BRIDGE_ABOVE_OFFSET + axis as u32);
}

/// Remove the span along `axis` above this tile.
#[inline]
pub fn clear_single_bridge_middle(map: &mut WorldMap, t: TileIndex, axis: Axis) {
    clear_bit(&mut map.tile_mut(t).kind, BRIDGE_ABOVE_OFFSET + axis as u32);
}

/// Remove all spans above this tile.
#[inline]
pub fn clear_bridge_middle(map: &mut WorldMap, t: TileIndex) {
    set_bits(&mut map.tile_mut(t).kind, BRIDGE_ABOVE_OFFSET, 2, 0);
}

// ---------------------------------------------------------------------
// Ramp fields
// ---------------------------------------------------------------------

/// The bridge specification of the ramp at `t`.
#[inline]
pub fn bridge_type(map: &WorldMap, t: TileIndex) -> BridgeType {
    tile_assert!(is_bridge_tile(map, t), "tile {:?} is not a bridge ramp", t);
    BridgeType(get_bits(map.ext(t).m6, BRIDGE_TYPE_OFFSET, BRIDGE_TYPE_BITS) as u8)
}

// ---------------------------------------------------------------------
// End finding
// ---------------------------------------------------------------------

/// Walk from `tile` in `dir` until the ramp facing back is found.
///
/// Valid starting from a ramp or any spanned middle tile. Bounded by
/// [`WorldMap::scan_bound`]; exhausting the bound or falling off the grid
/// means the map is corrupt.
pub fn bridge_end(
    map: &WorldMap,
    tile: TileIndex,
    dir: DiagDirection,
) -> Result<TileIndex, StructureError> {
    let back = dir.reverse();
    let mut t = tile;
    for _ in 0..map.scan_bound() {
        t = match map.add_dir(t, dir) {
            Some(next) => next,
            None => break,
        };
        if is_bridge_tile(map, t) && tunnel_bridge_direction(map, t) == back {
            return Ok(t);
        }
    }
    warn!("no bridge ramp facing {:?} found from {:?}", back, tile);
    Err(StructureError::BridgeEndNotFound(tile))
}

/// The ramp at the far side of the bridge starting at ramp `t`.
pub fn other_bridge_end(map: &WorldMap, t: TileIndex) -> Result<TileIndex, StructureError> {
    tile_assert!(is_bridge_tile(map, t), "tile {:?} is not a bridge ramp", t);
    bridge_end(map, t, tunnel_bridge_direction(map, t))
}

/// From a spanned middle tile, the ramp toward the low-coordinate end.
pub fn northern_bridge_end(map: &WorldMap, t: TileIndex) -> Result<TileIndex, StructureError> {
    bridge_end(map, t, bridge_axis(map, t).to_diag_dir().reverse())
}

/// From a spanned middle tile, the ramp toward the high-coordinate end.
pub fn southern_bridge_end(map: &WorldMap, t: TileIndex) -> Result<TileIndex, StructureError> {
    bridge_end(map, t, bridge_axis(map, t).to_diag_dir())
}

// ---------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------

/// Re-encode `t` as a bridge ramp. Everything the family does not define
/// is zeroed; the bridge-above flags and elevation survive.
fn make_bridge_ramp(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    bridge_type: BridgeType,
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
    set_bit(&mut tile.m5, STRUCTURE_KIND_BIT);
    set_bits(&mut tile.m5, TRANSPORT_OFFSET, 2, transport as u32);
    set_bits(&mut tile.m5, DIRECTION_OFFSET, 2, dir as u32);

    let ext = map.ext_mut(t);
    ext.m6 = 0;
    set_bits(&mut ext.m6, BRIDGE_TYPE_OFFSET, BRIDGE_TYPE_BITS, bridge_type.0 as u32);
    ext.m7 = 0;
    ext.m8 = 0;
}

/// Build a rail bridge ramp at `t`, facing `dir` onto the span.
pub fn make_rail_bridge_ramp(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    bridge_type: BridgeType,
    dir: DiagDirection,
    rail_type: RailTypeId,
) {
    make_bridge_ramp(map, t, owner, bridge_type, dir, TransportType::Rail);
    map.tile_mut(t).m4 = rail_type.0;
}

/// Build a road bridge ramp at `t`. Road and tram lanes carry their own
/// owners; an absent lane is [`RoadTypeId::INVALID`].
#[allow(clippy::too_many_arguments)]
pub fn make_road_bridge_ramp(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    road_owner: Owner,
    tram_owner: Owner,
    bridge_type: BridgeType,
    dir: DiagDirection,
    road_type: RoadTypeId,
    tram_type: RoadTypeId,
) {
    make_bridge_ramp(map, t, owner, bridge_type, dir, TransportType::Road);
    map.tile_mut(t).m4 = road_type.0;
    set_bits(&mut map.ext_mut(t).m8, 0, 8, tram_type.0 as u32);
    set_road_owner(map, t, road_owner);
    set_tram_owner(map, t, tram_owner);
}

/// Build an aqueduct ramp at `t`. Aqueducts have a single fixed
/// specification, so no bridge type is encoded.
pub fn make_aqueduct_bridge_ramp(map: &mut WorldMap, t: TileIndex, owner: Owner, dir: DiagDirection) {
    make_bridge_ramp(map, t, owner, BridgeType(0), dir, TransportType::Water);
}
