//! Depot dispatch: one entry point over the four tile families that can
//! carry a depot (rail, road, water, airport hangar).
//!
//! A depot is not its own tile type; each transport family encodes "this
//! tile is my depot" in its own sub-fields. This module knows those four
//! encodings, answers "is there a depot here" for any tile, and maps a
//! depot tile to the vehicle type it serves.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::bits::{get_bits, has_bit, set_bit, set_bits};
use crate::coords::{Axis, DiagDirection, TileIndex};
use crate::storage::{Owner, RailTypeId, RoadTypeId, TileType, TransportType, WorldMap};
use crate::tile_assert;

// Per-family sub-discriminants.
const RAIL_TILE_TYPE_OFFSET: u32 = 6; // m5 bits 6..7 on Railway tiles
const RAIL_TILE_DEPOT: u32 = 3;
const ROAD_TILE_TYPE_OFFSET: u32 = 6; // m5 bits 6..7 on Road tiles
const ROAD_TILE_DEPOT: u32 = 2;
const WATER_TILE_TYPE_OFFSET: u32 = 4; // m5 bits 4..5 on Water tiles
const WATER_TILE_DEPOT: u32 = 3;
const SHIP_DEPOT_AXIS_BIT: u32 = 0;
const SHIP_DEPOT_SOUTH_BIT: u32 = 1;
const STATION_TYPE_OFFSET: u32 = 3; // m6 bits 3..5 on Station tiles
const HANGAR_BIT: u32 = 7; // m5 on airport station tiles

/// Identifies a depot (for hangars: the station that owns them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct DepotId(pub u16);

/// The vehicle class a depot serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum VehicleType {
    Train,
    Road,
    Ship,
    Aircraft,
}

/// Station kind stored on Station tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[repr(u8)]
pub enum StationType {
    Rail = 0,
    Airport = 1,
    Truck = 2,
    Bus = 3,
    Dock = 4,
}

// ---------------------------------------------------------------------
// Per-family tests
// ---------------------------------------------------------------------

#[inline]
pub fn is_rail_depot_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::Railway)
        && get_bits(map.tile(t).m5, RAIL_TILE_TYPE_OFFSET, 2) == RAIL_TILE_DEPOT
}

#[inline]
pub fn is_road_depot_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::Road)
        && get_bits(map.tile(t).m5, ROAD_TILE_TYPE_OFFSET, 2) == ROAD_TILE_DEPOT
}

#[inline]
pub fn is_ship_depot_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::Water)
        && get_bits(map.tile(t).m5, WATER_TILE_TYPE_OFFSET, 2) == WATER_TILE_DEPOT
}

#[inline]
pub fn is_hangar_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::Station)
        && get_bits(map.ext(t).m6, STATION_TYPE_OFFSET, 3) == StationType::Airport as u32
        && has_bit(map.tile(t).m5, HANGAR_BIT)
}

// ---------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------

/// Is there any kind of depot on this tile? Total over all tile types.
pub fn is_depot_tile(map: &WorldMap, t: TileIndex) -> bool {
    match map.tile_type(t) {
        TileType::Railway => is_rail_depot_tile(map, t),
        TileType::Road => is_road_depot_tile(map, t),
        TileType::Water => is_ship_depot_tile(map, t),
        TileType::Station => is_hangar_tile(map, t),
        _ => false,
    }
}

/// Is there a depot for the given transport mode on this tile?
pub fn is_depot_type_tile(map: &WorldMap, t: TileIndex, transport: TransportType) -> bool {
    match transport {
        TransportType::Rail => is_rail_depot_tile(map, t),
        TransportType::Road => is_road_depot_tile(map, t),
        TransportType::Water => is_ship_depot_tile(map, t),
        TransportType::Air => is_hangar_tile(map, t),
    }
}

/// The vehicle class served by the depot at `t`. Defined for exactly the
/// four depot-bearing tile types; anything else is a contract violation.
pub fn depot_vehicle_type(map: &WorldMap, t: TileIndex) -> VehicleType {
    tile_assert!(is_depot_tile(map, t), "tile {:?} carries no depot", t);
    match map.tile_type(t) {
        TileType::Railway => VehicleType::Train,
        TileType::Road => VehicleType::Road,
        TileType::Water => VehicleType::Ship,
        TileType::Station => VehicleType::Aircraft,
        other => unreachable!("no depot interpretation for {other:?}"),
    }
}

/// The id of the depot at `t`.
pub fn depot_index(map: &WorldMap, t: TileIndex) -> DepotId {
    tile_assert!(is_depot_tile(map, t), "tile {:?} carries no depot", t);
    DepotId(map.tile(t).m2)
}

// ---------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------

/// Build a rail depot at `t` with its entrance facing `dir`.
pub fn make_rail_depot(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    dir: DiagDirection,
    rail_type: RailTypeId,
    id: DepotId,
) {
    map.set_tile_type(t, TileType::Railway);
    map.set_owner(t, owner);
    let tile = map.tile_mut(t);
    tile.m2 = id.0;
    tile.m3 = 0;
    tile.m4 = rail_type.0;
    tile.m5 = 0;
    set_bits(&mut tile.m5, RAIL_TILE_TYPE_OFFSET, 2, RAIL_TILE_DEPOT);
    set_bits(&mut tile.m5, 0, 2, dir as u32);
}

/// Build a road depot at `t` with its entrance facing `dir`.
pub fn make_road_depot(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    dir: DiagDirection,
    road_type: RoadTypeId,
    id: DepotId,
) {
    map.set_tile_type(t, TileType::Road);
    map.set_owner(t, owner);
    let tile = map.tile_mut(t);
    tile.m2 = id.0;
    tile.m3 = 0;
    tile.m4 = road_type.0;
    tile.m5 = 0;
    set_bits(&mut tile.m5, ROAD_TILE_TYPE_OFFSET, 2, ROAD_TILE_DEPOT);
    set_bits(&mut tile.m5, 0, 2, dir as u32);
}

/// Build one half of a ship depot at `t`, aligned along `axis`.
pub fn make_ship_depot(
    map: &mut WorldMap,
    t: TileIndex,
    owner: Owner,
    axis: Axis,
    southern_half: bool,
    id: DepotId,
) {
    map.set_tile_type(t, TileType::Water);
    map.set_owner(t, owner);
    let tile = map.tile_mut(t);
    tile.m2 = id.0;
    tile.m3 = 0;
    tile.m4 = 0;
    tile.m5 = 0;
    set_bits(&mut tile.m5, WATER_TILE_TYPE_OFFSET, 2, WATER_TILE_DEPOT);
    set_bits(&mut tile.m5, SHIP_DEPOT_AXIS_BIT, 1, axis as u32);
    set_bits(&mut tile.m5, SHIP_DEPOT_SOUTH_BIT, 1, southern_half as u32);
}

/// Build an airport hangar tile at `t` belonging to station `station_id`.
pub fn make_hangar(map: &mut WorldMap, t: TileIndex, owner: Owner, station_id: DepotId) {
    map.set_tile_type(t, TileType::Station);
    map.set_owner(t, owner);
    let tile = map.tile_mut(t);
    tile.m2 = station_id.0;
    tile.m3 = 0;
    tile.m4 = 0;
    tile.m5 = 0;
    set_bit(&mut tile.m5, HANGAR_BIT);
    let ext = map.ext_mut(t);
    ext.m6 = 0;
    set_bits(&mut ext.m6, STATION_TYPE_OFFSET, 3, StationType::Airport as u32);
    ext.m7 = 0;
    ext.m8 = 0;
}
