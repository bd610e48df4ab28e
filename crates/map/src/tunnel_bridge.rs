//! Accessors shared by the whole tunnel/bridge tile family.
//!
//! A tunnel mouth and a bridge ramp use the same discriminant
//! ([`TileType::TunnelBridge`]) and the same `m5` layout; bit 7 of `m5` is
//! the sub-discriminant that separates them and must be consulted before
//! any other field of the family is trusted:
//!
//! | `m5` bits | meaning |
//! |-----------|---------|
//! | 7 | structure kind: 1 = bridge ramp, 0 = tunnel mouth |
//! | 4 | rail path reservation (rail transport only) |
//! | 2..3 | [`TransportType`] |
//! | 0..1 | outward-facing [`DiagDirection`] of the ramp/mouth |
//!
//! Extended record: `m6` bits 2..5 carry the bridge type, `m7` bit 5 the
//! snow/desert flag, `m7` bits 0..4 the tram owner on road ramps. `m4`
//! holds the road (or rail) type, `m8` bits 0..7 the tram type.
//!
//! End-finding scans here and in the [`bridge`](crate::bridge) /
//! [`tunnel`](crate::tunnel) modules are bounded by
//! [`WorldMap::scan_bound`] and report [`StructureError`] on a malformed
//! map. The surveyed behavior scanned unbounded; the bound is a deliberate
//! strengthening with no cost on well-formed input.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::bits::{assign_bit, get_bits, has_bit, set_bits};
use crate::coords::{Axis, DiagDirection, TileIndex};
use crate::storage::{Owner, RoadTypeId, TileType, TransportType, WorldMap};
use crate::tile_assert;

pub(crate) const STRUCTURE_KIND_BIT: u32 = 7;
pub(crate) const RESERVATION_BIT: u32 = 4;
pub(crate) const TRANSPORT_OFFSET: u32 = 2;
pub(crate) const DIRECTION_OFFSET: u32 = 0;
pub(crate) const BRIDGE_TYPE_OFFSET: u32 = 2;
pub(crate) const BRIDGE_TYPE_BITS: u32 = 4;
pub(crate) const SNOW_DESERT_BIT: u32 = 5;
pub(crate) const TRAM_OWNER_OFFSET: u32 = 0;

/// A set of track pieces on one tile. Only the two straight pieces along
/// the grid axes exist on tunnel/bridge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct TrackBits(pub u8);

impl TrackBits {
    pub const NONE: TrackBits = TrackBits(0);
    pub const X: TrackBits = TrackBits(1 << 0);
    pub const Y: TrackBits = TrackBits(1 << 1);

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The straight track piece running along `axis`.
    #[inline]
    pub fn from_axis(axis: Axis) -> TrackBits {
        match axis {
            Axis::X => TrackBits::X,
            Axis::Y => TrackBits::Y,
        }
    }
}

/// A directional scan exhausted its bound without finding the matching
/// structure end. Only a corrupted map produces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum StructureError {
    BridgeEndNotFound(TileIndex),
    TunnelEndNotFound(TileIndex),
}

#[inline]
pub(crate) fn expect_tunnel_bridge(map: &WorldMap, t: TileIndex) {
    tile_assert!(
        map.is_tile_type(t, TileType::TunnelBridge),
        "tile {:?} is {:?}, not a tunnel/bridge tile",
        t,
        map.tile_type(t)
    );
}

/// Is this tunnel/bridge tile a bridge ramp? The family sub-discriminant.
#[inline]
pub fn is_bridge(map: &WorldMap, t: TileIndex) -> bool {
    expect_tunnel_bridge(map, t);
    has_bit(map.tile(t).m5, STRUCTURE_KIND_BIT)
}

/// Is this tunnel/bridge tile a tunnel mouth?
#[inline]
pub fn is_tunnel(map: &WorldMap, t: TileIndex) -> bool {
    !is_bridge(map, t)
}

/// Type check and sub-discriminant in one step; safe on any tile.
#[inline]
pub fn is_bridge_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::TunnelBridge) && is_bridge(map, t)
}

/// Type check and sub-discriminant in one step; safe on any tile.
#[inline]
pub fn is_tunnel_tile(map: &WorldMap, t: TileIndex) -> bool {
    map.is_tile_type(t, TileType::TunnelBridge) && is_tunnel(map, t)
}

/// The direction the ramp faces onto its span, or the mouth into its bore.
#[inline]
pub fn tunnel_bridge_direction(map: &WorldMap, t: TileIndex) -> DiagDirection {
    expect_tunnel_bridge(map, t);
    DiagDirection::from_bits(get_bits(map.tile(t).m5, DIRECTION_OFFSET, 2))
}

#[inline]
pub fn tunnel_bridge_transport_type(map: &WorldMap, t: TileIndex) -> TransportType {
    expect_tunnel_bridge(map, t);
    TransportType::from_bits(get_bits(map.tile(t).m5, TRANSPORT_OFFSET, 2))
}

// ---------------------------------------------------------------------
// Snow / desert ground flag
// ---------------------------------------------------------------------

#[inline]
pub fn has_tunnel_bridge_snow_or_desert(map: &WorldMap, t: TileIndex) -> bool {
    expect_tunnel_bridge(map, t);
    has_bit(map.ext(t).m7, SNOW_DESERT_BIT)
}

#[inline]
pub fn set_tunnel_bridge_snow_or_desert(map: &mut WorldMap, t: TileIndex, snow: bool) {
    expect_tunnel_bridge(map, t);
    assign_bit(&mut map.ext_mut(t).m7, SNOW_DESERT_BIT, snow);
}

// ---------------------------------------------------------------------
// Rail path reservation
// ---------------------------------------------------------------------

#[inline]
fn expect_rail_tunnel_bridge(map: &WorldMap, t: TileIndex) {
    expect_tunnel_bridge(map, t);
    tile_assert!(
        tunnel_bridge_transport_type(map, t) == TransportType::Rail,
        "reservation state is only defined for rail, tile {:?} carries {:?}",
        t,
        tunnel_bridge_transport_type(map, t)
    );
}

/// Whether an approaching train has claimed the track through this
/// tunnel/bridge head. Rail transport only.
#[inline]
pub fn has_tunnel_bridge_reservation(map: &WorldMap, t: TileIndex) -> bool {
    expect_rail_tunnel_bridge(map, t);
    has_bit(map.tile(t).m5, RESERVATION_BIT)
}

#[inline]
pub fn set_tunnel_bridge_reservation(map: &mut WorldMap, t: TileIndex, reserved: bool) {
    expect_rail_tunnel_bridge(map, t);
    assign_bit(&mut map.tile_mut(t).m5, RESERVATION_BIT, reserved);
}

/// The reserved track pieces on this head: the straight piece along the
/// structure's axis when reserved, empty otherwise.
#[inline]
pub fn tunnel_bridge_reservation_track_bits(map: &WorldMap, t: TileIndex) -> TrackBits {
    if has_tunnel_bridge_reservation(map, t) {
        TrackBits::from_axis(tunnel_bridge_direction(map, t).axis())
    } else {
        TrackBits::NONE
    }
}

// ---------------------------------------------------------------------
// Road / tram sub-fields (road ramps and road tunnels)
// ---------------------------------------------------------------------

#[inline]
fn expect_road_tunnel_bridge(map: &WorldMap, t: TileIndex) {
    expect_tunnel_bridge(map, t);
    tile_assert!(
        tunnel_bridge_transport_type(map, t) == TransportType::Road,
        "road sub-fields are only defined for road transport, tile {:?} carries {:?}",
        t,
        tunnel_bridge_transport_type(map, t)
    );
}

#[inline]
pub fn road_owner(map: &WorldMap, t: TileIndex) -> Owner {
    expect_road_tunnel_bridge(map, t);
    Owner(get_bits(map.tile(t).m3, 0, 5) as u8)
}

#[inline]
pub fn set_road_owner(map: &mut WorldMap, t: TileIndex, owner: Owner) {
    expect_road_tunnel_bridge(map, t);
    set_bits(&mut map.tile_mut(t).m3, 0, 5, owner.0 as u32);
}

#[inline]
pub fn tram_owner(map: &WorldMap, t: TileIndex) -> Owner {
    expect_road_tunnel_bridge(map, t);
    Owner(get_bits(map.ext(t).m7, TRAM_OWNER_OFFSET, 5) as u8)
}

#[inline]
pub fn set_tram_owner(map: &mut WorldMap, t: TileIndex, owner: Owner) {
    expect_road_tunnel_bridge(map, t);
    set_bits(&mut map.ext_mut(t).m7, TRAM_OWNER_OFFSET, 5, owner.0 as u32);
}

#[inline]
pub fn road_type_id(map: &WorldMap, t: TileIndex) -> RoadTypeId {
    expect_road_tunnel_bridge(map, t);
    RoadTypeId(map.tile(t).m4)
}

#[inline]
pub fn tram_type_id(map: &WorldMap, t: TileIndex) -> RoadTypeId {
    expect_road_tunnel_bridge(map, t);
    RoadTypeId(get_bits(map.ext(t).m8, 0, 8) as u8)
}

// ---------------------------------------------------------------------
// End finding
// ---------------------------------------------------------------------

/// Find the far end of whichever structure starts at `t`, dispatching on
/// the sub-discriminant.
pub fn other_tunnel_bridge_end(map: &WorldMap, t: TileIndex) -> Result<TileIndex, StructureError> {
    if is_tunnel(map, t) {
        crate::tunnel::other_tunnel_end(map, t)
    } else {
        crate::bridge::other_bridge_end(map, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::make_rail_bridge_ramp;
    use crate::storage::RailTypeId;
    use crate::tunnel::{make_rail_tunnel, make_road_tunnel};

    fn rail_head(map: &mut WorldMap, x: u32, y: u32, dir: DiagDirection) -> TileIndex {
        let t = map.tile_xy(x, y);
        make_rail_tunnel(map, t, Owner(1), dir, RailTypeId(0));
        t
    }

    #[test]
    fn test_structure_kind_bit_separates_family() {
        let mut map = WorldMap::new(64, 64);
        let bridge = map.tile_xy(10, 10);
        make_rail_bridge_ramp(
            &mut map,
            bridge,
            Owner(1),
            crate::bridge::BridgeType(0),
            DiagDirection::SW,
            RailTypeId(0),
        );
        let tunnel = rail_head(&mut map, 20, 20, DiagDirection::SE);

        assert!(is_bridge(&map, bridge));
        assert!(!is_tunnel(&map, bridge));
        assert!(is_tunnel(&map, tunnel));
        assert!(is_bridge_tile(&map, bridge));
        assert!(is_tunnel_tile(&map, tunnel));
        assert!(!is_bridge_tile(&map, tunnel));
        assert!(!is_tunnel_tile(&map, map.tile_xy(30, 30)));
    }

    #[test]
    fn test_direction_and_transport_encoding() {
        let mut map = WorldMap::new(64, 64);
        for (i, dir) in DiagDirection::ALL.into_iter().enumerate() {
            let t = rail_head(&mut map, 10 + i as u32, 10, dir);
            assert_eq!(tunnel_bridge_direction(&map, t), dir);
            assert_eq!(
                tunnel_bridge_transport_type(&map, t),
                TransportType::Rail
            );
        }
    }

    #[test]
    fn test_snow_desert_flag_roundtrip() {
        let mut map = WorldMap::new(64, 64);
        let t = rail_head(&mut map, 10, 10, DiagDirection::NE);
        assert!(!has_tunnel_bridge_snow_or_desert(&map, t));
        set_tunnel_bridge_snow_or_desert(&mut map, t, true);
        assert!(has_tunnel_bridge_snow_or_desert(&map, t));
        set_tunnel_bridge_snow_or_desert(&mut map, t, false);
        assert!(!has_tunnel_bridge_snow_or_desert(&map, t));
    }

    #[test]
    fn test_reservation_roundtrip_on_rail() {
        let mut map = WorldMap::new(64, 64);
        let t = rail_head(&mut map, 10, 10, DiagDirection::SW);
        assert!(!has_tunnel_bridge_reservation(&map, t));
        assert!(tunnel_bridge_reservation_track_bits(&map, t).is_empty());

        set_tunnel_bridge_reservation(&mut map, t, true);
        assert!(has_tunnel_bridge_reservation(&map, t));
        assert_eq!(tunnel_bridge_reservation_track_bits(&map, t), TrackBits::X);
    }

    #[test]
    #[should_panic(expected = "only defined for rail")]
    fn test_reservation_on_road_transport_panics() {
        let mut map = WorldMap::new(64, 64);
        let t = map.tile_xy(10, 10);
        make_road_tunnel(
            &mut map,
            t,
            Owner(1),
            DiagDirection::SW,
            RoadTypeId(0),
            RoadTypeId::INVALID,
        );
        let _ = has_tunnel_bridge_reservation(&map, t);
    }

    #[test]
    #[should_panic(expected = "not a tunnel/bridge tile")]
    fn test_family_accessor_on_clear_tile_panics() {
        let map = WorldMap::new(64, 64);
        let _ = tunnel_bridge_direction(&map, map.tile_xy(10, 10));
    }

    #[test]
    fn test_road_sub_fields_roundtrip() {
        let mut map = WorldMap::new(64, 64);
        let t = map.tile_xy(10, 10);
        make_road_tunnel(
            &mut map,
            t,
            Owner(2),
            DiagDirection::NW,
            RoadTypeId(1),
            RoadTypeId(3),
        );
        assert_eq!(road_type_id(&map, t), RoadTypeId(1));
        assert_eq!(tram_type_id(&map, t), RoadTypeId(3));

        set_road_owner(&mut map, t, Owner(5));
        set_tram_owner(&mut map, t, Owner::NONE);
        assert_eq!(road_owner(&map, t), Owner(5));
        assert_eq!(tram_owner(&map, t), Owner::NONE);
        // the snow/desert bit shares m7 with the tram owner
        assert!(!has_tunnel_bridge_snow_or_desert(&map, t));
    }
}
