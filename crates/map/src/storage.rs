//! Raw per-tile record storage and the tile type discriminant.
//!
//! Two parallel fixed-size arrays back the whole map: a primary record
//! ([`Tile`]: the `kind` byte, elevation, and the general-purpose fields
//! `m1`..`m5`) and an extended record ([`TileExt`]: `m6`..`m8`) for tile
//! kinds that outgrow the primary five. The same bytes mean different
//! things under different tile types; this module stores them and exposes
//! the discriminant, and nothing here knows what any `m` field means.
//!
//! Layout of the `kind` byte:
//!
//! | bits | meaning |
//! |------|---------|
//! | 0..3 | [`TileType`] discriminant |
//! | 4..5 | reserved, always 0 |
//! | 6..7 | bridge-above flags, one per [`Axis`](crate::coords::Axis) |
//!
//! The bridge-above flags are independent of the discriminant: a clear
//! tile can carry "a bridge spans this tile" without owning it. Writing
//! the discriminant must never disturb them.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::bits::{get_bits, set_bits};
use crate::config::{MAX_MAP_SIZE, MIN_MAP_SIZE, TILE_TYPE_BITS, VOID_BORDER};
use crate::coords::{DiagDirection, TileIndex};
use crate::tile_assert;
use crate::void::make_void;

/// Bit offset of the discriminant inside `kind`.
pub(crate) const TYPE_OFFSET: u32 = 0;
/// Bit offset of the per-axis bridge-above flags inside `kind`.
pub(crate) const BRIDGE_ABOVE_OFFSET: u32 = 6;

/// Primary per-tile record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Tile {
    pub(crate) kind: u8,
    pub(crate) height: u8,
    pub(crate) m1: u8,
    pub(crate) m2: u16,
    pub(crate) m3: u8,
    pub(crate) m4: u8,
    pub(crate) m5: u8,
}

/// Extended per-tile record. Only meaningful for tile types that document
/// a use for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct TileExt {
    pub(crate) m6: u8,
    pub(crate) m7: u8,
    pub(crate) m8: u16,
}

/// The tile type discriminant. Selects which accessor module's
/// interpretation of the record is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[repr(u8)]
pub enum TileType {
    Clear = 0,
    Railway = 1,
    Road = 2,
    House = 3,
    Trees = 4,
    Station = 5,
    Water = 6,
    Void = 7,
    Industry = 8,
    TunnelBridge = 9,
    Object = 10,
}

impl TileType {
    #[inline]
    pub(crate) fn from_bits(bits: u32) -> TileType {
        match bits {
            0 => TileType::Clear,
            1 => TileType::Railway,
            2 => TileType::Road,
            3 => TileType::House,
            4 => TileType::Trees,
            5 => TileType::Station,
            6 => TileType::Water,
            7 => TileType::Void,
            8 => TileType::Industry,
            9 => TileType::TunnelBridge,
            10 => TileType::Object,
            _ => unreachable!("invalid tile type bits: {bits}"),
        }
    }
}

/// Tile owner, 5 bits in `m1`. Values below [`Owner::TOWN`] are company
/// slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct Owner(pub u8);

impl Owner {
    pub const TOWN: Owner = Owner(0x0F);
    pub const NONE: Owner = Owner(0x10);
}

/// What moves through a tunnel or over a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[repr(u8)]
pub enum TransportType {
    Rail = 0,
    Road = 1,
    Water = 2,
    Air = 3,
}

impl TransportType {
    #[inline]
    pub(crate) fn from_bits(bits: u32) -> TransportType {
        match bits {
            0 => TransportType::Rail,
            1 => TransportType::Road,
            2 => TransportType::Water,
            3 => TransportType::Air,
            _ => unreachable!("invalid transport type bits: {bits}"),
        }
    }
}

/// Rail type table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct RailTypeId(pub u8);

/// Road type table index. [`RoadTypeId::INVALID`] encodes an absent lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct RoadTypeId(pub u8);

impl RoadTypeId {
    pub const INVALID: RoadTypeId = RoadTypeId(0xFF);
}

/// The world map: both record arrays plus the grid dimensions.
///
/// Dimensions are powers of two, fixed for the lifetime of the map.
/// Records are allocated once here and mutated in place from then on;
/// removing a feature re-encodes its tiles, it never frees anything.
#[derive(Resource, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct WorldMap {
    tiles: Vec<Tile>,
    ext: Vec<TileExt>,
    size_x: u32,
    size_y: u32,
    log_x: u32,
}

impl WorldMap {
    /// Allocate a zeroed map and void out the border rim.
    ///
    /// Panics if either dimension is not a power of two inside
    /// [`MIN_MAP_SIZE`]..=[`MAX_MAP_SIZE`].
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width.is_power_of_two() && height.is_power_of_two(),
            "map dimensions must be powers of two, got {width}x{height}"
        );
        assert!(
            (MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&width)
                && (MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&height),
            "map dimensions must be within {MIN_MAP_SIZE}..={MAX_MAP_SIZE}, got {width}x{height}"
        );

        let count = (width * height) as usize;
        let mut map = Self {
            tiles: vec![Tile::default(); count],
            ext: vec![TileExt::default(); count],
            size_x: width,
            size_y: height,
            log_x: width.trailing_zeros(),
        };

        for y in 0..height {
            for x in 0..width {
                let on_rim = x < VOID_BORDER
                    || y < VOID_BORDER
                    || x >= width - VOID_BORDER
                    || y >= height - VOID_BORDER;
                if on_rim {
                    let t = map.tile_xy(x, y);
                    make_void(&mut map, t);
                }
            }
        }
        map
    }

    /// Replace this map with a freshly allocated one ("new map loaded").
    pub fn reset(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size_x
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size_y
    }

    /// Explicit bound for directional end-finding scans: no well-formed
    /// structure is longer than the map edge.
    #[inline]
    pub fn scan_bound(&self) -> u32 {
        self.size_x.max(self.size_y)
    }

    // -----------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------

    #[inline]
    pub fn tile_xy(&self, x: u32, y: u32) -> TileIndex {
        tile_assert!(
            x < self.size_x && y < self.size_y,
            "tile ({x},{y}) outside {}x{} map",
            self.size_x,
            self.size_y
        );
        TileIndex((y << self.log_x) | x)
    }

    #[inline]
    pub fn tile_x(&self, t: TileIndex) -> u32 {
        t.0 & (self.size_x - 1)
    }

    #[inline]
    pub fn tile_y(&self, t: TileIndex) -> u32 {
        t.0 >> self.log_x
    }

    #[inline]
    pub fn is_valid_tile(&self, t: TileIndex) -> bool {
        t.index() < self.tiles.len()
    }

    /// Linear-index delta for one step in `dir`, consistent with the
    /// row-major linearization. Raw deltas can wrap across rows; prefer
    /// [`WorldMap::add_dir`] unless the caller bounds the walk itself.
    #[inline]
    pub fn tile_offset(&self, dir: DiagDirection) -> i32 {
        let (dx, dy) = dir.offset();
        dy * self.size_x as i32 + dx
    }

    /// Step one tile in `dir`. Returns `None` when the step would leave
    /// the grid, instead of wrapping to the next row.
    #[inline]
    pub fn add_dir(&self, t: TileIndex, dir: DiagDirection) -> Option<TileIndex> {
        let (dx, dy) = dir.offset();
        let x = self.tile_x(t) as i32 + dx;
        let y = self.tile_y(t) as i32 + dy;
        if x < 0 || y < 0 || x >= self.size_x as i32 || y >= self.size_y as i32 {
            return None;
        }
        Some(self.tile_xy(x as u32, y as u32))
    }

    // -----------------------------------------------------------------
    // Raw record access (crate-internal: all interpretation goes through
    // the typed accessor modules)
    // -----------------------------------------------------------------

    #[inline]
    pub(crate) fn tile(&self, t: TileIndex) -> &Tile {
        tile_assert!(self.is_valid_tile(t), "invalid tile {:?}", t);
        &self.tiles[t.index()]
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, t: TileIndex) -> &mut Tile {
        tile_assert!(self.is_valid_tile(t), "invalid tile {:?}", t);
        &mut self.tiles[t.index()]
    }

    #[inline]
    pub(crate) fn ext(&self, t: TileIndex) -> &TileExt {
        tile_assert!(self.is_valid_tile(t), "invalid tile {:?}", t);
        &self.ext[t.index()]
    }

    #[inline]
    pub(crate) fn ext_mut(&mut self, t: TileIndex) -> &mut TileExt {
        tile_assert!(self.is_valid_tile(t), "invalid tile {:?}", t);
        &mut self.ext[t.index()]
    }

    // -----------------------------------------------------------------
    // Discriminant
    // -----------------------------------------------------------------

    #[inline]
    pub fn tile_type(&self, t: TileIndex) -> TileType {
        TileType::from_bits(get_bits(self.tile(t).kind, TYPE_OFFSET, TILE_TYPE_BITS))
    }

    /// Write the discriminant. The bridge-above flags in the same byte are
    /// left untouched.
    #[inline]
    pub fn set_tile_type(&mut self, t: TileIndex, ty: TileType) {
        set_bits(
            &mut self.tile_mut(t).kind,
            TYPE_OFFSET,
            TILE_TYPE_BITS,
            ty as u32,
        );
    }

    #[inline]
    pub fn is_tile_type(&self, t: TileIndex, ty: TileType) -> bool {
        self.tile_type(t) == ty
    }

    // -----------------------------------------------------------------
    // Fields shared by every tile kind
    // -----------------------------------------------------------------

    #[inline]
    pub fn owner(&self, t: TileIndex) -> Owner {
        Owner(get_bits(self.tile(t).m1, 0, 5) as u8)
    }

    #[inline]
    pub fn set_owner(&mut self, t: TileIndex, owner: Owner) {
        set_bits(&mut self.tile_mut(t).m1, 0, 5, owner.0 as u32);
    }

    /// Tile elevation in height units.
    #[inline]
    pub fn tile_z(&self, t: TileIndex) -> u8 {
        self.tile(t).height
    }

    #[inline]
    pub fn set_tile_z(&mut self, t: TileIndex, z: u8) {
        self.tile_mut(t).height = z;
    }
}
