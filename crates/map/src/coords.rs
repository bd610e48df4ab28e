//! Tile addressing primitives: the tile index newtype, grid axes and the
//! four diagonal directions used for traversal.
//!
//! A [`TileIndex`] is deliberately opaque: there is no arithmetic on it.
//! Stepping to a neighboring tile goes through `WorldMap::add_dir`, which
//! checks the destination against the grid bounds instead of silently
//! wrapping to the next row.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Identifies one cell of the rectangular world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct TileIndex(pub u32);

impl TileIndex {
    /// Sentinel for "no tile". Never valid on any map.
    pub const INVALID: TileIndex = TileIndex(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The two grid axes. X runs NE-SW, Y runs NW-SE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// The diagonal direction pointing toward the southern end of this axis.
    #[inline]
    pub const fn to_diag_dir(self) -> DiagDirection {
        match self {
            Axis::X => DiagDirection::SW,
            Axis::Y => DiagDirection::SE,
        }
    }
}

/// The four diagonal directions, one per edge of a (diamond-oriented) tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[repr(u8)]
pub enum DiagDirection {
    NE = 0, // (-1,  0)
    SE = 1, // ( 0, +1)
    SW = 2, // (+1,  0)
    NW = 3, // ( 0, -1)
}

impl DiagDirection {
    pub const ALL: [DiagDirection; 4] = [
        DiagDirection::NE,
        DiagDirection::SE,
        DiagDirection::SW,
        DiagDirection::NW,
    ];

    /// The (dx, dy) coordinate offset for one step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            DiagDirection::NE => (-1, 0),
            DiagDirection::SE => (0, 1),
            DiagDirection::SW => (1, 0),
            DiagDirection::NW => (0, -1),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> DiagDirection {
        match self {
            DiagDirection::NE => DiagDirection::SW,
            DiagDirection::SE => DiagDirection::NW,
            DiagDirection::SW => DiagDirection::NE,
            DiagDirection::NW => DiagDirection::SE,
        }
    }

    /// The axis this direction runs along.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            DiagDirection::NE | DiagDirection::SW => Axis::X,
            DiagDirection::SE | DiagDirection::NW => Axis::Y,
        }
    }

    /// Decode from the 2-bit direction field of a record.
    #[inline]
    pub fn from_bits(bits: u32) -> DiagDirection {
        match bits {
            0 => DiagDirection::NE,
            1 => DiagDirection::SE,
            2 => DiagDirection::SW,
            3 => DiagDirection::NW,
            _ => unreachable!("direction bits out of range: {bits}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_involution() {
        for dir in DiagDirection::ALL {
            assert_eq!(dir.reverse().reverse(), dir);
            assert_ne!(dir.reverse(), dir);
        }
    }

    #[test]
    fn test_reverse_negates_offset() {
        for dir in DiagDirection::ALL {
            let (dx, dy) = dir.offset();
            let (rx, ry) = dir.reverse().offset();
            assert_eq!((dx, dy), (-rx, -ry));
        }
    }

    #[test]
    fn test_axis_mapping() {
        assert_eq!(DiagDirection::NE.axis(), Axis::X);
        assert_eq!(DiagDirection::SW.axis(), Axis::X);
        assert_eq!(DiagDirection::SE.axis(), Axis::Y);
        assert_eq!(DiagDirection::NW.axis(), Axis::Y);
        for axis in Axis::ALL {
            assert_eq!(axis.to_diag_dir().axis(), axis);
        }
    }

    #[test]
    fn test_from_bits_roundtrip() {
        for dir in DiagDirection::ALL {
            assert_eq!(DiagDirection::from_bits(dir as u32), dir);
        }
    }
}
