/// Minimum edge length of a map. Power of two.
pub const MIN_MAP_SIZE: u32 = 64;
/// Maximum edge length of a map. Power of two.
pub const MAX_MAP_SIZE: u32 = 4096;

pub const DEFAULT_MAP_WIDTH: u32 = 256;
pub const DEFAULT_MAP_HEIGHT: u32 = 256;

/// Width of the void rim around the playable area, in tiles. Directional
/// scans terminate on these tiles instead of wrapping to the next row.
pub const VOID_BORDER: u32 = 1;

/// Width of the tile type discriminant bit range.
pub const TILE_TYPE_BITS: u32 = 4;
