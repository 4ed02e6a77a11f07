/// Original tile index, i.e. the position a tile occupies in the solved photo.
pub type TileIndex = u8;

/// Index into the arrangement, i.e. a grid slot on screen.
pub type SlotIndex = u8;

/// Total number of tiles in a puzzle.
pub type TileCount = u8;

/// Number of tiles along one axis of the square grid.
pub type GridWidth = u8;
