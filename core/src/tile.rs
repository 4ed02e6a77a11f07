use crate::*;

/// Extra background magnification, in percent, so adjacent tiles overlap by a
/// hair and no sub-pixel seam shows between them.
pub const SEAM_EPSILON_PCT: f32 = 0.5;

/// Maps a tile's original index to its `(col, row)` in the source photo.
pub const fn tile_source_position(original_index: TileIndex, grid_width: GridWidth) -> (u8, u8) {
    (original_index % grid_width, original_index / grid_width)
}

/// Background offset for a tile, as CSS `background-position` percentages.
/// For a 3-wide grid the axes land on 0%, 50% and 100%.
pub fn background_offset_pct(original_index: TileIndex, grid_width: GridWidth) -> (f32, f32) {
    let (col, row) = tile_source_position(original_index, grid_width);
    let step = 100.0 / (grid_width as f32 - 1.0);
    (col as f32 * step, row as f32 * step)
}

/// Background magnification so each tile shows only its own 1/width^2 region
/// of the photo.
pub fn background_size_pct(grid_width: GridWidth) -> f32 {
    grid_width as f32 * 100.0 + SEAM_EPSILON_PCT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_position_walks_the_grid_row_major() {
        assert_eq!(tile_source_position(0, 3), (0, 0));
        assert_eq!(tile_source_position(2, 3), (2, 0));
        assert_eq!(tile_source_position(3, 3), (0, 1));
        assert_eq!(tile_source_position(4, 3), (1, 1));
        assert_eq!(tile_source_position(8, 3), (2, 2));
        assert_eq!(tile_source_position(5, 4), (1, 1));
    }

    #[test]
    fn offsets_land_on_even_percent_steps() {
        assert_eq!(background_offset_pct(0, 3), (0.0, 0.0));
        assert_eq!(background_offset_pct(4, 3), (50.0, 50.0));
        assert_eq!(background_offset_pct(8, 3), (100.0, 100.0));
        assert_eq!(background_offset_pct(1, 2), (100.0, 0.0));
    }

    #[test]
    fn magnification_covers_the_grid_plus_seam_epsilon() {
        assert_eq!(background_size_pct(3), 300.5);
        assert_eq!(background_size_pct(4), 400.5);
    }
}
