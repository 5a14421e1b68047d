use tilespace_common::{PixelRect, TileRect};

/// A half-open range of chunk indices to draw, clamped to the chunk array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start_x: u32,
    pub start_y: u32,
    /// Exclusive.
    pub end_x: u32,
    /// Exclusive.
    pub end_y: u32,
}

impl ChunkRange {
    pub fn is_empty(&self) -> bool {
        self.start_x >= self.end_x || self.start_y >= self.end_y
    }

    /// Number of chunks covered.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.end_x - self.start_x) as usize) * ((self.end_y - self.start_y) as usize)
    }
}

/// Map an inclusive tile-space viewport to the chunk indices to draw.
///
/// The trailing edge rounds conservatively (`max / chunk_size + 1`, exclusive)
/// so a partially visible chunk at the viewport's far edge is never skipped;
/// at worst one extra off-screen chunk row/column is drawn. The range is
/// clamped to the chunk array bounds, so any viewport is safe to pass.
pub fn visible_chunks(
    view: TileRect,
    chunk_size: u32,
    chunk_count_x: u32,
    chunk_count_y: u32,
) -> ChunkRange {
    ChunkRange {
        start_x: (view.min_x / chunk_size).min(chunk_count_x),
        start_y: (view.min_y / chunk_size).min(chunk_count_y),
        end_x: (view.max_x / chunk_size + 1).min(chunk_count_x),
        end_y: (view.max_y / chunk_size + 1).min(chunk_count_y),
    }
}

/// Convert a pixel-space visible rectangle into the inclusive tile rectangle
/// it covers, clamped to the grid extent.
///
/// This is the boundary between camera space and the tile cache: the camera
/// supplies pixels, the render path consumes tiles.
pub fn tile_rect_from_pixels(
    view: PixelRect,
    tile_size: u32,
    grid_width: u32,
    grid_height: u32,
) -> TileRect {
    let ts = tile_size as f32;
    let last_x = grid_width.saturating_sub(1);
    let last_y = grid_height.saturating_sub(1);

    // Negative-coordinate space clamps to the first tile; a `right` edge
    // exactly on a tile boundary does not pull in the next tile.
    let min_x = ((view.x / ts).floor().max(0.0) as u32).min(last_x);
    let min_y = ((view.y / ts).floor().max(0.0) as u32).min(last_y);
    let max_x = (((view.right() / ts).ceil().max(1.0) as u32) - 1).min(last_x);
    let max_y = (((view.bottom() / ts).ceil().max(1.0) as u32) - 1).min(last_y);

    TileRect::new(min_x, min_y, max_x.max(min_x), max_y.max(min_y))
}
