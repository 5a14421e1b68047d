use serde::{Deserialize, Serialize};
use tilespace_common::Tile;

/// Fixed-size 2D tile storage covering the full authored map extent.
///
/// The grid owns no rendering state. Chunks re-scan their sub-rectangle of
/// this storage on rebuild; the owning map routes writes here and
/// dirty-marks the affected chunk itself — the grid knows nothing about
/// chunking.
///
/// Coordinates are asserted in-bounds: an out-of-range access is a caller
/// contract violation and fails fast rather than corrupting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    /// Row-major: index = y * width + x.
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid of the given extent with every cell empty.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        Self {
            width,
            height,
            tiles: vec![Tile::EMPTY; (width as usize) * (height as usize)],
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "tile ({x},{y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Read the tile at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Tile {
        self.tiles[self.index(x, y)]
    }

    /// Store `tile` at `(x, y)`. No side effect on geometry; the caller is
    /// responsible for invalidating the owning chunk.
    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }
}
