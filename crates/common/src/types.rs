use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One cell of a tile grid.
///
/// A tile is a value: writes replace it, nothing mutates it in place. The
/// `index` selects a cell in the shared texture atlas; `solid` is consumed by
/// collision queries and is orthogonal to rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Atlas cell id, row-major. Indices past the end of the atlas produce
    /// no geometry.
    pub index: u32,
    /// Blocks movement for collision queries.
    pub solid: bool,
}

impl Tile {
    /// Sentinel index meaning "empty, no geometry". Larger than any index a
    /// real atlas can represent.
    pub const EMPTY_INDEX: u32 = u32::MAX;

    /// An empty, passable tile. The initial value of every grid cell.
    pub const EMPTY: Self = Self {
        index: Self::EMPTY_INDEX,
        solid: false,
    };

    pub fn new(index: u32, solid: bool) -> Self {
        Self { index, solid }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A 2D chunk coordinate, in chunk units (tile coordinate / chunk size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: u32,
    pub y: u32,
}

impl ChunkCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An inclusive rectangle in tile coordinates.
///
/// Both corners are part of the rectangle, so a single tile is
/// `min == max`. Used for viewports handed to the render path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl TileRect {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The rectangle covering a full `width x height` grid.
    pub fn covering(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width.saturating_sub(1),
            max_y: height.saturating_sub(1),
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// An axis-aligned rectangle in pixel space.
///
/// Used for camera viewports and collision queries against solid tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Opaque handle to a texture owned by a render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// A texture atlas as the map core sees it: an opaque handle plus pixel
/// dimensions. Loading and ownership of the actual texels belong to the
/// render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasTexture {
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl AtlasTexture {
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_is_empty() {
        let t = Tile::default();
        assert_eq!(t, Tile::EMPTY);
        assert_eq!(t.index, Tile::EMPTY_INDEX);
        assert!(!t.solid);
    }

    #[test]
    fn tile_rect_covering_is_inclusive() {
        let r = TileRect::covering(100, 50);
        assert_eq!(r.max_x, 99);
        assert_eq!(r.max_y, 49);
        assert!(r.contains(0, 0));
        assert!(r.contains(99, 49));
        assert!(!r.contains(100, 0));
    }

    #[test]
    fn tile_rect_single_tile() {
        let r = TileRect::new(5, 5, 5, 5);
        assert!(r.contains(5, 5));
        assert!(!r.contains(5, 6));
        assert!(!r.contains(4, 5));
    }

    #[test]
    fn pixel_rect_edges() {
        let r = PixelRect::new(8.0, 16.0, 32.0, 8.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 24.0);
        assert!(r.contains(Vec2::new(8.0, 16.0)));
        // Max edge is exclusive
        assert!(!r.contains(Vec2::new(40.0, 16.0)));
    }

    #[test]
    fn pixel_rect_center() {
        let r = PixelRect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(r.center(), Vec2::new(5.0, 10.0));
    }
}
