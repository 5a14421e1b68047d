use tilespace_common::{AtlasLayout, ChunkCoord, TextureId, Tile};
use tilespace_render::{RenderTarget, TileVertex};

use crate::grid::TileGrid;

/// Shared map geometry handed to every chunk at draw time: cell sizes plus
/// the atlas binding. Owned by the map; chunks never copy it.
#[derive(Debug, Clone, Copy)]
pub struct MapLayout {
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Chunk edge length in tiles.
    pub chunk_size: u32,
    /// Index -> atlas cell mapping.
    pub atlas: AtlasLayout,
    /// Texture bound to every chunk submission; `None` renders untextured.
    pub texture: Option<TextureId>,
}

/// One fixed-size partition of the grid with its own cached geometry.
///
/// A chunk holds no tile data. When dirty it re-scans its clipped
/// sub-rectangle of the shared grid and rebuilds the quad buffer; the grid
/// reference is passed in by the owning map at draw time.
///
/// `dirty == false` guarantees the cached buffer exactly reflects that
/// sub-rectangle as of the last rebuild.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    dirty: bool,
    vertices: Vec<TileVertex>,
}

impl Chunk {
    /// A fresh chunk starts dirty: no geometry exists until the first draw.
    pub(crate) fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            dirty: true,
            vertices: Vec::new(),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the cached buffer as stale. Idempotent; the rebuild itself is
    /// deferred to the next draw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Vertices currently cached (4 per non-empty tile after a rebuild).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Draw the chunk: rebuild first if dirty, then submit the cached buffer
    /// as one batched call bound to the shared texture.
    pub(crate) fn draw(
        &mut self,
        grid: &TileGrid,
        layout: &MapLayout,
        target: &mut dyn RenderTarget,
    ) {
        if self.dirty {
            self.rebuild(grid, layout);
        }
        target.draw_quads(layout.texture, &self.vertices);
    }

    /// Re-scan the chunk's clipped tile rectangle and build a fresh buffer.
    ///
    /// The new buffer is fully constructed before it replaces the old one,
    /// so a half-built buffer is never observable.
    pub(crate) fn rebuild(&mut self, grid: &TileGrid, layout: &MapLayout) {
        let ts = layout.tile_size;
        let start_x = self.coord.x * layout.chunk_size;
        let start_y = self.coord.y * layout.chunk_size;
        // The last chunk row/column clips to the grid's true extent; the
        // over-allocated trailing chunks clip to an empty rectangle.
        let end_x = (start_x + layout.chunk_size).min(grid.width());
        let end_y = (start_y + layout.chunk_size).min(grid.height());

        let mut vertices = Vec::new();
        for y in start_y..end_y {
            for x in start_x..end_x {
                let tile = grid.get(x, y);
                if tile.index == Tile::EMPTY_INDEX || !layout.atlas.contains(tile.index) {
                    continue;
                }

                let px = (x * ts) as f32;
                let py = (y * ts) as f32;
                let (u, v) = layout.atlas.cell_origin(tile.index, ts);
                let s = ts as f32;

                // One quad, wound top-left, top-right, bottom-right,
                // bottom-left; atlas rect follows the same winding.
                vertices.push(TileVertex::new(px, py, u, v));
                vertices.push(TileVertex::new(px + s, py, u + s, v));
                vertices.push(TileVertex::new(px + s, py + s, u + s, v + s));
                vertices.push(TileVertex::new(px, py + s, u, v + s));
            }
        }

        tracing::debug!(
            chunk = ?self.coord,
            quads = vertices.len() / 4,
            "rebuilt chunk geometry"
        );
        self.vertices = vertices;
        self.dirty = false;
    }

    #[cfg(test)]
    pub(crate) fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilespace_common::AtlasTexture;

    fn layout(tile_size: u32, chunk_size: u32, atlas_px: Option<(u32, u32)>) -> MapLayout {
        let texture = atlas_px.map(|(w, h)| AtlasTexture::new(TextureId(0), w, h));
        MapLayout {
            tile_size,
            chunk_size,
            atlas: AtlasLayout::for_texture(texture, tile_size).unwrap(),
            texture: texture.map(|t| t.id),
        }
    }

    #[test]
    fn new_chunk_starts_dirty_and_empty() {
        let chunk = Chunk::new(ChunkCoord::new(0, 0));
        assert!(chunk.is_dirty());
        assert_eq!(chunk.vertex_count(), 0);
    }

    #[test]
    fn rebuild_emits_four_vertices_per_tile() {
        let mut grid = TileGrid::new(8, 8);
        grid.set(1, 1, Tile::new(0, false));
        grid.set(2, 1, Tile::new(1, false));
        grid.set(7, 7, Tile::new(2, false));

        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.rebuild(&grid, &layout(8, 8, Some((16, 16))));

        assert!(!chunk.is_dirty());
        assert_eq!(chunk.vertex_count(), 12);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut grid = TileGrid::new(16, 16);
        grid.set(3, 4, Tile::new(1, false));
        grid.set(9, 2, Tile::new(3, true));

        let layout = layout(8, 16, Some((32, 32)));
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.rebuild(&grid, &layout);
        let first = chunk.vertices().to_vec();
        chunk.rebuild(&grid, &layout);

        assert_eq!(chunk.vertices(), first.as_slice());
    }

    #[test]
    fn scenario_single_tile_position_and_atlas_quad() {
        // 64x64 grid, chunk 32, tile 8, atlas 16px wide (2 columns).
        // Tile (5,5) index 2 -> atlas column 0, row 1.
        let mut grid = TileGrid::new(64, 64);
        grid.set(5, 5, Tile::new(2, false));

        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.rebuild(&grid, &layout(8, 32, Some((16, 16))));

        assert_eq!(chunk.vertex_count(), 4);
        let v = chunk.vertices();
        assert_eq!(v[0], TileVertex::new(40.0, 40.0, 0.0, 8.0));
        assert_eq!(v[1], TileVertex::new(48.0, 40.0, 8.0, 8.0));
        assert_eq!(v[2], TileVertex::new(48.0, 48.0, 8.0, 16.0));
        assert_eq!(v[3], TileVertex::new(40.0, 48.0, 0.0, 16.0));
    }

    #[test]
    fn index_past_atlas_produces_no_geometry() {
        // 16x16 atlas with 8px tiles holds indices 0..=3.
        let mut grid = TileGrid::new(8, 8);
        grid.set(0, 0, Tile::new(4, false));
        grid.set(1, 0, Tile::new(u32::MAX - 1, true));

        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.rebuild(&grid, &layout(8, 8, Some((16, 16))));

        assert_eq!(chunk.vertex_count(), 0);
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn unbounded_atlas_draws_any_index_except_sentinel() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(0, 0, Tile::new(5000, false));
        grid.set(1, 0, Tile::EMPTY);

        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.rebuild(&grid, &layout(8, 4, None));

        // The huge index renders (no atlas clipping); the sentinel does not.
        assert_eq!(chunk.vertex_count(), 4);
    }

    #[test]
    fn clipped_chunk_covers_grid_remainder() {
        // Grid 100 wide with chunk 32: chunk column 3 covers tiles [96,100).
        let mut grid = TileGrid::new(100, 100);
        for x in 90..100 {
            grid.set(x, 0, Tile::new(0, false));
        }

        let mut chunk = Chunk::new(ChunkCoord::new(3, 0));
        chunk.rebuild(&grid, &layout(8, 32, Some((16, 16))));

        // Only (96..100, 0) fall inside this chunk's rectangle.
        assert_eq!(chunk.vertex_count(), 16);
    }

    #[test]
    fn fully_out_of_bounds_chunk_is_empty() {
        let grid = TileGrid::new(64, 64);
        // Chunk (2,2) starts at tile 64, past the grid.
        let mut chunk = Chunk::new(ChunkCoord::new(2, 2));
        chunk.rebuild(&grid, &layout(8, 32, Some((16, 16))));
        assert_eq!(chunk.vertex_count(), 0);
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn mark_dirty_is_idempotent() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        let grid = TileGrid::new(4, 4);
        chunk.rebuild(&grid, &layout(8, 4, None));
        assert!(!chunk.is_dirty());
        chunk.mark_dirty();
        chunk.mark_dirty();
        assert!(chunk.is_dirty());
    }
}
