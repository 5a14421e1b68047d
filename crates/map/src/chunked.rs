use tilespace_common::{AtlasError, AtlasLayout, AtlasTexture, ChunkCoord, PixelRect, Tile, TileRect};
use tilespace_render::RenderTarget;

use crate::chunk::{Chunk, MapLayout};
use crate::grid::TileGrid;
use crate::view::visible_chunks;

/// Chunk edge length, in tiles, when none is specified.
pub const DEFAULT_CHUNK_SIZE: u32 = 32;

/// Errors from map construction.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("chunk size must be nonzero")]
    ZeroChunkSize,
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}

/// Instrumentation for one render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Chunks submitted to the target.
    pub chunks_drawn: usize,
    /// Chunks that were dirty and rebuilt before drawing.
    pub chunks_rebuilt: usize,
    /// Quads across all submissions.
    pub quads: usize,
    /// Vertices across all submissions (4 per quad).
    pub vertices: usize,
}

/// A tile map partitioned into fixed-size chunks with cached geometry.
///
/// Owns the tile grid and the chunk array. Writes route through [`set`],
/// which dirty-marks exactly the owning chunk; [`render`] draws only the
/// chunks intersecting the viewport, lazily rebuilding dirty ones.
///
/// Built for very large, mostly static maps: steady-state rendering touches
/// no tile data at all, only cached buffers.
///
/// [`set`]: ChunkedTileMap::set
/// [`render`]: ChunkedTileMap::render
#[derive(Debug)]
pub struct ChunkedTileMap {
    grid: TileGrid,
    /// Row-major: index = cy * chunk_count_x + cx. Fixed topology.
    chunks: Vec<Chunk>,
    chunk_count_x: u32,
    chunk_count_y: u32,
    layout: MapLayout,
}

impl ChunkedTileMap {
    /// Create a map with the default chunk size of 32 tiles.
    pub fn new(
        width: u32,
        height: u32,
        texture: Option<AtlasTexture>,
        tile_size: u32,
    ) -> Result<Self, MapError> {
        Self::with_chunk_size(width, height, texture, tile_size, DEFAULT_CHUNK_SIZE)
    }

    /// Create a map with an explicit chunk size.
    ///
    /// Every chunk is constructed eagerly, including one extra row and
    /// column past the exact extent: the trailing chunks clip to an empty
    /// rectangle and cache zero vertices, a small fixed overhead that keeps
    /// the conservative render-range rounding in bounds.
    pub fn with_chunk_size(
        width: u32,
        height: u32,
        texture: Option<AtlasTexture>,
        tile_size: u32,
        chunk_size: u32,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::ZeroDimension { width, height });
        }
        if chunk_size == 0 {
            return Err(MapError::ZeroChunkSize);
        }
        let atlas = AtlasLayout::for_texture(texture, tile_size)?;

        let chunk_count_x = width / chunk_size + 1;
        let chunk_count_y = height / chunk_size + 1;
        let mut chunks = Vec::with_capacity((chunk_count_x * chunk_count_y) as usize);
        for cy in 0..chunk_count_y {
            for cx in 0..chunk_count_x {
                chunks.push(Chunk::new(ChunkCoord::new(cx, cy)));
            }
        }

        tracing::debug!(
            width,
            height,
            tile_size,
            chunk_size,
            chunk_count_x,
            chunk_count_y,
            "constructed chunked tile map"
        );

        Ok(Self {
            grid: TileGrid::new(width, height),
            chunks,
            chunk_count_x,
            chunk_count_y,
            layout: MapLayout {
                tile_size,
                chunk_size,
                atlas,
                texture: texture.map(|t| t.id),
            },
        })
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.layout.tile_size
    }

    /// Chunk edge length in tiles.
    pub fn chunk_size(&self) -> u32 {
        self.layout.chunk_size
    }

    /// Chunk array dimensions (`extent / chunk_size + 1` per axis).
    pub fn chunk_counts(&self) -> (u32, u32) {
        (self.chunk_count_x, self.chunk_count_y)
    }

    /// The atlas layout computed at construction.
    pub fn atlas(&self) -> AtlasLayout {
        self.layout.atlas
    }

    /// Read-only access to the backing grid (for export and inspection).
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    fn chunk_index(&self, cx: u32, cy: u32) -> usize {
        debug_assert!(cx < self.chunk_count_x && cy < self.chunk_count_y);
        (cy as usize) * (self.chunk_count_x as usize) + (cx as usize)
    }

    /// Read the tile at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Tile {
        self.grid.get(x, y)
    }

    /// Write a tile and invalidate exactly the chunk that owns it.
    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        self.grid.set(x, y, tile);
        let cx = x / self.layout.chunk_size;
        let cy = y / self.layout.chunk_size;
        tracing::trace!(x, y, chunk_x = cx, chunk_y = cy, "tile write invalidates chunk");
        let i = self.chunk_index(cx, cy);
        self.chunks[i].mark_dirty();
    }

    /// Whether the chunk at `coord` has stale cached geometry.
    pub fn is_chunk_dirty(&self, coord: ChunkCoord) -> bool {
        self.chunks[self.chunk_index(coord.x, coord.y)].is_dirty()
    }

    /// Cached vertex count for the chunk at `coord`.
    pub fn chunk_vertex_count(&self, coord: ChunkCoord) -> usize {
        self.chunks[self.chunk_index(coord.x, coord.y)].vertex_count()
    }

    /// Number of chunks currently flagged dirty.
    pub fn dirty_chunk_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_dirty()).count()
    }

    /// Draw every chunk intersecting the inclusive tile-space viewport.
    ///
    /// Dirty chunks rebuild synchronously before their draw, so a `set`
    /// followed by a `render` covering that tile always observes the new
    /// value. The chunk range rounds conservatively at the trailing edge and
    /// is clamped to the chunk array.
    pub fn render(&mut self, target: &mut dyn RenderTarget, view: TileRect) -> RenderStats {
        let _span = tracing::info_span!("map_render").entered();
        let range = visible_chunks(
            view,
            self.layout.chunk_size,
            self.chunk_count_x,
            self.chunk_count_y,
        );

        let mut stats = RenderStats::default();
        for cy in range.start_y..range.end_y {
            for cx in range.start_x..range.end_x {
                let i = (cy as usize) * (self.chunk_count_x as usize) + (cx as usize);
                let chunk = &mut self.chunks[i];
                if chunk.is_dirty() {
                    stats.chunks_rebuilt += 1;
                }
                chunk.draw(&self.grid, &self.layout, target);
                stats.chunks_drawn += 1;
                stats.vertices += chunk.vertex_count();
            }
        }
        stats.quads = stats.vertices / 4;

        tracing::trace!(
            drawn = stats.chunks_drawn,
            rebuilt = stats.chunks_rebuilt,
            quads = stats.quads,
            "render complete"
        );
        stats
    }

    /// Whether the pixel-space rectangle overlaps no solid tile.
    ///
    /// Space outside the grid counts as free; a `right`/`bottom` edge exactly
    /// on a tile boundary does not touch the next tile.
    pub fn place_free(&self, rect: PixelRect) -> bool {
        let ts = self.layout.tile_size as f32;
        let start_x = (rect.x / ts).floor().max(0.0) as u32;
        let start_y = (rect.y / ts).floor().max(0.0) as u32;
        let end_x = ((rect.right() / ts).ceil().max(0.0) as u32).min(self.grid.width());
        let end_y = ((rect.bottom() / ts).ceil().max(0.0) as u32).min(self.grid.height());

        for y in start_y..end_y {
            for x in start_x..end_x {
                if self.grid.get(x, y).solid {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilespace_common::TextureId;
    use tilespace_render::RecordingTarget;

    /// 16px-wide, 2-column atlas used across these tests.
    fn atlas_16x16() -> Option<AtlasTexture> {
        Some(AtlasTexture::new(TextureId(7), 16, 16))
    }

    fn map_64(chunk_size: u32) -> ChunkedTileMap {
        ChunkedTileMap::with_chunk_size(64, 64, atlas_16x16(), 8, chunk_size).unwrap()
    }

    #[test]
    fn chunk_array_has_one_extra_row_and_column() {
        // 100 tiles / 32 per chunk -> 3, plus the extra column -> 4.
        let map = ChunkedTileMap::with_chunk_size(100, 100, atlas_16x16(), 8, 32).unwrap();
        assert_eq!(map.chunk_counts(), (4, 4));

        // Exact division still allocates the extra.
        let map = ChunkedTileMap::with_chunk_size(64, 64, atlas_16x16(), 8, 32).unwrap();
        assert_eq!(map.chunk_counts(), (3, 3));
    }

    #[test]
    fn every_chunk_starts_dirty() {
        let map = map_64(32);
        assert_eq!(map.dirty_chunk_count(), 9);
        assert!(map.is_chunk_dirty(ChunkCoord::new(0, 0)));
        assert!(map.is_chunk_dirty(ChunkCoord::new(2, 2)));
    }

    #[test]
    fn set_marks_exactly_one_chunk_dirty() {
        let mut map = map_64(32);
        let mut target = RecordingTarget::new();
        // Clean everything first, including the trailing chunk row/column
        // (a view past the map is clamped, never out of range).
        map.render(&mut target, TileRect::new(0, 0, 95, 95));
        assert_eq!(map.dirty_chunk_count(), 0);

        map.set(33, 5, Tile::new(1, false));

        assert_eq!(map.dirty_chunk_count(), 1);
        let (ccx, ccy) = map.chunk_counts();
        for cy in 0..ccy {
            for cx in 0..ccx {
                let expect = cx == 1 && cy == 0;
                assert_eq!(map.is_chunk_dirty(ChunkCoord::new(cx, cy)), expect);
            }
        }
    }

    #[test]
    fn render_observes_preceding_write() {
        let mut map = map_64(32);
        let mut target = RecordingTarget::new();
        map.render(&mut target, TileRect::covering(64, 64));

        map.set(5, 5, Tile::new(2, false));
        target.clear();
        let stats = map.render(&mut target, TileRect::covering(64, 64));

        assert_eq!(stats.chunks_rebuilt, 1);
        assert_eq!(stats.quads, 1);
        assert_eq!(map.chunk_vertex_count(ChunkCoord::new(0, 0)), 4);
    }

    #[test]
    fn scenario_full_render_of_single_tile_map() {
        // 64x64 grid, chunk 32, tile 8, tile (5,5) index 2, atlas 16px wide.
        let mut map = map_64(32);
        map.set(5, 5, Tile::new(2, false));
        assert!(map.is_chunk_dirty(ChunkCoord::new(0, 0)));

        let mut target = RecordingTarget::new();
        let stats = map.render(&mut target, TileRect::covering(64, 64));

        assert_eq!(map.chunk_vertex_count(ChunkCoord::new(0, 0)), 4);
        assert_eq!(stats.vertices, 4);
        let call = target
            .calls()
            .iter()
            .find(|c| !c.vertices.is_empty())
            .unwrap();
        assert_eq!(call.texture, Some(TextureId(7)));
        assert_eq!(call.vertices[0].position, [40.0, 40.0]);
        assert_eq!(call.vertices[2].position, [48.0, 48.0]);
        assert_eq!(call.vertices[0].tex_coords, [0.0, 8.0]);
        assert_eq!(call.vertices[2].tex_coords, [8.0, 16.0]);
    }

    #[test]
    fn render_draws_one_call_per_chunk_in_view() {
        let mut map = map_64(32);
        let mut target = RecordingTarget::new();
        // View covering only the first chunk row: tiles y in 0..=10.
        let stats = map.render(&mut target, TileRect::new(0, 0, 63, 10));

        // 2 chunk columns x 1 chunk row (max_x 63 -> end_x = 2, max_y 10 ->
        // end_y = 1); the trailing over-allocated column is out of view.
        assert_eq!(stats.chunks_drawn, 2);
        assert_eq!(target.calls().len(), 2);
    }

    #[test]
    fn clean_chunks_are_not_rebuilt_again() {
        let mut map = map_64(32);
        let mut target = RecordingTarget::new();
        let first = map.render(&mut target, TileRect::covering(64, 64));
        assert_eq!(first.chunks_rebuilt, first.chunks_drawn);

        let second = map.render(&mut target, TileRect::covering(64, 64));
        assert_eq!(second.chunks_rebuilt, 0);
        assert_eq!(second.chunks_drawn, first.chunks_drawn);
    }

    #[test]
    fn unrendered_chunk_stays_dirty() {
        let mut map = map_64(32);
        let mut target = RecordingTarget::new();
        // Render only the top-left chunk.
        map.render(&mut target, TileRect::new(0, 0, 10, 10));
        assert!(!map.is_chunk_dirty(ChunkCoord::new(0, 0)));
        assert!(map.is_chunk_dirty(ChunkCoord::new(1, 1)));
    }

    #[test]
    fn oversized_index_renders_nothing_without_error() {
        let mut map = map_64(32);
        map.set(3, 3, Tile::new(999, false));

        let mut target = RecordingTarget::new();
        let stats = map.render(&mut target, TileRect::covering(64, 64));
        assert_eq!(stats.vertices, 0);
    }

    #[test]
    fn vertex_count_matches_non_empty_tiles() {
        let mut map = map_64(32);
        // 5 valid tiles, 1 oversized, inside chunk (0,0).
        for i in 0..5u32 {
            map.set(i, 0, Tile::new(i % 4, false));
        }
        map.set(5, 0, Tile::new(42, false));

        let mut target = RecordingTarget::new();
        map.render(&mut target, TileRect::covering(64, 64));
        assert_eq!(map.chunk_vertex_count(ChunkCoord::new(0, 0)), 20);
    }

    #[test]
    fn construction_validation() {
        assert!(matches!(
            ChunkedTileMap::new(0, 10, atlas_16x16(), 8),
            Err(MapError::ZeroDimension { .. })
        ));
        assert!(matches!(
            ChunkedTileMap::with_chunk_size(10, 10, atlas_16x16(), 8, 0),
            Err(MapError::ZeroChunkSize)
        ));
        assert!(matches!(
            ChunkedTileMap::new(10, 10, atlas_16x16(), 0),
            Err(MapError::Atlas(AtlasError::ZeroTileSize))
        ));
    }

    #[test]
    fn untextured_map_renders_flat_quads() {
        let mut map = ChunkedTileMap::with_chunk_size(16, 16, None, 8, 16).unwrap();
        map.set(0, 0, Tile::new(12345, false));

        let mut target = RecordingTarget::new();
        let stats = map.render(&mut target, TileRect::covering(16, 16));
        assert_eq!(stats.quads, 1);
        assert!(target.calls().iter().all(|c| c.texture.is_none()));
    }

    #[test]
    fn place_free_detects_solid_overlap() {
        let mut map = map_64(32);
        map.set(2, 2, Tile::new(0, true));

        // Fully inside the solid tile (16..24 px square at tile 8px).
        assert!(!map.place_free(PixelRect::new(17.0, 17.0, 4.0, 4.0)));
        // Overlapping its edge.
        assert!(!map.place_free(PixelRect::new(12.0, 18.0, 6.0, 2.0)));
        // Touching the boundary exactly is free.
        assert!(map.place_free(PixelRect::new(8.0, 16.0, 8.0, 8.0)));
        // Far away.
        assert!(map.place_free(PixelRect::new(400.0, 400.0, 8.0, 8.0)));
    }

    #[test]
    fn place_free_ignores_non_solid_tiles() {
        let mut map = map_64(32);
        map.set(2, 2, Tile::new(0, false));
        assert!(map.place_free(PixelRect::new(16.0, 16.0, 8.0, 8.0)));
    }

    #[test]
    fn place_free_outside_grid_is_free() {
        let map = map_64(32);
        assert!(map.place_free(PixelRect::new(-50.0, -50.0, 10.0, 10.0)));
        assert!(map.place_free(PixelRect::new(10_000.0, 0.0, 10.0, 10.0)));
    }
}
