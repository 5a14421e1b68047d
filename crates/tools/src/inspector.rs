use tilespace_common::ChunkCoord;
use tilespace_map::ChunkedTileMap;

/// Map inspector for developer tooling.
///
/// Provides read-only queries against the chunk cache for debugging,
/// profiling, and development UI.
pub struct MapInspector;

impl MapInspector {
    /// Produce a summary of the map's cache state.
    pub fn summary(map: &ChunkedTileMap) -> MapSummary {
        let (ccx, ccy) = map.chunk_counts();
        let mut cached_vertices = 0;
        for cy in 0..ccy {
            for cx in 0..ccx {
                cached_vertices += map.chunk_vertex_count(ChunkCoord::new(cx, cy));
            }
        }
        MapSummary {
            width: map.width(),
            height: map.height(),
            tile_size: map.tile_size(),
            chunk_size: map.chunk_size(),
            chunk_count_x: ccx,
            chunk_count_y: ccy,
            dirty_chunks: map.dirty_chunk_count(),
            cached_vertices,
        }
    }

    /// Inspect a single chunk's cache state.
    pub fn inspect_chunk(map: &ChunkedTileMap, coord: ChunkCoord) -> Option<ChunkInfo> {
        let (ccx, ccy) = map.chunk_counts();
        if coord.x >= ccx || coord.y >= ccy {
            return None;
        }
        Some(ChunkInfo {
            coord,
            dirty: map.is_chunk_dirty(coord),
            vertex_count: map.chunk_vertex_count(coord),
        })
    }

    /// List the coordinates of every dirty chunk, row-major.
    pub fn dirty_chunks(map: &ChunkedTileMap) -> Vec<ChunkCoord> {
        let (ccx, ccy) = map.chunk_counts();
        let mut dirty = Vec::new();
        for cy in 0..ccy {
            for cx in 0..ccx {
                let coord = ChunkCoord::new(cx, cy);
                if map.is_chunk_dirty(coord) {
                    dirty.push(coord);
                }
            }
        }
        dirty
    }
}

/// Summary of map cache state for the inspector.
#[derive(Debug, Clone)]
pub struct MapSummary {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub chunk_size: u32,
    pub chunk_count_x: u32,
    pub chunk_count_y: u32,
    pub dirty_chunks: usize,
    pub cached_vertices: usize,
}

impl std::fmt::Display for MapSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Map: {}x{} tiles ({}px), chunks {}x{} ({} tiles), dirty={} cached_vertices={}",
            self.width,
            self.height,
            self.tile_size,
            self.chunk_count_x,
            self.chunk_count_y,
            self.chunk_size,
            self.dirty_chunks,
            self.cached_vertices
        )
    }
}

/// Cache state of a single chunk.
#[derive(Debug, Clone)]
pub struct ChunkInfo {
    pub coord: ChunkCoord,
    pub dirty: bool,
    pub vertex_count: usize,
}

impl std::fmt::Display for ChunkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk ({}, {}): {} vertices{}",
            self.coord.x,
            self.coord.y,
            self.vertex_count,
            if self.dirty { " (dirty)" } else { "" }
        )
    }
}
