//! Chunked tile map: a spatially-partitioned tile rendering cache.
//!
//! A large 2D tile grid is divided into fixed-size chunks, each caching a
//! batched quad buffer for its sub-rectangle. Tile writes dirty-mark the
//! owning chunk; a render request rebuilds only dirty chunks intersecting
//! the viewport and submits one draw per chunk.
//!
//! # Invariants
//! - A tile write invalidates exactly the chunk that owns it.
//! - A clean chunk's cached buffer exactly reflects its sub-rectangle of the
//!   grid as of the last rebuild.
//! - Chunk topology is fixed at construction; rendering never allocates or
//!   frees chunks.

mod chunk;
mod chunked;
mod grid;
mod view;

pub use chunk::{Chunk, MapLayout};
pub use chunked::{ChunkedTileMap, MapError, RenderStats, DEFAULT_CHUNK_SIZE};
pub use grid::TileGrid;
pub use view::{ChunkRange, tile_rect_from_pixels, visible_chunks};

pub fn crate_info() -> &'static str {
    "tilespace-map v0.1.0"
}
