//! Shared types for the tilespace engine: tiles, coordinates, rectangles,
//! and the texture-atlas layout model.
//!
//! # Invariants
//! - Everything here is a plain value type; no grid or rendering state.
//! - Atlas math is the single source of truth for index -> cell mapping.

mod atlas;
mod types;

pub use atlas::{AtlasError, AtlasLayout};
pub use types::{AtlasTexture, ChunkCoord, PixelRect, TextureId, Tile, TileRect};

pub fn crate_info() -> &'static str {
    "tilespace-common v0.1.0"
}
