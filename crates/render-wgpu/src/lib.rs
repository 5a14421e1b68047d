//! wgpu render backend for the chunked tile map.
//!
//! # Invariants
//! - The backend never touches tile data; it consumes batched quad geometry
//!   collected through the `RenderTarget` seam.
//! - One vertex upload and one render pass per frame, one draw call per
//!   contiguous run of same-texture submissions.

mod batch;
mod camera;
mod gpu;
mod shaders;

pub use batch::{DrawRange, FrameBatch};
pub use camera::Camera2d;
pub use gpu::WgpuTileRenderer;

pub fn crate_info() -> &'static str {
    "tilespace-render-wgpu v0.1.0"
}
