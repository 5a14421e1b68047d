//! Rendering interface: batched quad geometry and the render target seam.
//!
//! # Invariants
//! - A render target is a sink: it never reaches back into grid state.
//! - Geometry arrives pre-batched, four vertices per quad, one submission
//!   per chunk.
//!
//! The trait is stable; backends (wgpu, recording, headless) implement it
//! without changing consumers.

mod target;

pub use target::{DrawCall, RecordingTarget, RenderTarget, TileVertex};

pub fn crate_info() -> &'static str {
    "tilespace-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
