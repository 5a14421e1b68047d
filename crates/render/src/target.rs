use bytemuck::{Pod, Zeroable};
use tilespace_common::TextureId;

/// One corner of a rendered tile quad.
///
/// Position and texture coordinates are both in pixel space. The backend's
/// view transform and atlas dimensions normalize them at draw time.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl TileVertex {
    pub fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coords: [u, v],
        }
    }
}

/// An opaque geometry sink fed by the chunked tile map.
///
/// One call per chunk per frame. `vertices.len()` is always a multiple of
/// four; each consecutive group of four is one quad wound top-left,
/// top-right, bottom-right, bottom-left.
pub trait RenderTarget {
    /// Submit one batched quad buffer bound to `texture` (`None` for
    /// untextured, solid-color rendering).
    fn draw_quads(&mut self, texture: Option<TextureId>, vertices: &[TileVertex]);
}

/// A single recorded submission.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub texture: Option<TextureId>,
    pub vertices: Vec<TileVertex>,
}

/// Render target that records every submission.
///
/// The headless counterpart to a GPU backend: tests and the CLI inspect what
/// the map would have drawn without a device.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    calls: Vec<DrawCall>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// All submissions since the last clear, in draw order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Total vertices across all recorded calls.
    pub fn vertex_count(&self) -> usize {
        self.calls.iter().map(|c| c.vertices.len()).sum()
    }

    /// Total quads across all recorded calls.
    pub fn quad_count(&self) -> usize {
        self.vertex_count() / 4
    }
}

impl RenderTarget for RecordingTarget {
    fn draw_quads(&mut self, texture: Option<TextureId>, vertices: &[TileVertex]) {
        tracing::trace!(?texture, vertices = vertices.len(), "recorded draw");
        self.calls.push(DrawCall {
            texture,
            vertices: vertices.to_vec(),
        });
    }
}
