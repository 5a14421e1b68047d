use tilespace_common::TextureId;
use tilespace_render::{RenderTarget, TileVertex};

/// One contiguous run of quads sharing a texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub texture: Option<TextureId>,
    /// First vertex in the frame's vertex buffer.
    pub start: u32,
    /// Vertex count; always a multiple of 4.
    pub count: u32,
}

/// Frame-local geometry accumulator.
///
/// The map submits one cached buffer per chunk; the batch concatenates them
/// into a single vertex vec with per-run draw ranges so the GPU sees one
/// upload per frame. Consecutive submissions with the same texture merge
/// into one range (the common case: every chunk of a map shares the atlas).
///
/// Clear between frames; allocations are retained.
#[derive(Debug, Default)]
pub struct FrameBatch {
    vertices: Vec<TileVertex>,
    draws: Vec<DrawRange>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices collected this frame, in submission order.
    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    /// Draw ranges into [`FrameBatch::vertices`], in submission order.
    pub fn draws(&self) -> &[DrawRange] {
        &self.draws
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

impl RenderTarget for FrameBatch {
    fn draw_quads(&mut self, texture: Option<TextureId>, vertices: &[TileVertex]) {
        // Empty chunks (clipped or all-empty tiles) produce no draw.
        if vertices.is_empty() {
            return;
        }
        let start = self.vertices.len() as u32;
        let count = vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);

        match self.draws.last_mut() {
            Some(last) if last.texture == texture && last.start + last.count == start => {
                last.count += count;
            }
            _ => self.draws.push(DrawRange {
                texture,
                start,
                count,
            }),
        }
    }
}
