use serde::{Deserialize, Serialize};

use crate::types::AtlasTexture;

/// Errors from atlas layout computation.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("tile size must be nonzero")]
    ZeroTileSize,
    #[error("texture ({width}x{height}px) is smaller than one {tile_size}px tile")]
    TextureTooSmall {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

/// How tile indices map onto the shared atlas texture.
///
/// The atlas is a fixed grid of `tile_size`-square cells indexed row-major.
/// `Bounded` is the normal textured mode; `Unbounded` is the untextured
/// (solid-color) mode where every index is valid and cell coordinates are
/// meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtlasLayout {
    Bounded {
        /// Cells per atlas row: texture width / tile size.
        columns: u32,
        /// Largest index the atlas can represent. Tiles with a larger index
        /// are treated as empty and produce no geometry.
        last_index: u32,
    },
    Unbounded,
}

impl AtlasLayout {
    /// Compute the layout for a texture, or `Unbounded` when there is none.
    ///
    /// A texture that does not divide evenly simply loses its partial
    /// trailing row/column, matching integer-division layout.
    pub fn for_texture(
        texture: Option<AtlasTexture>,
        tile_size: u32,
    ) -> Result<Self, AtlasError> {
        if tile_size == 0 {
            return Err(AtlasError::ZeroTileSize);
        }
        let Some(texture) = texture else {
            return Ok(Self::Unbounded);
        };
        let columns = texture.width / tile_size;
        let rows = texture.height / tile_size;
        if columns == 0 || rows == 0 {
            return Err(AtlasError::TextureTooSmall {
                width: texture.width,
                height: texture.height,
                tile_size,
            });
        }
        Ok(Self::Bounded {
            columns,
            last_index: columns * rows - 1,
        })
    }

    /// Whether a tile index falls within the atlas.
    pub fn contains(&self, index: u32) -> bool {
        match *self {
            Self::Bounded { last_index, .. } => index <= last_index,
            Self::Unbounded => true,
        }
    }

    /// Top-left pixel of the atlas cell for a tile index.
    ///
    /// Callers must have checked [`AtlasLayout::contains`] first. In
    /// `Unbounded` mode there is no atlas, so the zero cell is returned.
    pub fn cell_origin(&self, index: u32, tile_size: u32) -> (f32, f32) {
        match *self {
            Self::Bounded { columns, .. } => (
                ((index % columns) * tile_size) as f32,
                ((index / columns) * tile_size) as f32,
            ),
            Self::Unbounded => (0.0, 0.0),
        }
    }
}
