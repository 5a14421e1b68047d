use glam::{Mat4, Vec2};
use tilespace_common::{PixelRect, TileRect};
use tilespace_map::tile_rect_from_pixels;

/// 2D camera over the map's pixel space.
///
/// The camera is the sole supplier of the visible rectangle handed to the
/// tile cache; it lives outside the map core and owns no tile state.
/// Coordinates are y-down pixels, matching quad geometry.
pub struct Camera2d {
    /// Center of the view in map pixels.
    pub center: Vec2,
    /// Screen pixels per map pixel. 1.0 is native scale.
    pub zoom: f32,
    /// Output surface size in screen pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Pan speed in map pixels per second.
    pub speed: f32,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            speed: 400.0,
        }
    }
}

impl Camera2d {
    pub fn pan(&mut self, direction: Vec2, dt: f32) {
        self.center += direction * self.speed * dt / self.zoom;
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.125, 16.0);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    /// The map-pixel rectangle currently on screen.
    pub fn visible_pixel_rect(&self) -> PixelRect {
        let w = self.viewport_width / self.zoom;
        let h = self.viewport_height / self.zoom;
        PixelRect::new(self.center.x - w * 0.5, self.center.y - h * 0.5, w, h)
    }

    /// The inclusive tile rectangle to hand to the map's render call,
    /// clamped to the grid.
    pub fn visible_tile_rect(&self, tile_size: u32, grid_width: u32, grid_height: u32) -> TileRect {
        tile_rect_from_pixels(self.visible_pixel_rect(), tile_size, grid_width, grid_height)
    }

    /// Orthographic view-projection mapping visible map pixels to clip
    /// space, y-down.
    pub fn view_projection(&self) -> Mat4 {
        let rect = self.visible_pixel_rect();
        // Top maps to +1, bottom to -1: swap the vertical arguments so
        // y-down pixel space lands the right way up.
        Mat4::orthographic_rh(rect.x, rect.right(), rect.bottom(), rect.y, -1.0, 1.0)
    }
}
