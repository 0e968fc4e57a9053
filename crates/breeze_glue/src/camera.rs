use glam::{Mat4, Vec2};

/// Orthographic projection mapping canvas pixels (origin top-left, y down) onto clip space
pub(crate) fn pixel_projection(screen_size: Vec2) -> Mat4 {
    Mat4::orthographic_lh(0.0, screen_size.x, screen_size.y, 0.0, -1.0, 1.0)
}
