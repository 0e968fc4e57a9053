use breeze_render::Renderer;
use breeze_widget::{Brush, Canvas, Color, LineCap, Rect};
use glam::Vec2;

use crate::{
    camera::pixel_projection,
    primitives::{PathBuilder, PrimitiveBatch},
};

/// High-level 2D drawing interface over the [`Renderer`]
///
/// Shapes are tessellated into a [`PrimitiveBatch`] as they're issued & drawn when the frame ends
pub struct Graphics<'a> {
    renderer: &'a mut Renderer,
    batch: &'a mut PrimitiveBatch,
    target_size: (u32, u32),
    scale_factor: f32,
}

impl<'a> Graphics<'a> {
    pub fn new(
        renderer: &'a mut Renderer,
        batch: &'a mut PrimitiveBatch,
        w: u32,
        h: u32,
        scale_factor: f32,
    ) -> Self {
        Self {
            renderer,
            batch,
            target_size: (w, h),
            scale_factor,
        }
    }

    /// Upload the camera matrix for the shapes recorded so far
    pub(crate) fn flush(&mut self) {
        let view_proj = pixel_projection(self.screen_size());
        self.renderer
            .upload_camera_matrix(view_proj.to_cols_array_2d());
    }

    /// Clear the screen to a color
    pub fn clear(&mut self, color: Color) {
        self.renderer
            .set_clear_color(color.linear_components().map(f64::from));
    }
    /// Get current surface size in pixels
    pub fn screen_size(&self) -> Vec2 {
        let (w, h) = self.target_size;
        Vec2::new(w as f32, h as f32)
    }
    /// Physical pixels per logical pixel of the window
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Start building a vector path
    pub fn path(&mut self) -> PathBuilder<'_> {
        PathBuilder::new(self.batch)
    }
}

impl Canvas for Graphics<'_> {
    fn size(&self) -> Vec2 {
        self.screen_size()
    }

    fn line(&mut self, start: Vec2, end: Vec2, width: f32, cap: LineCap, color: Color) {
        self.path()
            .begin(start)
            .line_to(end)
            .stroke(width, cap, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.path()
            .circle(center, radius)
            .stroke(width, LineCap::Butt, color);
    }

    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        brush: Brush,
    ) {
        if radius <= 0.0 || sweep_degrees == 0.0 {
            return;
        }
        self.path()
            .sector(center, radius, start_degrees, sweep_degrees)
            .fill(brush);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.path().rounded_rect(rect, corner_radius).fill(color);
    }
}
