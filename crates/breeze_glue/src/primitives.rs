use breeze_render::{GeometryBatch, vertex::Vertex};
use breeze_widget::{Brush, Color, LineCap, Rect};
use glam::Vec2;
use log::warn;
use lyon::{
    math::{Box2D, point},
    path::{Builder, Path, Winding, builder::BorderRadii, traits::PathBuilder as _},
    tessellation::{
        FillOptions, FillTessellator, FillVertex, LineCap as StrokeCap, StrokeOptions,
        StrokeTessellator, StrokeVertex,
        geometry_builder::{BuffersBuilder, VertexBuffers},
    },
};

const MIN_THICKNESS: f32 = 0.001;
/// Max angle covered by one straight segment when flattening arcs, in degrees
const ARC_STEP_DEGREES: f32 = 3.0;

/// Geometry for one frame, spread over as many `u16`-indexed batches as it needs
///
/// Batches (& their GPU buffers) are kept across frames & only their contents cleared
#[derive(Default)]
pub struct PrimitiveBatch {
    batches: Vec<GeometryBatch>,
    active: usize,
}

impl PrimitiveBatch {
    /// Appends a shape, spilling into the next batch when the active one is full
    pub(crate) fn push(&mut self, verts: &[Vertex], indices: &[u16]) {
        if verts.len() > GeometryBatch::MAX_VERTICES {
            warn!("dropping shape with {} vertices", verts.len());
            return;
        }
        loop {
            if self.active == self.batches.len() {
                self.batches.push(GeometryBatch::default());
            }
            if self.batches[self.active].push(verts, indices) {
                return;
            }
            self.active += 1;
        }
    }

    /// Batches holding this frame's geometry, in paint order
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut GeometryBatch> {
        self.batches.iter_mut().filter(|b| !b.is_empty())
    }

    /// Clears CPU-side geometry but keeps the batches for reuse next frame
    pub(crate) fn reset(&mut self) {
        for batch in &mut self.batches {
            batch.clear();
        }
        self.active = 0;
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices().len()).sum()
    }
}

#[derive(Clone, Copy)]
struct Stroke {
    width: f32,
    cap: LineCap,
    color: Color,
}

/// Builder for a vector path, tessellated into the batch on `Drop`
///
/// Wraps a `lyon::path::Builder`. On drop any open subpath is ended, the path is filled
/// and/or stroked & every vertex is colored by evaluating its brush at that position
pub struct PathBuilder<'a> {
    batch: &'a mut PrimitiveBatch,
    fill: Option<Brush>,
    stroke: Option<Stroke>,
    path_open: bool,
    builder: Builder,
}

impl<'a> PathBuilder<'a> {
    pub(crate) fn new(batch: &'a mut PrimitiveBatch) -> Self {
        Self {
            batch,
            fill: None,
            stroke: None,
            path_open: false,
            builder: Path::builder(),
        }
    }

    /// Fill the path with a brush
    pub fn fill(mut self, brush: impl Into<Brush>) -> Self {
        self.fill = Some(brush.into());
        self
    }

    /// Stroke the path outline
    pub fn stroke(mut self, width: f32, cap: LineCap, color: Color) -> Self {
        self.stroke = Some(Stroke {
            width: width.max(MIN_THICKNESS),
            cap,
            color,
        });
        self
    }

    /// Begins a new subpath
    pub fn begin(mut self, p: Vec2) -> Self {
        if self.path_open {
            self.builder.end(false);
        }
        self.builder.begin(point(p.x, p.y));
        self.path_open = true;
        self
    }

    /// Adds a straight line to the current subpath; `begin()` must have been called first
    pub fn line_to(mut self, p: Vec2) -> Self {
        if self.path_open {
            self.builder.line_to(point(p.x, p.y));
        }
        self
    }

    /// Closes the current subpath
    pub fn close(mut self) -> Self {
        if self.path_open {
            self.builder.end(true);
            self.path_open = false;
        }
        self
    }

    /// Adds a circle as its own closed subpath
    pub fn circle(mut self, center: Vec2, radius: f32) -> Self {
        self.builder
            .add_circle(point(center.x, center.y), radius, Winding::Positive);
        self
    }

    /// Adds a rounded rectangle as its own closed subpath
    pub fn rounded_rect(mut self, rect: Rect, radius: f32) -> Self {
        let (min, max) = (rect.min(), rect.max());
        let radius = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
        self.builder.add_rounded_rectangle(
            &Box2D::new(point(min.x, min.y), point(max.x, max.y)),
            &BorderRadii::new(radius),
            Winding::Positive,
        );
        self
    }

    /// Adds a closed pie sector; angles in degrees, clockwise from +x on a y-down canvas
    pub fn sector(self, center: Vec2, radius: f32, start_degrees: f32, sweep_degrees: f32) -> Self {
        let steps = (sweep_degrees.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
        let mut path = self.begin(center);
        for i in 0..=steps {
            let angle = (start_degrees + sweep_degrees * i as f32 / steps as f32).to_radians();
            path = path.line_to(center + Vec2::from_angle(angle) * radius);
        }
        path.close()
    }
}

impl Drop for PathBuilder<'_> {
    fn drop(&mut self) {
        if self.path_open {
            self.builder.end(false);
        }
        let path = std::mem::take(&mut self.builder).build();
        let mut geometry: VertexBuffers<Vertex, u16> = VertexBuffers::new();

        if let Some(brush) = self.fill.filter(|b| !b.is_invisible()) {
            let result = FillTessellator::new().tessellate_path(
                &path,
                &FillOptions::default(),
                &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| {
                    let p = vertex.position();
                    let color = brush.color_at(Vec2::new(p.x, p.y));
                    Vertex::new([p.x, p.y], color.linear_components())
                }),
            );
            if let Err(err) = result {
                warn!("fill tessellation failed: {err:?}");
            }
        }

        if let Some(stroke) = self.stroke.filter(|s| s.color.alpha() > 0.0) {
            let cap = match stroke.cap {
                LineCap::Butt => StrokeCap::Butt,
                LineCap::Round => StrokeCap::Round,
            };
            let color = stroke.color.linear_components();
            let result = StrokeTessellator::new().tessellate_path(
                &path,
                &StrokeOptions::default()
                    .with_line_width(stroke.width)
                    .with_line_cap(cap),
                &mut BuffersBuilder::new(&mut geometry, |vertex: StrokeVertex| {
                    let p = vertex.position();
                    Vertex::new([p.x, p.y], color)
                }),
            );
            if let Err(err) = result {
                warn!("stroke tessellation failed: {err:?}");
            }
        }

        if !geometry.indices.is_empty() {
            self.batch.push(&geometry.vertices, &geometry.indices);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breeze_widget::{TileMode, vec2};

    fn bounds(verts: &[Vertex]) -> (Vec2, Vec2) {
        verts.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position());
                (lo.min(p), hi.max(p))
            },
        )
    }

    fn vertices(batch: &mut PrimitiveBatch) -> Vec<Vertex> {
        batch
            .iter_mut()
            .flat_map(|b| b.vertices().to_vec())
            .collect()
    }

    #[test]
    fn filled_rounded_rect_stays_in_bounds() {
        let mut batch = PrimitiveBatch::default();
        let rect = Rect::new(vec2(10.0, 20.0), vec2(250.0, 60.0));
        PathBuilder::new(&mut batch)
            .rounded_rect(rect, 10.0)
            .fill(Color::WHITE);

        let verts = vertices(&mut batch);
        assert!(!verts.is_empty());
        let (lo, hi) = bounds(&verts);
        assert!(lo.cmpge(rect.min() - 0.01).all());
        assert!(hi.cmple(rect.max() + 0.01).all());
    }

    #[test]
    fn round_cap_extends_past_the_endpoints() {
        let mut batch = PrimitiveBatch::default();
        PathBuilder::new(&mut batch)
            .begin(vec2(0.0, 0.0))
            .line_to(vec2(100.0, 0.0))
            .stroke(10.0, LineCap::Round, Color::BLACK);
        let (lo, hi) = bounds(&vertices(&mut batch));
        assert!(lo.x < -4.0 && hi.x > 104.0);

        let mut butt = PrimitiveBatch::default();
        PathBuilder::new(&mut butt)
            .begin(vec2(0.0, 0.0))
            .line_to(vec2(100.0, 0.0))
            .stroke(10.0, LineCap::Butt, Color::BLACK);
        let (lo, hi) = bounds(&vertices(&mut butt));
        assert!(lo.x > -0.01 && hi.x < 100.01);
    }

    #[test]
    fn sector_covers_its_quadrant() {
        let mut batch = PrimitiveBatch::default();
        PathBuilder::new(&mut batch)
            .sector(Vec2::ZERO, 100.0, 0.0, 90.0)
            .fill(Color::BLACK);
        let (lo, hi) = bounds(&vertices(&mut batch));
        // clockwise from +x on a y-down canvas sweeps into +y
        assert!(lo.cmpge(Vec2::splat(-0.01)).all());
        assert!((hi.x - 100.0).abs() < 0.01 && (hi.y - 100.0).abs() < 0.01);
    }

    #[test]
    fn gradient_colors_follow_position() {
        let mut batch = PrimitiveBatch::default();
        let area = Rect::new(Vec2::ZERO, vec2(100.0, 100.0));
        let brush = Brush::horizontal_gradient(area, [Color::BLACK, Color::WHITE], TileMode::Clamp);
        PathBuilder::new(&mut batch).rounded_rect(area, 0.0).fill(brush);

        for v in vertices(&mut batch) {
            let expected = brush.color_at(Vec2::from(v.position())).linear_components();
            assert_eq!(v.color(), expected);
        }
    }

    #[test]
    fn invisible_paint_emits_nothing() {
        let mut batch = PrimitiveBatch::default();
        PathBuilder::new(&mut batch)
            .circle(Vec2::ZERO, 50.0)
            .fill(Color::TRANSPARENT)
            .stroke(4.0, LineCap::Butt, Color::TRANSPARENT);
        assert_eq!(batch.vertex_count(), 0);
    }

    #[test]
    fn overflow_spills_into_a_new_batch() {
        let mut batch = PrimitiveBatch::default();
        let big = vec![Vertex::new([0.0; 2], [1.0; 4]); GeometryBatch::MAX_VERTICES - 2];
        batch.push(&big, &[0, 1, 2]);
        batch.push(&big[..3], &[0, 1, 2]);
        assert_eq!(batch.iter_mut().count(), 2);

        batch.reset();
        assert_eq!(batch.iter_mut().count(), 0);
        batch.push(&big[..3], &[0, 1, 2]);
        assert_eq!(batch.iter_mut().count(), 1);
    }
}
