//! Drawing surface the widget paints onto.
//!
//! The widget never talks to the GPU itself. Hosts implement [`Canvas`]; tests & tools use
//! [`DisplayList`], which records every call as a [`DrawCommand`].

use crate::{
    color::Color,
    geometry::{Rect, Vec2},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// How a gradient continues past its start & end points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMode {
    #[default]
    Clamp,
    Repeated,
    Mirror,
}

impl TileMode {
    /// Maps an unbounded gradient parameter into `0..=1`
    pub fn apply(self, t: f32) -> f32 {
        match self {
            TileMode::Clamp => t.clamp(0.0, 1.0),
            TileMode::Repeated => t.rem_euclid(1.0),
            TileMode::Mirror => {
                let t = t.rem_euclid(2.0);
                if t > 1.0 { 2.0 - t } else { t }
            }
        }
    }
}

/// Paint used to fill shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    Solid(Color),
    /// Two-stop gradient along the line from `start` to `end`
    LinearGradient {
        start: Vec2,
        end: Vec2,
        colors: [Color; 2],
        tile: TileMode,
    },
}

impl Brush {
    /// Horizontal gradient spanning `bounds` from left to right
    pub fn horizontal_gradient(bounds: Rect, colors: [Color; 2], tile: TileMode) -> Self {
        let y = bounds.center().y;
        Brush::LinearGradient {
            start: Vec2::new(bounds.min().x, y),
            end: Vec2::new(bounds.max().x, y),
            colors,
            tile,
        }
    }

    /// Evaluates the brush at a canvas position
    pub fn color_at(&self, point: Vec2) -> Color {
        match *self {
            Brush::Solid(color) => color,
            Brush::LinearGradient {
                start,
                end,
                colors: [from, to],
                tile,
            } => {
                let axis = end - start;
                let len_sq = axis.length_squared();
                if len_sq <= f32::EPSILON {
                    return from;
                }
                let t = (point - start).dot(axis) / len_sq;
                from.lerp(to, tile.apply(t))
            }
        }
    }

    /// True if painting with this brush can't change any pixel
    pub fn is_invisible(&self) -> bool {
        match self {
            Brush::Solid(color) => color.alpha() <= 0.0,
            Brush::LinearGradient { colors, .. } => colors.iter().all(|c| c.alpha() <= 0.0),
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// The primitives a host drawing surface must provide
///
/// Coordinates are pixels with the origin at the top-left & y pointing down.
/// Angles are degrees, measured clockwise from the positive x axis
pub trait Canvas {
    /// Size of the drawable surface in pixels
    fn size(&self) -> Vec2;

    /// Strokes a straight line
    fn line(&mut self, start: Vec2, end: Vec2, width: f32, cap: LineCap, color: Color);

    /// Strokes the outline of a circle
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Fills a pie sector (arc closed through the center)
    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        brush: Brush,
    );

    /// Fills a rectangle with rounded corners
    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    fn line(&mut self, start: Vec2, end: Vec2, width: f32, cap: LineCap, color: Color) {
        (**self).line(start, end, width, cap, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        (**self).stroke_circle(center, radius, width, color);
    }

    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        brush: Brush,
    ) {
        (**self).fill_arc(center, radius, start_degrees, sweep_degrees, brush);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        (**self).fill_rounded_rect(rect, corner_radius, color);
    }
}

/// A single recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Vec2,
        end: Vec2,
        width: f32,
        cap: LineCap,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    FillArc {
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        brush: Brush,
    },
    FillRoundedRect {
        rect: Rect,
        corner_radius: f32,
        color: Color,
    },
}

/// Canvas that records draw calls in order instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replays the recorded commands onto another canvas
    pub fn replay(&self, canvas: &mut impl Canvas) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Line {
                    start,
                    end,
                    width,
                    cap,
                    color,
                } => canvas.line(start, end, width, cap, color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.stroke_circle(center, radius, width, color),
                DrawCommand::FillArc {
                    center,
                    radius,
                    start_degrees,
                    sweep_degrees,
                    brush,
                } => canvas.fill_arc(center, radius, start_degrees, sweep_degrees, brush),
                DrawCommand::FillRoundedRect {
                    rect,
                    corner_radius,
                    color,
                } => canvas.fill_rounded_rect(rect, corner_radius, color),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn line(&mut self, start: Vec2, end: Vec2, width: f32, cap: LineCap, color: Color) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            width,
            cap,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        brush: Brush,
    ) {
        self.commands.push(DrawCommand::FillArc {
            center,
            radius,
            start_degrees,
            sweep_degrees,
            brush,
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect {
            rect,
            corner_radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vec2;

    #[test]
    fn mirror_tiling_reflects() {
        let m = TileMode::Mirror;
        assert_eq!(m.apply(0.25), 0.25);
        assert_eq!(m.apply(1.25), 0.75);
        assert_eq!(m.apply(2.25), 0.25);
        assert_eq!(m.apply(-0.25), 0.25);
        assert_eq!(TileMode::Repeated.apply(1.25), 0.25);
        assert_eq!(TileMode::Clamp.apply(1.25), 1.0);
    }

    #[test]
    fn horizontal_gradient_varies_only_in_x() {
        let bounds = Rect::new(vec2(0.0, 0.0), vec2(200.0, 100.0));
        let brush = Brush::horizontal_gradient(bounds, [Color::BLACK, Color::WHITE], TileMode::Mirror);

        assert_eq!(brush.color_at(vec2(0.0, 0.0)), Color::BLACK);
        assert_eq!(brush.color_at(vec2(200.0, 80.0)), Color::WHITE);
        assert_eq!(brush.color_at(vec2(100.0, 3.0)), brush.color_at(vec2(100.0, 97.0)));
        // mirrored past the right edge
        assert_eq!(brush.color_at(vec2(300.0, 0.0)), brush.color_at(vec2(100.0, 0.0)));
    }

    #[test]
    fn transparent_brushes_are_invisible() {
        assert!(Brush::Solid(Color::TRANSPARENT).is_invisible());
        assert!(!Brush::Solid(Color::BLACK).is_invisible());
        let bounds = Rect::new(Vec2::ZERO, vec2(10.0, 10.0));
        assert!(
            Brush::horizontal_gradient(bounds, [Color::TRANSPARENT; 2], TileMode::Clamp)
                .is_invisible()
        );
    }

    #[test]
    fn display_list_replays_in_order() {
        let mut list = DisplayList::new(vec2(64.0, 64.0));
        list.stroke_circle(vec2(32.0, 32.0), 10.0, 2.0, Color::BLACK);
        list.line(Vec2::ZERO, vec2(5.0, 5.0), 1.0, LineCap::Round, Color::WHITE);

        let mut copy = DisplayList::new(list.size());
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());
        assert_eq!(copy.commands().len(), 2);
    }
}
