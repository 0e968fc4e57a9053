pub use glam::{Vec2, vec2};

/// Axis-aligned rectangle defined by position (top-left corner) & size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create a new rectangle from position (top-left) & size
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size * 0.5, size)
    }

    /// Returns the top-left corner (min coords)
    pub fn min(&self) -> Vec2 {
        self.position
    }

    /// Returns the bottom-right corner (max coords)
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Returns the center point of the rectangle
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Returns true if the point is inside of the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}

/// Converts density-independent units to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub scale_factor: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

impl Density {
    pub fn new(scale_factor: f32) -> Self {
        // winit can report 0 for a minimized window on some platforms
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self { scale_factor }
    }

    pub fn dp(&self, value: f32) -> f32 {
        value * self.scale_factor
    }
}

/// Center & radius of the fan wheel inside its drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Vec2,
    pub radius: f32,
    /// Area the wheel was laid out in; gradients span its width
    pub bounds: Rect,
}

impl WheelGeometry {
    /// Lays out the wheel on a `width` x `height` canvas anchored at the origin
    ///
    /// `radius = min(width, height) / 2 - inset`, which goes negative for canvases
    /// smaller than `2 * inset`; see [`WheelGeometry::is_degenerate`]
    pub fn compute(width: f32, height: f32, inset: f32) -> Self {
        Self::compute_in(Rect::new(Vec2::ZERO, vec2(width, height)), inset)
    }

    /// Lays out the wheel centered in `bounds`
    pub fn compute_in(bounds: Rect, inset: f32) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.width().min(bounds.height()) / 2.0 - inset,
            bounds,
        }
    }

    /// True when there is nothing sensible to draw
    pub fn is_degenerate(&self) -> bool {
        !(self.radius > 0.0 && self.bounds.width() > 0.0 && self.bounds.height() > 0.0)
    }
}

/// Converts a polar coordinate around `center` to canvas coordinates
///
/// Angles are in degrees; 0° points left of the center & grows clockwise on a y-down canvas
pub fn point_on_circle(radius: f32, center: Vec2, angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    vec2(center.x - cos * radius, center.y - sin * radius)
}
