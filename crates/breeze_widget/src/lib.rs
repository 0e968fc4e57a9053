//! An animated desk fan: blade wheel, grille, speed selectors & a sliding power switch.
//!
//! Everything here is plain data & pure functions. A host feeds input & elapsed time into a
//! [`FanWidget`] and hands it a [`Canvas`] to paint on; no GPU or windowing code lives here.

pub mod canvas;
pub mod color;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod layout;
pub mod panel;
pub mod rotation;
pub mod scene;
pub mod speed;
pub mod toggle;
pub mod tween;
pub mod widget;

pub use canvas::{Brush, Canvas, DisplayList, DrawCommand, LineCap, TileMode};
pub use color::{Color, Palette};
pub use config::{FanConfig, PanelStyle, WheelStyle};
pub use controller::{FanController, FanSnapshot, Hit};
pub use geometry::{Density, Rect, Vec2, WheelGeometry, point_on_circle, vec2};
pub use layout::FanLayout;
pub use speed::{PowerState, SpeedLevel};
pub use tween::{Easing, Tween};
pub use widget::FanWidget;
