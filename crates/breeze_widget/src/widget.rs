use std::time::Duration;

use log::debug;

use crate::{
    canvas::Canvas,
    config::FanConfig,
    controller::{FanController, FanSnapshot, Hit},
    geometry::{Density, Vec2, WheelGeometry, vec2},
    layout::FanLayout,
    panel::paint_panel,
    scene::paint_wheel,
    speed::SpeedLevel,
};

/// The desk fan as a self-contained widget
///
/// Hosts call [`FanWidget::resize`] when the surface changes, forward pointer input,
/// call [`FanWidget::update`] once per frame & then [`FanWidget::paint`]
#[derive(Debug, Clone)]
pub struct FanWidget {
    config: FanConfig,
    controller: FanController,
    size: Vec2,
    layout: FanLayout,
    geometry: WheelGeometry,
}

impl Default for FanWidget {
    fn default() -> Self {
        Self::new(FanConfig::default())
    }
}

impl FanWidget {
    /// A widget with no area yet; nothing is painted until the first resize
    pub fn new(config: FanConfig) -> Self {
        let layout = FanLayout::compute(0.0, 0.0, Density::default(), &config.panel);
        let geometry = WheelGeometry::compute_in(layout.wheel_area, config.wheel.inset);
        let controller = FanController::new(&config, layout.knob_travel);
        Self {
            config,
            controller,
            size: Vec2::ZERO,
            layout,
            geometry,
        }
    }

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn controller(&self) -> &FanController {
        &self.controller
    }

    pub fn layout(&self) -> &FanLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    /// Lays the widget out on a `width` x `height` pixel surface
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        let density = Density::new(scale_factor);
        self.size = vec2(width, height);
        self.layout = FanLayout::compute(width, height, density, &self.config.panel);
        self.geometry = WheelGeometry::compute_in(self.layout.wheel_area, self.config.wheel.inset);
        self.controller.set_knob_travel(self.layout.knob_travel);
        debug!(
            "layout {}x{} @{}: wheel r={:.1} at {}",
            width, height, density.scale_factor, self.geometry.radius, self.geometry.center
        );
    }

    /// Pointer went down at `point`; returns what it hit
    pub fn pointer_pressed(&mut self, point: Vec2) -> Option<Hit> {
        self.controller.pointer_pressed(point, &self.layout)
    }

    /// Pointer moved by `delta` while held
    pub fn pointer_dragged(&mut self, delta: Vec2) {
        self.controller.pointer_moved(delta.x, &self.layout);
    }

    pub fn pointer_released(&mut self) {
        self.controller.pointer_released();
    }

    pub fn select_speed(&mut self, level: SpeedLevel) {
        self.controller.select_speed(level);
    }

    pub fn tap_toggle(&mut self) {
        self.controller.tap_toggle();
    }

    /// Advances the switch & wheel animations
    pub fn update(&mut self, delta: Duration) {
        self.controller.tick(delta);
    }

    pub fn snapshot(&self) -> FanSnapshot {
        self.controller.snapshot(self.geometry, self.layout)
    }

    /// Paints the current state; an empty surface paints nothing
    pub fn paint(&self, canvas: &mut impl Canvas) {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        let snapshot = self.snapshot();
        paint_wheel(canvas, &snapshot, &self.config);
        paint_panel(canvas, &snapshot, &self.config);
    }
}
