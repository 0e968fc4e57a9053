use std::time::Duration;

use crate::{color::Palette, tween::Easing};

/// Wheel dimensions, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelStyle {
    /// Subtracted from half the short side of the wheel area to get the radius
    pub inset: f32,
    /// Distance from the wheel edge to the bezel & the tips of the grille spokes
    pub bezel_offset: f32,
    pub cord_width: f32,
    pub frame_width: f32,
    pub spoke_width: f32,
    pub wedges: usize,
    pub spokes: usize,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            inset: 200.0,
            bezel_offset: 100.0,
            cord_width: 35.0,
            frame_width: 30.0,
            spoke_width: 10.0,
            wedges: 6,
            spokes: 45,
        }
    }
}

impl WheelStyle {
    /// Angular size of each wedge in degrees
    pub fn wedge_sweep(&self) -> f32 {
        360.0 / self.wedges.max(1) as f32
    }

    /// Angle between neighbouring grille spokes in degrees
    pub fn spoke_spacing(&self) -> f32 {
        360.0 / self.spokes.max(1) as f32
    }
}

/// Control bar dimensions, in density-independent units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    /// Gap between the wheel area & the bar
    pub margin: f32,
    pub padding: f32,
    pub indicator_size: f32,
    pub indicator_padding: f32,
    /// Height of the switch; the track is twice as wide & the knob is square
    pub switch_size: f32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 60.0,
            corner_radius: 10.0,
            margin: 16.0,
            padding: 10.0,
            indicator_size: 20.0,
            indicator_padding: 5.0,
            switch_size: 24.0,
        }
    }
}

/// Everything that shapes the fan widget
///
/// `Default` reproduces the stock desk fan; builder methods tweak individual parts
#[derive(Debug, Clone, PartialEq)]
pub struct FanConfig {
    pub wheel: WheelStyle,
    pub panel: PanelStyle,
    pub palette: Palette,
    /// How long the switch knob takes to slide between ends
    pub switch_duration: Duration,
    pub switch_easing: Easing,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            wheel: WheelStyle::default(),
            panel: PanelStyle::default(),
            palette: Palette::default(),
            switch_duration: Duration::from_millis(300),
            switch_easing: Easing::FastOutSlowIn,
        }
    }
}

impl FanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wheel inset in pixels
    pub fn inset(mut self, inset: f32) -> Self {
        self.wheel.inset = inset;
        self
    }

    /// Set the bezel offset in pixels
    pub fn bezel_offset(mut self, offset: f32) -> Self {
        self.wheel.bezel_offset = offset;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the knob slide duration & curve
    pub fn switch_animation(mut self, duration: Duration, easing: Easing) -> Self {
        self.switch_duration = duration;
        self.switch_easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_wheel_spacing() {
        let wheel = WheelStyle::default();
        assert_eq!(wheel.wedge_sweep(), 60.0);
        assert_eq!(wheel.spoke_spacing(), 8.0);
    }

    #[test]
    fn builder_overrides() {
        let cfg = FanConfig::new()
            .inset(50.0)
            .bezel_offset(20.0)
            .switch_animation(Duration::ZERO, Easing::Linear);
        assert_eq!(cfg.wheel.inset, 50.0);
        assert_eq!(cfg.wheel.bezel_offset, 20.0);
        assert_eq!(cfg.switch_duration, Duration::ZERO);
        assert_eq!(cfg.panel, PanelStyle::default());
    }
}
