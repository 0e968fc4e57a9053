use crate::{
    config::PanelStyle,
    geometry::{Density, Rect, Vec2, vec2},
    speed::SpeedLevel,
};

/// Where each part of the widget sits on a canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanLayout {
    /// Region the wheel is centered in; the gradient spans its width
    pub wheel_area: Rect,
    pub panel: Rect,
    /// Speed selector hit targets, ordered like [`SpeedLevel::ALL`]
    pub indicators: [Rect; 3],
    pub switch_track: Rect,
    pub knob_size: f32,
    /// Horizontal distance the knob slides between `Start` & `End`
    pub knob_travel: f32,
    pub density: Density,
}

impl FanLayout {
    /// Lays out a `width` x `height` canvas: wheel on top, control bar centered below
    pub fn compute(width: f32, height: f32, density: Density, style: &PanelStyle) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);

        let panel_size = vec2(density.dp(style.width), density.dp(style.height));
        let margin = density.dp(style.margin);
        let padding = density.dp(style.padding);

        let wheel_h = (height - panel_size.y - margin * 2.0).max(0.0);
        let wheel_area = Rect::new(Vec2::ZERO, vec2(width, wheel_h));
        let panel = Rect::new(
            vec2((width - panel_size.x) / 2.0, wheel_h + margin),
            panel_size,
        );
        let mid_y = panel.center().y;

        // left half of the bar (inside its padding) holds the selectors, centered
        let group_x = panel.min().x + padding;
        let group_w = (panel_size.x - padding * 2.0) * 0.5;
        let cell = density.dp(style.indicator_size + style.indicator_padding * 2.0);
        let first = group_x + (group_w - cell * 3.0) / 2.0 + cell / 2.0;
        let indicator = Vec2::splat(density.dp(style.indicator_size));
        let indicators = std::array::from_fn(|i| {
            Rect::from_center(vec2(first + cell * i as f32, mid_y), indicator)
        });

        let knob_size = density.dp(style.switch_size);
        let track_size = vec2(knob_size * 2.0, knob_size);
        let switch_track = Rect::new(
            vec2(
                panel.max().x - padding - track_size.x,
                mid_y - track_size.y / 2.0,
            ),
            track_size,
        );

        Self {
            wheel_area,
            panel,
            indicators,
            switch_track,
            knob_size,
            knob_travel: track_size.x - knob_size,
            density,
        }
    }

    /// Speed selector under `point`, if any
    pub fn indicator_at(&self, point: Vec2) -> Option<SpeedLevel> {
        self.indicators
            .iter()
            .position(|r| r.contains(point))
            .map(|i| SpeedLevel::ALL[i])
    }

    /// Knob rectangle for a given offset along the track
    pub fn knob(&self, offset: f32) -> Rect {
        Rect::new(
            self.switch_track.min() + vec2(offset, 0.0),
            Vec2::splat(self.knob_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scale: f32) -> FanLayout {
        FanLayout::compute(900.0, 1000.0, Density::new(scale), &PanelStyle::default())
    }

    #[test]
    fn panel_is_centered_below_the_wheel() {
        let l = layout(1.0);
        assert_eq!(l.panel.size, vec2(250.0, 60.0));
        assert_eq!(l.panel.center().x, 450.0);
        assert_eq!(l.wheel_area.size, vec2(900.0, 908.0));
        assert_eq!(l.panel.min().y, 924.0);
        assert_eq!(l.panel.max().y, 984.0);
    }

    #[test]
    fn selectors_sit_in_the_left_half() {
        let l = layout(1.0);
        let centers = l.indicators.map(|r| r.center());
        // padded half is 115dp wide, three 30dp cells centered in it
        assert_eq!(centers[0].x, 325.0 + 10.0 + 12.5 + 15.0);
        assert_eq!(centers[1].x - centers[0].x, 30.0);
        assert_eq!(centers[2].x - centers[1].x, 30.0);
        assert!(centers.iter().all(|c| c.y == l.panel.center().y));
        assert!(l.indicators[2].max().x < l.panel.center().x);
    }

    #[test]
    fn switch_hugs_the_right_edge() {
        let l = layout(2.0);
        assert_eq!(l.switch_track.size, vec2(96.0, 48.0));
        assert_eq!(l.switch_track.max().x, l.panel.max().x - 20.0);
        assert_eq!(l.knob_travel, 48.0);
        assert_eq!(l.knob(l.knob_travel).max(), l.switch_track.max());
    }

    #[test]
    fn indicator_hit_testing() {
        let l = layout(1.0);
        for (rect, level) in l.indicators.iter().zip(SpeedLevel::ALL) {
            assert_eq!(l.indicator_at(rect.center()), Some(level));
        }
        assert_eq!(l.indicator_at(l.switch_track.center()), None);
        assert_eq!(l.indicator_at(vec2(0.0, 0.0)), None);
    }

    #[test]
    fn tiny_canvas_collapses_the_wheel_area() {
        let l = FanLayout::compute(100.0, 50.0, Density::default(), &PanelStyle::default());
        assert_eq!(l.wheel_area.height(), 0.0);
    }
}
