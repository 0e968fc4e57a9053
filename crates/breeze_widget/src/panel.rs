use crate::{
    canvas::Canvas,
    config::FanConfig,
    controller::FanSnapshot,
    speed::{PowerState, SpeedLevel},
};

/// Paints the control bar: speed indicators on the left, power switch on the right
pub fn paint_panel(canvas: &mut impl Canvas, snapshot: &FanSnapshot, config: &FanConfig) {
    let layout = &snapshot.layout;
    let palette = &config.palette;
    let corner = layout.density.dp(config.panel.corner_radius);

    canvas.fill_rounded_rect(layout.panel, corner, palette.panel);

    for (rect, level) in layout.indicators.iter().zip(SpeedLevel::ALL) {
        let color = if level.is_highlighted(snapshot.power, snapshot.speed) {
            palette.indicator_lit
        } else {
            palette.indicator_unlit
        };
        canvas.fill_rounded_rect(*rect, rect.width() / 2.0, color);
    }

    let track = layout.switch_track;
    canvas.fill_rounded_rect(track, track.height() / 2.0, palette.switch_track);

    let knob = match snapshot.power {
        PowerState::On => palette.knob_on,
        PowerState::Off => palette.knob_off,
    };
    canvas.fill_rounded_rect(
        layout.knob(snapshot.knob_offset),
        layout.knob_size / 2.0,
        knob,
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        canvas::{DisplayList, DrawCommand},
        color::Color,
        controller::FanController,
        geometry::{Density, Rect, Vec2, WheelGeometry},
        layout::FanLayout,
        tween::Easing,
    };

    fn config() -> FanConfig {
        FanConfig::default().switch_animation(Duration::ZERO, Easing::Linear)
    }

    fn paint(controller: &FanController, scale: f32) -> Vec<(Rect, Color)> {
        let cfg = config();
        let layout = FanLayout::compute(900.0, 1000.0, Density::new(scale), &cfg.panel);
        let geometry = WheelGeometry::compute_in(layout.wheel_area, cfg.wheel.inset);
        let mut list = DisplayList::new(Vec2::ZERO);
        paint_panel(&mut list, &controller.snapshot(geometry, layout), &cfg);
        list.commands()
            .iter()
            .map(|cmd| match *cmd {
                DrawCommand::FillRoundedRect { rect, color, .. } => (rect, color),
                ref other => panic!("panel only fills rounded rects, got {other:?}"),
            })
            .collect()
    }

    fn indicator_colors(controller: &FanController) -> Vec<Color> {
        paint(controller, 1.0)[1..4].iter().map(|(_, c)| *c).collect()
    }

    #[test]
    fn bar_indicators_track_then_knob() {
        let c = FanController::new(&config(), 24.0);
        let cmds = paint(&c, 1.0);
        assert_eq!(cmds.len(), 6);
        assert_eq!(cmds[0].1, config().palette.panel);
        assert_eq!(cmds[4].1, config().palette.switch_track);
        assert_eq!(cmds[5].1, config().palette.knob_off);
    }

    #[test]
    fn nothing_lit_while_off() {
        let mut c = FanController::new(&config(), 24.0);
        c.select_speed(SpeedLevel::Low);
        let unlit = config().palette.indicator_unlit;
        assert_eq!(indicator_colors(&c), vec![unlit; 3]);
    }

    #[test]
    fn highlight_follows_speed_while_on() {
        let palette = config().palette;
        let (lit, unlit) = (palette.indicator_lit, palette.indicator_unlit);
        let mut c = FanController::new(&config(), 24.0);
        c.tap_toggle();

        assert_eq!(indicator_colors(&c), vec![lit, unlit, unlit]);
        c.select_speed(SpeedLevel::Medium);
        assert_eq!(indicator_colors(&c), vec![lit, lit, unlit]);
        c.select_speed(SpeedLevel::Low);
        assert_eq!(indicator_colors(&c), vec![lit, lit, lit]);
    }

    #[test]
    fn knob_moves_and_turns_red_when_on() {
        let mut c = FanController::new(&config(), 48.0);
        c.tap_toggle();
        let cmds = paint(&c, 2.0);
        let (track, _) = cmds[4];
        let (knob, color) = cmds[5];
        assert_eq!(color, config().palette.knob_on);
        assert_eq!(knob.max(), track.max());
        assert_eq!(knob.size, Vec2::splat(48.0));
    }
}
