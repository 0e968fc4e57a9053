use log::trace;

use crate::{
    canvas::{Brush, Canvas, LineCap, TileMode},
    color::Color,
    config::FanConfig,
    controller::FanSnapshot,
    geometry::{point_on_circle, vec2},
};

/// Paints the cord, bezel, blade wedges & grille, back to front
///
/// Degenerate geometry paints nothing
pub fn paint_wheel(canvas: &mut impl Canvas, snapshot: &FanSnapshot, config: &FanConfig) {
    let geometry = &snapshot.geometry;
    if geometry.is_degenerate() {
        trace!("skipping wheel, radius {}", geometry.radius);
        return;
    }
    let style = &config.wheel;
    let palette = &config.palette;
    let center = geometry.center;
    let radius = geometry.radius;
    let outer = radius + style.bezel_offset;

    canvas.line(
        center,
        center + vec2(0.0, radius * 2.0),
        style.cord_width,
        LineCap::Round,
        palette.cord,
    );

    canvas.stroke_circle(center, outer, style.frame_width, palette.frame);

    let blade = Brush::horizontal_gradient(geometry.bounds, palette.blade, TileMode::Mirror);
    let sweep = style.wedge_sweep();
    let offset = snapshot.wedge_offset();
    for i in 0..style.wedges {
        let brush = if i % 2 == 0 {
            blade
        } else {
            Brush::Solid(Color::TRANSPARENT)
        };
        canvas.fill_arc(center, radius, i as f32 * sweep + offset, sweep, brush);
    }

    // the grille stays put while the blades turn under it
    let spacing = style.spoke_spacing();
    for i in 0..style.spokes {
        let tip = point_on_circle(outer, center, i as f32 * spacing);
        canvas.line(center, tip, style.spoke_width, LineCap::Round, palette.frame);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        canvas::{DisplayList, DrawCommand},
        controller::FanController,
        geometry::{Density, Vec2, WheelGeometry},
        layout::FanLayout,
        tween::Easing,
    };

    fn config() -> FanConfig {
        FanConfig::default().switch_animation(Duration::ZERO, Easing::Linear)
    }

    fn snapshot_at(width: f32, height: f32, spin: Option<Duration>) -> FanSnapshot {
        let cfg = config();
        let layout = FanLayout::compute(width, height, Density::default(), &cfg.panel);
        let geometry = WheelGeometry::compute_in(layout.wheel_area, cfg.wheel.inset);
        let mut c = FanController::new(&cfg, layout.knob_travel);
        if let Some(elapsed) = spin {
            c.tap_toggle();
            c.tick(elapsed);
        }
        c.snapshot(geometry, layout)
    }

    fn paint(snapshot: &FanSnapshot) -> DisplayList {
        let mut list = DisplayList::new(Vec2::ZERO);
        paint_wheel(&mut list, snapshot, &config());
        list
    }

    fn arcs(list: &DisplayList) -> Vec<(f32, Brush)> {
        list.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillArc {
                    start_degrees,
                    brush,
                    ..
                } => Some((*start_degrees, *brush)),
                _ => None,
            })
            .collect()
    }

    fn spokes(list: &DisplayList) -> Vec<DrawCommand> {
        list.commands()
            .iter()
            .skip(8)
            .cloned()
            .collect()
    }

    #[test]
    fn draws_in_fixed_order() {
        let list = paint(&snapshot_at(900.0, 1000.0, None));
        let cmds = list.commands();
        assert_eq!(cmds.len(), 1 + 1 + 6 + 45);

        assert!(matches!(
            cmds[0],
            DrawCommand::Line { cap: LineCap::Round, width, .. } if width == 35.0
        ));
        assert!(matches!(
            cmds[1],
            DrawCommand::StrokeCircle { width, .. } if width == 30.0
        ));
        assert!(cmds[2..8].iter().all(|c| matches!(c, DrawCommand::FillArc { .. })));
        assert!(cmds[8..].iter().all(|c| matches!(
            c,
            DrawCommand::Line { cap: LineCap::Round, width, .. } if *width == 10.0
        )));
    }

    #[test]
    fn cord_and_bezel_follow_the_radius() {
        let snap = snapshot_at(900.0, 1000.0, None);
        let g = snap.geometry;
        let list = paint(&snap);
        match list.commands()[0] {
            DrawCommand::Line { start, end, .. } => {
                assert_eq!(start, g.center);
                assert_eq!(end, g.center + vec2(0.0, g.radius * 2.0));
            }
            ref other => panic!("expected cord, got {other:?}"),
        }
        match list.commands()[1] {
            DrawCommand::StrokeCircle { radius, .. } => assert_eq!(radius, g.radius + 100.0),
            ref other => panic!("expected bezel, got {other:?}"),
        }
    }

    #[test]
    fn wedges_alternate_gradient_and_clear() {
        let list = paint(&snapshot_at(900.0, 1000.0, None));
        let arcs = arcs(&list);
        for (i, (start, brush)) in arcs.iter().enumerate() {
            assert_eq!(*start, i as f32 * 60.0);
            assert_eq!(brush.is_invisible(), i % 2 == 1);
        }
        match arcs[0].1 {
            Brush::LinearGradient { start, end, tile, .. } => {
                assert_eq!(tile, TileMode::Mirror);
                assert_eq!(start.x, 0.0);
                assert_eq!(end.x, 900.0);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn wedges_follow_rotation_but_spokes_do_not() {
        let still = paint(&snapshot_at(900.0, 1000.0, None));
        let spun = paint(&snapshot_at(900.0, 1000.0, Some(Duration::from_millis(50))));

        let offsets: Vec<f32> = arcs(&spun)
            .iter()
            .zip(arcs(&still))
            .map(|(a, b)| a.0 - b.0)
            .collect();
        assert!(offsets.iter().all(|d| (d - 18.0).abs() < 1e-3));
        assert_eq!(spokes(&spun), spokes(&still));
    }

    #[test]
    fn spokes_reach_the_bezel() {
        let snap = snapshot_at(900.0, 1000.0, None);
        let g = snap.geometry;
        for cmd in spokes(&paint(&snap)) {
            let DrawCommand::Line { start, end, .. } = cmd else {
                panic!("spoke should be a line");
            };
            assert_eq!(start, g.center);
            assert!(((end - start).length() - (g.radius + 100.0)).abs() < 1e-2);
        }
    }

    #[test]
    fn degenerate_canvas_paints_nothing() {
        assert!(paint(&snapshot_at(300.0, 300.0, None)).is_empty());
        assert!(paint(&snapshot_at(0.0, 0.0, None)).is_empty());
        assert!(paint(&snapshot_at(-10.0, 500.0, None)).is_empty());
    }
}
