use breeze::{
    app::{App, AppError, FrameContext},
    input::KeyCode,
    widget::{FanWidget, Hit, SpeedLevel, Vec2, vec2},
};

fn main() -> Result<(), AppError> {
    let mut fan = FanWidget::default();
    let mut laid_out = (Vec2::ZERO, 0.0);

    App::new()
        .title("Desk Fan")
        .screen_size(900, 1000)
        .run(move |FrameContext { gfx, input, timer }| {
            let layout_key = (gfx.screen_size(), gfx.scale_factor());
            if layout_key != laid_out {
                fan.resize(layout_key.0.x, layout_key.0.y, layout_key.1);
                laid_out = layout_key;
            }

            for (key, level) in [
                (KeyCode::Digit1, SpeedLevel::High),
                (KeyCode::Digit2, SpeedLevel::Medium),
                (KeyCode::Digit3, SpeedLevel::Low),
            ] {
                if input.key_pressed(key) {
                    fan.select_speed(level);
                }
            }
            if input.key_pressed(KeyCode::Space) {
                fan.tap_toggle();
            }

            if input.pointer_pressed() {
                let (x, y) = input.pointer_position();
                if let Some(Hit::Speed(level)) = fan.pointer_pressed(vec2(x, y)) {
                    log::info!("speed {level:?}");
                }
            } else if input.pointer_held() {
                let (dx, dy) = input.pointer_delta();
                fan.pointer_dragged(vec2(dx, dy));
            }
            if input.pointer_released() {
                fan.pointer_released();
            }

            fan.update(timer.frame_duration());

            gfx.clear(fan.config().palette.background);
            fan.paint(gfx);
        })
}
