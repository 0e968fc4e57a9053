use std::time::Duration;

use log::debug;

use crate::{
    config::FanConfig,
    geometry::{Vec2, WheelGeometry},
    layout::FanLayout,
    rotation::RotationAnimator,
    speed::{PowerState, SpeedLevel},
    toggle::ToggleSwitch,
};

/// Distance a press on the switch may wander before it counts as a drag
pub const TOUCH_SLOP_DP: f32 = 8.0;

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Speed(SpeedLevel),
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SwitchGesture {
    travelled: f32,
    dragging: bool,
}

/// Immutable view of the widget for one frame
///
/// Paint functions only ever see this, never the controller itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanSnapshot {
    pub geometry: WheelGeometry,
    pub layout: FanLayout,
    pub power: PowerState,
    pub speed: SpeedLevel,
    /// Rotation the animator holds; frozen while off
    pub rotation: f32,
    pub knob_offset: f32,
}

impl FanSnapshot {
    /// Offset applied to the wedges: the rotation while on, none while off
    pub fn wedge_offset(&self) -> f32 {
        match self.power {
            PowerState::On => self.rotation,
            PowerState::Off => 0.0,
        }
    }
}

/// Couples the speed selectors & power switch to the rotation animator
#[derive(Debug, Clone, PartialEq)]
pub struct FanController {
    speed: SpeedLevel,
    power: PowerState,
    switch: ToggleSwitch,
    rotation: RotationAnimator,
    gesture: Option<SwitchGesture>,
}

impl FanController {
    /// Fresh session: off, high speed, switch at the start
    pub fn new(config: &FanConfig, knob_travel: f32) -> Self {
        Self {
            speed: SpeedLevel::default(),
            power: PowerState::Off,
            switch: ToggleSwitch::new(knob_travel, config.switch_duration, config.switch_easing),
            rotation: RotationAnimator::default(),
            gesture: None,
        }
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn switch(&self) -> &ToggleSwitch {
        &self.switch
    }

    pub fn rotation(&self) -> &RotationAnimator {
        &self.rotation
    }

    /// Selects a speed, powered or not; a running fan picks it up on its next lap
    pub fn select_speed(&mut self, level: SpeedLevel) {
        if level != self.speed {
            debug!("speed {:?} -> {:?}", self.speed, level);
        }
        self.speed = level;
    }

    /// Taps the power switch
    pub fn tap_toggle(&mut self) {
        self.switch.tap();
        self.sync_power();
    }

    pub fn set_knob_travel(&mut self, travel: f32) {
        self.switch.set_travel(travel);
    }

    /// Routes a press to a speed selector or the switch
    ///
    /// Speeds are selected right away; a press on the switch becomes a tap or a drag
    /// once the pointer is released or moves past the touch slop
    pub fn pointer_pressed(&mut self, point: Vec2, layout: &FanLayout) -> Option<Hit> {
        if let Some(level) = layout.indicator_at(point) {
            self.select_speed(level);
            return Some(Hit::Speed(level));
        }
        if layout.switch_track.contains(point) {
            self.gesture = Some(SwitchGesture {
                travelled: 0.0,
                dragging: false,
            });
            return Some(Hit::Toggle);
        }
        None
    }

    /// Feeds horizontal pointer movement to an active switch gesture
    pub fn pointer_moved(&mut self, dx: f32, layout: &FanLayout) {
        let slop = layout.density.dp(TOUCH_SLOP_DP);
        let Some(gesture) = &mut self.gesture else {
            return;
        };
        if gesture.dragging {
            self.switch.drag_by(dx);
            return;
        }
        gesture.travelled += dx;
        if gesture.travelled.abs() > slop {
            gesture.dragging = true;
            self.switch.drag_start();
            self.switch.drag_by(gesture.travelled);
        }
    }

    /// Ends a switch gesture as a tap or a drag release
    pub fn pointer_released(&mut self) {
        match self.gesture.take() {
            Some(SwitchGesture { dragging: true, .. }) => self.switch.drag_end(),
            Some(SwitchGesture { dragging: false, .. }) => self.switch.tap(),
            None => return,
        }
        self.sync_power();
    }

    /// Advances both animations by `delta`
    ///
    /// The wheel advances first so a power change lands at the end of the interval
    pub fn tick(&mut self, delta: Duration) {
        self.rotation.tick(delta, self.speed.period());
        self.switch.tick(delta);
        self.sync_power();
    }

    fn sync_power(&mut self) {
        let power = self.switch.power();
        if power == self.power {
            return;
        }
        match power {
            PowerState::On => self.rotation.start(self.speed.period()),
            PowerState::Off => self.rotation.stop(),
        }
        debug!(
            "power {:?} -> {:?} at {:.1}°",
            self.power,
            power,
            self.rotation.angle()
        );
        self.power = power;
    }

    pub fn snapshot(&self, geometry: WheelGeometry, layout: FanLayout) -> FanSnapshot {
        FanSnapshot {
            geometry,
            layout,
            power: self.power,
            speed: self.speed,
            rotation: self.rotation.angle(),
            knob_offset: self.switch.offset(),
        }
    }
}
