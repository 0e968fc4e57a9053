use std::time::Duration;

use crate::{
    speed::PowerState,
    tween::{Easing, Tween},
};

/// Fraction of the travel a drag from `Start` must cover to switch on
pub const ON_THRESHOLD: f32 = 0.3;
/// Fraction of the travel a drag from `End` must cover back to switch off
pub const OFF_THRESHOLD: f32 = 0.5;

/// Resting position of the switch knob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchPosition {
    #[default]
    Start,
    End,
}

impl SwitchPosition {
    pub fn power(self) -> PowerState {
        match self {
            SwitchPosition::Start => PowerState::Off,
            SwitchPosition::End => PowerState::On,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    origin: SwitchPosition,
    offset: f32,
}

/// The sliding power switch
///
/// Taps flip an armed flag & animate the knob toward the matching end; the settled
/// position (& so the power state) only changes once the knob arrives there
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleSwitch {
    position: SwitchPosition,
    target: SwitchPosition,
    travel: f32,
    duration: Duration,
    easing: Easing,
    tween: Tween,
    drag: Option<Drag>,
}

impl ToggleSwitch {
    /// A switch at `Start` whose knob slides `travel` pixels in `duration`
    pub fn new(travel: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            position: SwitchPosition::Start,
            target: SwitchPosition::Start,
            travel: travel.max(0.0),
            duration,
            easing,
            tween: Tween::settled(0.0),
            drag: None,
        }
    }

    /// Settled position of the knob
    pub fn position(&self) -> SwitchPosition {
        self.position
    }

    /// Power state derived from the settled position
    pub fn power(&self) -> PowerState {
        self.position.power()
    }

    /// Whether the last input asked for `End`
    pub fn is_armed(&self) -> bool {
        self.target == SwitchPosition::End
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// True while the knob is travelling between ends
    pub fn is_animating(&self) -> bool {
        !self.tween.is_finished()
    }

    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Knob offset from the start of the track, in pixels
    pub fn offset(&self) -> f32 {
        match self.drag {
            Some(drag) => drag.offset,
            None => self.tween.value(),
        }
    }

    fn endpoint(&self, position: SwitchPosition) -> f32 {
        match position {
            SwitchPosition::Start => 0.0,
            SwitchPosition::End => self.travel,
        }
    }

    fn animate_to(&mut self, target: SwitchPosition) {
        self.target = target;
        self.tween = Tween::new(
            self.offset(),
            self.endpoint(target),
            self.duration,
            self.easing,
        );
        // zero-length animations arrive immediately
        if self.tween.is_finished() {
            self.position = target;
        }
    }

    /// Flips the armed flag & slides toward the other end, even mid-flight
    pub fn tap(&mut self) {
        let target = match self.target {
            SwitchPosition::Start => SwitchPosition::End,
            SwitchPosition::End => SwitchPosition::Start,
        };
        self.animate_to(target);
        self.drag = None;
    }

    /// Advance the knob animation; returns true if the settled position changed
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.tween.tick(delta);
        if self.tween.is_finished() && self.position != self.target {
            self.position = self.target;
            return true;
        }
        false
    }

    /// Grabs the knob where it currently is
    pub fn drag_start(&mut self) {
        let offset = self.offset();
        self.drag = Some(Drag {
            origin: self.target,
            offset,
        });
        self.tween = Tween::settled(offset);
    }

    /// Moves a grabbed knob horizontally, clamped to the track
    pub fn drag_by(&mut self, dx: f32) {
        let travel = self.travel;
        if let Some(drag) = &mut self.drag {
            drag.offset = (drag.offset + dx).clamp(0.0, travel);
        }
    }

    /// Releases the knob & lets it settle on the side its thresholds pick
    pub fn drag_end(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let fraction = if self.travel > 0.0 {
            drag.offset / self.travel
        } else {
            0.0
        };
        let target = match drag.origin {
            SwitchPosition::Start if fraction >= ON_THRESHOLD => SwitchPosition::End,
            SwitchPosition::End if fraction <= 1.0 - OFF_THRESHOLD => SwitchPosition::Start,
            origin => origin,
        };
        self.tween = Tween::settled(drag.offset);
        self.animate_to(target);
    }

    /// Updates the knob travel, e.g. after a DPI change, keeping the relative offset
    pub fn set_travel(&mut self, travel: f32) {
        let travel = travel.max(0.0);
        if travel == self.travel {
            return;
        }
        let ratio = if self.travel > 0.0 {
            travel / self.travel
        } else {
            0.0
        };
        let current = self.offset() * ratio;
        let was_animating = self.is_animating();
        self.travel = travel;

        if let Some(drag) = &mut self.drag {
            drag.offset = current.clamp(0.0, travel);
            self.tween = Tween::settled(drag.offset);
        } else if was_animating {
            self.tween = Tween::settled(current);
            let target = self.target;
            self.animate_to(target);
        } else {
            self.tween = Tween::settled(self.endpoint(self.target));
        }
    }
}
