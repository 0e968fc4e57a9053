pub use winit::{event::MouseButton, keyboard::KeyCode};

use crate::coordinate_converter::CoordinateConverter;
use std::collections::{HashMap, HashSet};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, Touch, TouchPhase},
    keyboard::PhysicalKey,
};

/// State of the primary finger on a touch screen
#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchPoint {
    id: u64,
    position: (f32, f32),
}

/// Input collected between two frames
///
/// Pressed/released queries are edge-triggered & only true for the frame the change happened
#[derive(Default)]
pub struct Input {
    keyboard: HashMap<KeyCode, (ElementState, ElementState)>,
    mouse_buttons: HashMap<MouseButton, (ElementState, ElementState)>,
    // latched on the down edge so a press released within the same frame still counts
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    mouse_delta: (f32, f32),
    touch: Option<TouchPoint>,
    touch_delta: (f32, f32),
    touch_pressed: bool,
    touch_released: bool,
}

impl Input {
    /// Update keyboard state from a `winit` KeyEvent
    pub(crate) fn keyboard(&mut self, event: KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    fn set_key(&mut self, key: KeyCode, state: ElementState) {
        let prev = self
            .keyboard
            .get(&key)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        if state == ElementState::Pressed && prev != ElementState::Pressed {
            self.keys_down.insert(key);
        }
        self.keyboard.insert(key, (state, prev));
    }

    /// Update mouse button state
    pub(crate) fn mouse(&mut self, button: MouseButton, state: ElementState) {
        let prev = self
            .mouse_buttons
            .get(&button)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        if state == ElementState::Pressed && prev != ElementState::Pressed {
            self.buttons_down.insert(button);
        }
        self.mouse_buttons.insert(button, (state, prev));
    }

    /// Update cursor position & accumulate delta
    pub(crate) fn cursor(&mut self, position: PhysicalPosition<f64>) {
        let pos: (f32, f32) = position.into();
        self.move_cursor(pos);
    }

    fn move_cursor(&mut self, pos: (f32, f32)) {
        let prev = self.mouse_position;
        self.mouse_delta.0 += pos.0 - prev.0;
        self.mouse_delta.1 += pos.1 - prev.1;
        self.mouse_position = pos;
    }

    /// Update touch state with coordinate conversion
    pub(crate) fn touch(&mut self, touch: Touch, coordinate_converter: CoordinateConverter) {
        let position = coordinate_converter
            .window_to_buffer(touch.location.x as f32, touch.location.y as f32);
        self.apply_touch(touch.id, touch.phase, position);
    }

    // only the first finger down is tracked; others are ignored until it lifts
    fn apply_touch(&mut self, id: u64, phase: TouchPhase, position: (f32, f32)) {
        match phase {
            TouchPhase::Started => {
                if self.touch.is_none() {
                    self.touch = Some(TouchPoint { id, position });
                    self.touch_pressed = true;
                }
            }
            TouchPhase::Moved => {
                if let Some(point) = self.touch.as_mut().filter(|p| p.id == id) {
                    self.touch_delta.0 += position.0 - point.position.0;
                    self.touch_delta.1 += position.1 - point.position.1;
                    point.position = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(point) = self.touch.as_mut().filter(|p| p.id == id) {
                    point.position = position;
                    self.touch_released = true;
                }
            }
        }
    }

    /// Update previous states & clean up released keys/buttons/touches
    pub(crate) fn end_frame(&mut self) {
        for (curr, prev) in self.keyboard.values_mut() {
            *prev = *curr;
        }
        for (curr, prev) in self.mouse_buttons.values_mut() {
            *prev = *curr;
        }

        // Drop released keys/buttons to avoid buildup
        self.keyboard
            .retain(|_, (curr, _)| *curr != ElementState::Released);
        self.mouse_buttons
            .retain(|_, (curr, _)| *curr != ElementState::Released);

        // a lifted finger stays readable for the frame it was released in
        if self.touch_released {
            self.touch = None;
        }
        self.keys_down.clear();
        self.buttons_down.clear();
        self.mouse_delta = (0.0, 0.0);
        self.touch_delta = (0.0, 0.0);
        self.touch_pressed = false;
        self.touch_released = false;
    }

    /// True if the key went down this frame, even if it was already released again
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// True if key is held down (pressed now regardless of last frame)
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// True if key was just released this frame
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|(curr, _)| *curr == ElementState::Released)
    }

    /// True if any key in slice was just pressed
    pub fn keys_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.key_pressed(key))
    }

    /// True if mouse button went down this frame, even if it was already released again
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// True if mouse button is held down
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// True if mouse button was released this frame
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|(curr, _)| *curr == ElementState::Released)
    }

    /// Current mouse cursor position in window coords
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Mouse movement since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// True if a finger touched down this frame
    pub fn touch_pressed(&self) -> bool {
        self.touch_pressed
    }

    /// True while a finger is on the screen
    pub fn touch_active(&self) -> bool {
        self.touch.is_some() && !self.touch_released
    }

    /// True if the tracked finger lifted this frame
    pub fn touch_released(&self) -> bool {
        self.touch_released
    }

    /// Position of the tracked finger in buffer coordinates
    pub fn touch_position(&self) -> Option<(f32, f32)> {
        self.touch.map(|t| t.position)
    }

    /// True if the left mouse button or a finger went down this frame
    pub fn pointer_pressed(&self) -> bool {
        self.mouse_pressed(MouseButton::Left) || self.touch_pressed
    }

    /// True while the left mouse button or a finger is down
    pub fn pointer_held(&self) -> bool {
        self.mouse_held(MouseButton::Left) || self.touch_active()
    }

    /// True if the left mouse button or the finger came up this frame
    pub fn pointer_released(&self) -> bool {
        self.mouse_released(MouseButton::Left) || self.touch_released
    }

    /// Touch position while a finger is tracked, otherwise the cursor
    pub fn pointer_position(&self) -> (f32, f32) {
        self.touch_position().unwrap_or(self.mouse_position)
    }

    /// Pointer movement since last frame
    pub fn pointer_delta(&self) -> (f32, f32) {
        if self.touch.is_some() {
            self.touch_delta
        } else {
            self.mouse_delta
        }
    }
}

#[cfg(test)]
impl Input {
    pub fn inject_key(&mut self, key: KeyCode, state: ElementState) {
        self.set_key(key, state);
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse(button, state);
    }

    pub fn inject_cursor(&mut self, x: f32, y: f32) {
        self.move_cursor((x, y));
    }

    pub fn inject_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) {
        // pass-through converter
        let position = CoordinateConverter::default().window_to_buffer(x, y);
        self.apply_touch(id, phase, position);
    }
}
