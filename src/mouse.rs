//! Mouse state tracker.
//!
//! ## Frame coherence
//! Position is absolute and overwritten by every motion event. The position
//! delta and the wheel are **frame-scoped**:
//! - relative motion is accumulated into a pending sum as events arrive and only
//!   published by [`Mouse::end_frame`], so the delta a consumer reads is exactly one
//!   value per frame regardless of how many motion events arrived;
//! - the wheel accumulates during the frame and is zeroed by [`Mouse::begin_frame`].

use crate::codes::MouseButtons;
use crate::device::{DeviceClass, DeviceId, InputDevice};
use crate::event::Notification;
use crate::press_state::PressState;
use glam::Vec2;

/// A tracked mouse. Registered lazily, on its first button/motion/wheel event.
#[derive(Debug)]
pub struct Mouse {
    handle: u32,
    name: String,
    buttons: PressState<MouseButtons>,
    position: Vec2,
    position_delta: Vec2,
    pending_delta: Vec2,
    wheel: Vec2,
}

impl Mouse {
    pub fn new(handle: u32, name: Option<String>) -> Self {
        Self {
            handle,
            name: name.unwrap_or_else(|| "Unnamed Mouse".to_owned()),
            buttons: PressState::new(),
            position: Vec2::ZERO,
            position_delta: Vec2::ZERO,
            pending_delta: Vec2::ZERO,
            wheel: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn is_pressed(&self, button: MouseButtons) -> bool {
        self.buttons.is_pressed(button)
    }

    pub fn pressed(&self) -> impl Iterator<Item = MouseButtons> + '_ {
        self.buttons.pressed()
    }

    /// Absolute position as of the last motion event.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated over the last completed frame.
    #[inline]
    pub fn position_delta(&self) -> Vec2 {
        self.position_delta
    }

    /// Wheel movement accumulated over the current frame.
    #[inline]
    pub fn wheel(&self) -> Vec2 {
        self.wheel
    }

    pub fn process_button_event(&mut self, button: MouseButtons, down: bool) -> Option<Notification> {
        if !self.buttons.set(button, down) {
            return None;
        }
        Some(Notification::MouseButton {
            device: DeviceId::mouse(self.handle),
            button,
            down,
        })
    }

    pub fn process_motion_event(&mut self, position: Vec2, relative: Vec2) {
        self.position = position;
        self.pending_delta += relative;
    }

    pub fn process_wheel_event(&mut self, delta: Vec2) {
        self.wheel += delta;
    }

    /// Pre-poll hook: the wheel is a per-frame impulse.
    pub fn begin_frame(&mut self) {
        self.wheel = Vec2::ZERO;
    }

    /// Post-poll hook: publish this frame's accumulated motion.
    pub fn end_frame(&mut self) {
        self.position_delta = std::mem::take(&mut self.pending_delta);
    }
}

impl InputDevice for Mouse {
    fn native_handle(&self) -> u32 {
        self.handle
    }
    fn class(&self) -> DeviceClass {
        DeviceClass::Mouse
    }
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn buttons_raise_notifications() {
        let mut m = Mouse::new(4, None);
        let note = m.process_button_event(MouseButtons::Mouse1, true);
        assert_eq!(
            note,
            Some(Notification::MouseButton {
                device: DeviceId::mouse(4),
                button: MouseButtons::Mouse1,
                down: true,
            })
        );
        assert!(m.is_pressed(MouseButtons::Mouse1));
        assert_eq!(m.process_button_event(MouseButtons::None, true), None);
    }

    #[test]
    fn delta_is_published_once_per_frame() {
        let mut m = Mouse::new(0, None);
        m.begin_frame();
        m.process_motion_event(Vec2::new(10.0, 10.0), Vec2::new(2.0, 1.0));
        m.process_motion_event(Vec2::new(13.0, 9.0), Vec2::new(3.0, -1.0));
        // Not visible until the frame closes.
        assert_eq!(m.position_delta(), Vec2::ZERO);
        assert_eq!(m.position(), Vec2::new(13.0, 9.0));
        m.end_frame();
        assert_eq!(m.position_delta(), Vec2::new(5.0, 0.0));

        m.begin_frame();
        m.end_frame();
        assert_eq!(m.position_delta(), Vec2::ZERO);
        assert_eq!(m.position(), Vec2::new(13.0, 9.0));
    }

    #[test]
    fn wheel_accumulates_until_next_frame() {
        let mut m = Mouse::new(0, None);
        m.begin_frame();
        m.process_wheel_event(Vec2::new(1.0, 0.0));
        m.process_wheel_event(Vec2::new(0.0, 2.0));
        m.end_frame();
        assert_eq!(m.wheel(), Vec2::new(1.0, 2.0));
        m.begin_frame();
        m.end_frame();
        assert_eq!(m.wheel(), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn frame_delta_is_sum_of_event_deltas(
            deltas in prop::collection::vec((-500i32..500, -500i32..500), 0..32)
        ) {
            let mut m = Mouse::new(0, None);
            m.begin_frame();
            let mut expected = Vec2::ZERO;
            for (i, &(dx, dy)) in deltas.iter().enumerate() {
                let rel = Vec2::new(dx as f32, dy as f32);
                expected += rel;
                m.process_motion_event(Vec2::splat(i as f32), rel);
            }
            m.end_frame();
            prop_assert_eq!(m.position_delta(), expected);
        }
    }
}
