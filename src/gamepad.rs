//! Gamepad state tracker.
//!
//! Gamepads are registered eagerly, when the source reports the connection and
//! the native handle opens. Their shape (touchpad and finger counts, model,
//! player slot) is fixed at open time by [`GamepadInfo`].
//!
//! ## Axis normalization
//! Native axes are signed 16-bit. Sticks map to `[-1, 1]` (`-32768` clamps to
//! `-1`), triggers to `[0, 1]` (negative raw values clamp to `0`).
//!
//! ## Touchpads
//! Every finger slot starts untouched: pressure `-1`, position NaN. A slot is
//! touching exactly when its pressure is `>= 0`. Out-of-range touchpad or finger
//! indices are ignored.

use crate::backends::GamepadInfo;
use crate::codes::{GamepadAxes, GamepadButtons, GamepadModel};
use crate::device::{DeviceClass, DeviceId, InputDevice};
use crate::event::{Notification, TouchPhase};
use crate::index_map::IndexedEnum;
use crate::press_state::PressState;
use glam::Vec2;
use serde::Serialize;

/// One finger slot on a touchpad.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FingerData {
    /// Probably normalized. NaN when not touching.
    pub position: Vec2,
    /// `[0, 1]` while touching, `-1` otherwise.
    pub pressure: f32,
}

impl FingerData {
    pub const UNTOUCHED: FingerData = FingerData {
        position: Vec2::NAN,
        pressure: -1.0,
    };

    #[inline]
    pub fn is_touching(&self) -> bool {
        self.pressure >= 0.0
    }
}

impl Default for FingerData {
    fn default() -> Self {
        Self::UNTOUCHED
    }
}

/// A touchpad on a gamepad. The number of slots is the maximum number of
/// simultaneous touches it supports.
#[derive(Clone, Debug, PartialEq)]
pub struct Touchpad {
    fingers: Vec<FingerData>,
}

impl Touchpad {
    fn with_fingers(count: usize) -> Self {
        Self {
            fingers: vec![FingerData::UNTOUCHED; count],
        }
    }

    pub fn fingers(&self) -> &[FingerData] {
        &self.fingers
    }
}

#[derive(Debug)]
pub struct Gamepad {
    handle: u32,
    name: String,
    model: GamepadModel,
    player_index: Option<i32>,
    buttons: PressState<GamepadButtons>,
    axes: Vec<f32>,
    touchpads: Vec<Touchpad>,
}

impl Gamepad {
    pub fn new(handle: u32, info: GamepadInfo) -> Self {
        Self {
            handle,
            name: info.name.unwrap_or_else(|| "Unnamed Gamepad".to_owned()),
            model: info.model,
            player_index: info.player_index,
            buttons: PressState::new(),
            axes: vec![0.0; GamepadAxes::index_map().len()],
            touchpads: info
                .touchpads
                .iter()
                .map(|&fingers| Touchpad::with_fingers(fingers))
                .collect(),
        }
    }

    pub fn model(&self) -> GamepadModel {
        self.model
    }

    pub fn player_index(&self) -> Option<i32> {
        self.player_index
    }

    pub fn touchpads(&self) -> &[Touchpad] {
        &self.touchpads
    }

    #[inline]
    pub fn is_pressed(&self, button: GamepadButtons) -> bool {
        self.buttons.is_pressed(button)
    }

    pub fn pressed(&self) -> impl Iterator<Item = GamepadButtons> + '_ {
        self.buttons.pressed()
    }

    /// Normalized axis value; `0.0` for `GamepadAxes::None`.
    pub fn axis_value(&self, axis: GamepadAxes) -> f32 {
        GamepadAxes::index_map()
            .state_index(axis)
            .map_or(0.0, |idx| self.axes[idx])
    }

    pub fn process_button_event(
        &mut self,
        button: GamepadButtons,
        down: bool,
    ) -> Option<Notification> {
        if !self.buttons.set(button, down) {
            return None;
        }
        Some(Notification::GamepadButton {
            device: DeviceId::gamepad(self.handle),
            button,
            down,
        })
    }

    /// Store a raw 16-bit axis reading, normalized. Returns `false` for the sentinel.
    pub fn process_axis_event(&mut self, axis: GamepadAxes, raw: i16) -> bool {
        let Some(idx) = GamepadAxes::index_map().state_index(axis) else {
            return false;
        };
        self.axes[idx] = normalize_axis(axis, raw);
        true
    }

    /// Update one finger slot. Returns `false` when an index is out of range.
    pub fn process_touchpad_event(
        &mut self,
        touchpad: i32,
        finger: i32,
        phase: TouchPhase,
        position: Vec2,
        pressure: f32,
    ) -> bool {
        let Some(pad) = usize::try_from(touchpad)
            .ok()
            .and_then(|t| self.touchpads.get_mut(t))
        else {
            return false;
        };
        let Some(slot) = usize::try_from(finger)
            .ok()
            .and_then(|f| pad.fingers.get_mut(f))
        else {
            return false;
        };
        // A contact without a usable pressure reading is not a touch.
        *slot = match phase {
            TouchPhase::Down | TouchPhase::Motion if pressure >= 0.0 => FingerData {
                position,
                pressure,
            },
            _ => FingerData::UNTOUCHED,
        };
        true
    }

    /// Layout identity changed. No state is touched.
    pub fn process_remap_event(&self) -> Notification {
        Notification::GamepadRemapped {
            device: DeviceId::gamepad(self.handle),
        }
    }
}

impl InputDevice for Gamepad {
    fn native_handle(&self) -> u32 {
        self.handle
    }
    fn class(&self) -> DeviceClass {
        DeviceClass::Gamepad
    }
    fn name(&self) -> &str {
        &self.name
    }
}

fn normalize_axis(axis: GamepadAxes, raw: i16) -> f32 {
    let v = raw as f32 / i16::MAX as f32;
    if axis.is_trigger() {
        v.clamp(0.0, 1.0)
    } else {
        v.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_with_touchpad() -> Gamepad {
        Gamepad::new(
            7,
            GamepadInfo {
                name: Some("Test Pad".into()),
                model: GamepadModel::Dualsense,
                player_index: Some(0),
                touchpads: vec![2],
            },
        )
    }

    #[test]
    fn buttons_are_independent() {
        let mut gp = pad_with_touchpad();
        gp.process_button_event(GamepadButtons::FacePadSouth, true);
        assert!(gp.is_pressed(GamepadButtons::FacePadSouth));
        assert!(!gp.is_pressed(GamepadButtons::FacePadNorth));
        gp.process_button_event(GamepadButtons::FacePadSouth, false);
        assert!(!gp.is_pressed(GamepadButtons::FacePadSouth));
        assert_eq!(gp.process_button_event(GamepadButtons::None, true), None);
    }

    #[test]
    fn axes_are_normalized() {
        let mut gp = pad_with_touchpad();
        gp.process_axis_event(GamepadAxes::LeftStickX, i16::MIN);
        gp.process_axis_event(GamepadAxes::LeftStickY, i16::MAX);
        gp.process_axis_event(GamepadAxes::LeftTrigger, -100);
        gp.process_axis_event(GamepadAxes::RightTrigger, i16::MAX);
        assert_eq!(gp.axis_value(GamepadAxes::LeftStickX), -1.0);
        assert_eq!(gp.axis_value(GamepadAxes::LeftStickY), 1.0);
        assert_eq!(gp.axis_value(GamepadAxes::LeftTrigger), 0.0);
        assert_eq!(gp.axis_value(GamepadAxes::RightTrigger), 1.0);
        assert!(!gp.process_axis_event(GamepadAxes::None, 100));
        assert_eq!(gp.axis_value(GamepadAxes::None), 0.0);
    }

    #[test]
    fn touch_down_then_up_resets_slot() {
        let mut gp = pad_with_touchpad();
        assert!(!gp.touchpads()[0].fingers()[0].is_touching());
        gp.process_touchpad_event(0, 0, TouchPhase::Down, Vec2::new(0.5, 0.5), 0.8);
        let f = gp.touchpads()[0].fingers()[0];
        assert!(f.is_touching());
        assert_eq!(f.position, Vec2::new(0.5, 0.5));
        gp.process_touchpad_event(0, 0, TouchPhase::Up, Vec2::new(0.6, 0.6), 0.0);
        let f = gp.touchpads()[0].fingers()[0];
        assert!(!f.is_touching());
        assert!(f.position.x.is_nan() && f.position.y.is_nan());
    }

    #[test]
    fn contacts_without_pressure_are_not_touching() {
        let mut gp = pad_with_touchpad();
        gp.process_touchpad_event(0, 0, TouchPhase::Down, Vec2::new(0.2, 0.2), 0.5);
        assert!(gp.process_touchpad_event(0, 0, TouchPhase::Motion, Vec2::new(0.3, 0.3), -1.0));
        assert_eq!(gp.touchpads()[0].fingers()[0].pressure, -1.0);
        assert!(!gp.touchpads()[0].fingers()[0].is_touching());

        assert!(gp.process_touchpad_event(0, 1, TouchPhase::Down, Vec2::ONE, f32::NAN));
        let f = gp.touchpads()[0].fingers()[1];
        assert!(!f.is_touching());
        assert!(f.position.x.is_nan());

        gp.process_touchpad_event(0, 1, TouchPhase::Down, Vec2::ONE, 0.0);
        assert!(gp.touchpads()[0].fingers()[1].is_touching());
    }

    #[test]
    fn out_of_range_touches_are_ignored() {
        let mut gp = pad_with_touchpad();
        assert!(!gp.process_touchpad_event(1, 0, TouchPhase::Down, Vec2::ONE, 1.0));
        assert!(!gp.process_touchpad_event(0, 2, TouchPhase::Down, Vec2::ONE, 1.0));
        assert!(!gp.process_touchpad_event(-1, 0, TouchPhase::Down, Vec2::ONE, 1.0));
        assert!(!gp.process_touchpad_event(0, -1, TouchPhase::Down, Vec2::ONE, 1.0));
        assert!(gp.touchpads()[0].fingers().iter().all(|f| !f.is_touching()));
    }

    #[test]
    fn remap_leaves_state_alone() {
        let mut gp = pad_with_touchpad();
        gp.process_button_event(GamepadButtons::Start, true);
        let note = gp.process_remap_event();
        assert_eq!(note, Notification::GamepadRemapped { device: DeviceId::gamepad(7) });
        assert!(gp.is_pressed(GamepadButtons::Start));
    }
}
