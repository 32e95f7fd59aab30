//! Per-frame snapshot of device states.
//!
//! [`InputSnapshot`] is an **owned**, read-only copy of every registered
//! device's state at one point in time (typically "after this frame's
//! post-poll"). It is produced by [`InputContext::snapshot`](crate::InputContext::snapshot)
//! and is cheap to clone for fan-out to other threads or to a recorder.
//!
//! # Semantics
//! - Devices appear in registration order, per class.
//! - Pressed members are listed by name, never by their dense state index,
//!   so a serialized snapshot stays meaningful across process runs.
//! - Untouched touchpad fingers keep their NaN position, which JSON renders
//!   as `null`.
//! - A snapshot does **not** update. Take a new one after the next frame.

use crate::codes::{GamepadAxes, GamepadButtons, GamepadModel, MouseButtons, Scancodes};
use crate::device::InputDevice;
use crate::gamepad::FingerData;
use crate::index_map::IndexedEnum;
use crate::registry::DeviceRegistry;
use glam::Vec2;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyboardSnapshot {
    pub handle: u32,
    pub name: String,
    pub pressed: Vec<Scancodes>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MouseSnapshot {
    pub handle: u32,
    pub name: String,
    pub pressed: Vec<MouseButtons>,
    pub position: Vec2,
    pub position_delta: Vec2,
    pub wheel: Vec2,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GamepadSnapshot {
    pub handle: u32,
    pub name: String,
    pub model: GamepadModel,
    pub player_index: Option<i32>,
    pub pressed: Vec<GamepadButtons>,
    pub axes: BTreeMap<GamepadAxes, f32>,
    pub touchpads: Vec<Vec<FingerData>>,
}

/// Owned snapshot of all device states.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InputSnapshot {
    pub keyboards: Vec<KeyboardSnapshot>,
    pub mice: Vec<MouseSnapshot>,
    pub gamepads: Vec<GamepadSnapshot>,
}

impl InputSnapshot {
    pub fn capture(registry: &DeviceRegistry) -> Self {
        let keyboards = registry
            .keyboards()
            .map(|k| KeyboardSnapshot {
                handle: k.native_handle(),
                name: k.name().to_owned(),
                pressed: k.pressed().collect(),
            })
            .collect();
        let mice = registry
            .mice()
            .map(|m| MouseSnapshot {
                handle: m.native_handle(),
                name: m.name().to_owned(),
                pressed: m.pressed().collect(),
                position: m.position(),
                position_delta: m.position_delta(),
                wheel: m.wheel(),
            })
            .collect();
        let gamepads = registry
            .gamepads()
            .map(|g| GamepadSnapshot {
                handle: g.native_handle(),
                name: g.name().to_owned(),
                model: g.model(),
                player_index: g.player_index(),
                pressed: g.pressed().collect(),
                axes: GamepadAxes::ALL
                    .iter()
                    .filter(|a| !a.is_none())
                    .map(|&a| (a, g.axis_value(a)))
                    .collect(),
                touchpads: g.touchpads().iter().map(|t| t.fingers().to_vec()).collect(),
            })
            .collect();
        Self { keyboards, mice, gamepads }
    }

    #[inline]
    pub fn keyboard(&self, handle: u32) -> Option<&KeyboardSnapshot> {
        self.keyboards.iter().find(|k| k.handle == handle)
    }

    #[inline]
    pub fn mouse(&self, handle: u32) -> Option<&MouseSnapshot> {
        self.mice.iter().find(|m| m.handle == handle)
    }

    #[inline]
    pub fn gamepad(&self, handle: u32) -> Option<&GamepadSnapshot> {
        self.gamepads.iter().find(|g| g.handle == handle)
    }

    pub fn is_empty(&self) -> bool {
        self.keyboards.is_empty() && self.mice.is_empty() && self.gamepads.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
