//! Raw events in, notifications out.
//!
//! The native event source hands the context an ordered stream of
//! [`NativeEvent`] records. Each record carries the event kind plus a
//! class-specific payload in **native** units and code spaces; translation into
//! the crate's code spaces happens in the dispatcher.
//!
//! Observers receive [`Notification`]s, raised synchronously while the event that
//! caused them is being processed.
//!
//! ## Value conventions
//! - **Instance ids (`which`)**: class-specific native handles. Mouse ids include
//!   reserved synthetic pointers (touch/pen emulation) that the dispatcher filters.
//! - **Mouse motion:** absolute position plus the event's own relative delta, both in
//!   window pixels.
//! - **Gamepad axes:** raw signed 16-bit values. Triggers report `0..=32767`.
//! - **Touchpads:** normalized positions, pressure in `[0, 1]`.
//!
//! Every record derives `serde`, so scripted streams can be stored as JSON
//! (see [`VirtualSource::from_json`](crate::backends::virtual_input::VirtualSource::from_json)).

use crate::codes::{GamepadButtons, Keys, MouseButtons, Scancodes};
use crate::device::{DeviceClass, DeviceId};
use serde::{Deserialize, Serialize};

/// Phase of a gamepad touchpad contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Down,
    Motion,
    Up,
}

/// One raw record from the native event stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NativeEvent {
    KeyboardAdded { which: u32 },
    KeyboardRemoved { which: u32 },
    MouseAdded { which: u32 },
    MouseRemoved { which: u32 },
    GamepadAdded { which: u32 },
    GamepadRemoved { which: u32 },
    /// The gamepad's button/axis layout changed.
    GamepadRemapped { which: u32 },

    Key {
        which: u32,
        /// Native scancode.
        scancode: u32,
        down: bool,
        #[serde(default)]
        repeat: bool,
    },
    MouseButton {
        which: u32,
        /// Native button index.
        button: u8,
        down: bool,
    },
    MouseMotion {
        which: u32,
        x: f32,
        y: f32,
        xrel: f32,
        yrel: f32,
    },
    MouseWheel {
        which: u32,
        x: f32,
        y: f32,
        /// The platform reports natural scrolling; deltas are negated.
        #[serde(default)]
        flipped: bool,
    },
    GamepadButton {
        which: u32,
        /// Native button index.
        button: u8,
        down: bool,
    },
    GamepadAxis {
        which: u32,
        /// Native axis index.
        axis: u8,
        value: i16,
    },
    GamepadTouchpad {
        which: u32,
        touchpad: i32,
        finger: i32,
        phase: TouchPhase,
        x: f32,
        y: f32,
        pressure: f32,
    },

    TextInput { text: String },
    Quit,
}

impl NativeEvent {
    /// Class and instance id of the device this event concerns, if any.
    pub fn device(&self) -> Option<DeviceId> {
        use NativeEvent::*;
        let (class, which) = match *self {
            KeyboardAdded { which } | KeyboardRemoved { which } | Key { which, .. } => {
                (DeviceClass::Keyboard, which)
            }
            MouseAdded { which }
            | MouseRemoved { which }
            | MouseButton { which, .. }
            | MouseMotion { which, .. }
            | MouseWheel { which, .. } => (DeviceClass::Mouse, which),
            GamepadAdded { which }
            | GamepadRemoved { which }
            | GamepadRemapped { which }
            | GamepadButton { which, .. }
            | GamepadAxis { which, .. }
            | GamepadTouchpad { which, .. } => (DeviceClass::Gamepad, which),
            TextInput { .. } | Quit => return None,
        };
        Some(DeviceId::new(class, which))
    }

    /// Connection (add/remove) events, as opposed to state events.
    pub fn is_connection(&self) -> bool {
        use NativeEvent::*;
        matches!(
            self,
            KeyboardAdded { .. }
                | KeyboardRemoved { .. }
                | MouseAdded { .. }
                | MouseRemoved { .. }
                | GamepadAdded { .. }
                | GamepadRemoved { .. }
        )
    }
}

/// Change notification delivered to listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    DeviceAdded(DeviceId),
    DeviceRemoved(DeviceId),
    /// Carries both the physical position and the key it produces under the layout.
    Key {
        device: DeviceId,
        key: Keys,
        scancode: Scancodes,
        down: bool,
    },
    MouseButton {
        device: DeviceId,
        button: MouseButtons,
        down: bool,
    },
    GamepadButton {
        device: DeviceId,
        button: GamepadButtons,
        down: bool,
    },
    /// Layout identity changed; no state was touched.
    GamepadRemapped { device: DeviceId },
    TextInput { text: String },
}

impl Notification {
    /// The device this notification concerns, if any.
    pub fn device(&self) -> Option<DeviceId> {
        match *self {
            Notification::DeviceAdded(id) | Notification::DeviceRemoved(id) => Some(id),
            Notification::Key { device, .. }
            | Notification::MouseButton { device, .. }
            | Notification::GamepadButton { device, .. }
            | Notification::GamepadRemapped { device } => Some(device),
            Notification::TextInput { .. } => None,
        }
    }
}
