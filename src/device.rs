//! Device identity and the common device interface.
//!
//! Every tracked device is identified by a [`DeviceId`]: its class plus the
//! native instance handle the event source assigned to it. Handles are unique
//! for the lifetime of one connection only; the OS may hand the same value to
//! a different device after a disconnect, so never treat a handle as a
//! persistent identity.

use crate::gamepad::Gamepad;
use crate::keyboard::Keyboard;
use crate::mouse::Mouse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device class tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceClass {
    Keyboard,
    Mouse,
    Gamepad,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceClass::Keyboard => "keyboard",
            DeviceClass::Mouse => "mouse",
            DeviceClass::Gamepad => "gamepad",
        })
    }
}

/// `(class, native handle)`: at most one live device per id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId {
    pub class: DeviceClass,
    pub handle: u32,
}

impl DeviceId {
    #[inline]
    pub const fn new(class: DeviceClass, handle: u32) -> Self {
        Self { class, handle }
    }

    #[inline]
    pub const fn keyboard(handle: u32) -> Self {
        Self::new(DeviceClass::Keyboard, handle)
    }

    #[inline]
    pub const fn mouse(handle: u32) -> Self {
        Self::new(DeviceClass::Mouse, handle)
    }

    #[inline]
    pub const fn gamepad(handle: u32) -> Self {
        Self::new(DeviceClass::Gamepad, handle)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class, self.handle)
    }
}

/// Common interface of every tracked device.
pub trait InputDevice {
    /// Class-specific native instance handle.
    fn native_handle(&self) -> u32;

    fn class(&self) -> DeviceClass;

    /// Human-readable name (best-effort, never empty).
    fn name(&self) -> &str;

    fn id(&self) -> DeviceId {
        DeviceId::new(self.class(), self.native_handle())
    }
}

/// An owned device of any class, as handed to the registry.
#[derive(Debug)]
pub enum Device {
    Keyboard(Keyboard),
    Mouse(Mouse),
    Gamepad(Gamepad),
}

impl Device {
    pub fn as_device_ref(&self) -> DeviceRef<'_> {
        match self {
            Device::Keyboard(k) => DeviceRef::Keyboard(k),
            Device::Mouse(m) => DeviceRef::Mouse(m),
            Device::Gamepad(g) => DeviceRef::Gamepad(g),
        }
    }
}

impl From<Keyboard> for Device {
    fn from(k: Keyboard) -> Self {
        Device::Keyboard(k)
    }
}

impl From<Mouse> for Device {
    fn from(m: Mouse) -> Self {
        Device::Mouse(m)
    }
}

impl From<Gamepad> for Device {
    fn from(g: Gamepad) -> Self {
        Device::Gamepad(g)
    }
}

/// A borrowed view of a registered device. Valid until the next removal of that id.
#[derive(Clone, Copy, Debug)]
pub enum DeviceRef<'a> {
    Keyboard(&'a Keyboard),
    Mouse(&'a Mouse),
    Gamepad(&'a Gamepad),
}

impl<'a> DeviceRef<'a> {
    fn inner(&self) -> &'a dyn InputDevice {
        match *self {
            DeviceRef::Keyboard(k) => k,
            DeviceRef::Mouse(m) => m,
            DeviceRef::Gamepad(g) => g,
        }
    }
}

impl InputDevice for Device {
    fn native_handle(&self) -> u32 {
        self.as_device_ref().native_handle()
    }
    fn class(&self) -> DeviceClass {
        self.as_device_ref().class()
    }
    fn name(&self) -> &str {
        match self {
            Device::Keyboard(k) => k.name(),
            Device::Mouse(m) => m.name(),
            Device::Gamepad(g) => g.name(),
        }
    }
}

impl InputDevice for DeviceRef<'_> {
    fn native_handle(&self) -> u32 {
        self.inner().native_handle()
    }
    fn class(&self) -> DeviceClass {
        self.inner().class()
    }
    fn name(&self) -> &str {
        self.inner().name()
    }
}

impl fmt::Display for DeviceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}
