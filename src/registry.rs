//! The device registry: single source of truth for which devices exist right now.
//!
//! Devices are owned here and nowhere else. Consumers borrow them through the
//! class lookups ([`keyboard`](DeviceRegistry::keyboard), [`mouse`](DeviceRegistry::mouse),
//! [`gamepad`](DeviceRegistry::gamepad)) or the ordered iterators; a borrow is valid
//! until the next removal of that id.
//!
//! ## Invariants
//! - At most one live device per [`DeviceId`].
//! - `add` and `remove` are idempotent: a second `add` of a present id, or a
//!   `remove` of an absent one, changes nothing and returns nothing.
//! - Iteration follows registration order, for the flat view and per class.

use crate::device::{Device, DeviceClass, DeviceId, DeviceRef, InputDevice};
use crate::event::Notification;
use crate::gamepad::Gamepad;
use crate::keyboard::Keyboard;
use crate::mouse::Mouse;
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DeviceRegistry {
    order: Vec<DeviceId>,
    keyboards: HashMap<u32, Keyboard>,
    mice: HashMap<u32, Mouse>,
    gamepads: HashMap<u32, Gamepad>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device. Returns the `DeviceAdded` notification, or `None` (and
    /// drops `device`) if its id is already present.
    pub fn add(&mut self, device: Device) -> Option<Notification> {
        let id = device.id();
        if self.contains(id) {
            debug!("registry: {id} already present, ignoring add");
            return None;
        }
        info!("registry: added {}", device.as_device_ref());
        match device {
            Device::Keyboard(k) => {
                self.keyboards.insert(id.handle, k);
            }
            Device::Mouse(m) => {
                self.mice.insert(id.handle, m);
            }
            Device::Gamepad(g) => {
                self.gamepads.insert(id.handle, g);
            }
        }
        self.order.push(id);
        Some(Notification::DeviceAdded(id))
    }

    /// Unregister a device, handing back its final state. `None` if absent.
    pub fn remove(&mut self, id: DeviceId) -> Option<Device> {
        let device: Device = match id.class {
            DeviceClass::Keyboard => self.keyboards.remove(&id.handle)?.into(),
            DeviceClass::Mouse => self.mice.remove(&id.handle)?.into(),
            DeviceClass::Gamepad => self.gamepads.remove(&id.handle)?.into(),
        };
        self.order.retain(|&o| o != id);
        info!("registry: removed {}", device.as_device_ref());
        Some(device)
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        match id.class {
            DeviceClass::Keyboard => self.keyboards.contains_key(&id.handle),
            DeviceClass::Mouse => self.mice.contains_key(&id.handle),
            DeviceClass::Gamepad => self.gamepads.contains_key(&id.handle),
        }
    }

    pub fn get(&self, id: DeviceId) -> Option<DeviceRef<'_>> {
        match id.class {
            DeviceClass::Keyboard => self.keyboard(id.handle).map(DeviceRef::Keyboard),
            DeviceClass::Mouse => self.mouse(id.handle).map(DeviceRef::Mouse),
            DeviceClass::Gamepad => self.gamepad(id.handle).map(DeviceRef::Gamepad),
        }
    }

    #[inline]
    pub fn keyboard(&self, handle: u32) -> Option<&Keyboard> {
        self.keyboards.get(&handle)
    }

    #[inline]
    pub fn mouse(&self, handle: u32) -> Option<&Mouse> {
        self.mice.get(&handle)
    }

    #[inline]
    pub fn gamepad(&self, handle: u32) -> Option<&Gamepad> {
        self.gamepads.get(&handle)
    }

    pub(crate) fn keyboard_mut(&mut self, handle: u32) -> Option<&mut Keyboard> {
        self.keyboards.get_mut(&handle)
    }

    pub(crate) fn mouse_mut(&mut self, handle: u32) -> Option<&mut Mouse> {
        self.mice.get_mut(&handle)
    }

    pub(crate) fn gamepad_mut(&mut self, handle: u32) -> Option<&mut Gamepad> {
        self.gamepads.get_mut(&handle)
    }

    pub(crate) fn mice_mut(&mut self) -> impl Iterator<Item = &mut Mouse> + '_ {
        self.mice.values_mut()
    }

    /// Every registered id, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.order.iter().copied()
    }

    /// Every registered device, in registration order.
    pub fn devices(&self) -> impl Iterator<Item = DeviceRef<'_>> + '_ {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    pub fn keyboards(&self) -> impl Iterator<Item = &Keyboard> + '_ {
        self.handles_of(DeviceClass::Keyboard)
            .filter_map(|h| self.keyboards.get(&h))
    }

    pub fn mice(&self) -> impl Iterator<Item = &Mouse> + '_ {
        self.handles_of(DeviceClass::Mouse)
            .filter_map(|h| self.mice.get(&h))
    }

    pub fn gamepads(&self) -> impl Iterator<Item = &Gamepad> + '_ {
        self.handles_of(DeviceClass::Gamepad)
            .filter_map(|h| self.gamepads.get(&h))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn count(&self, class: DeviceClass) -> usize {
        match class {
            DeviceClass::Keyboard => self.keyboards.len(),
            DeviceClass::Mouse => self.mice.len(),
            DeviceClass::Gamepad => self.gamepads.len(),
        }
    }

    /// Drop every device without notifying anyone.
    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.keyboards.clear();
        self.mice.clear();
        self.gamepads.clear();
    }

    fn handles_of(&self, class: DeviceClass) -> impl Iterator<Item = u32> + '_ {
        self.order
            .iter()
            .filter(move |id| id.class == class)
            .map(|id| id.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::GamepadInfo;
    use crate::layout::NativeTables;

    fn mouse(handle: u32) -> Device {
        Mouse::new(handle, None).into()
    }

    #[test]
    fn double_add_is_noop() {
        let mut reg = DeviceRegistry::new();
        assert_eq!(reg.add(mouse(3)), Some(Notification::DeviceAdded(DeviceId::mouse(3))));
        assert_eq!(reg.add(mouse(3)), None);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.mice().count(), 1);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut reg = DeviceRegistry::new();
        reg.add(mouse(3));
        assert!(reg.remove(DeviceId::mouse(3)).is_some());
        assert!(reg.remove(DeviceId::mouse(3)).is_none());
        assert!(reg.is_empty());
        assert!(reg.mouse(3).is_none());
    }

    #[test]
    fn same_handle_in_different_classes_is_distinct() {
        let mut reg = DeviceRegistry::new();
        reg.add(mouse(1));
        reg.add(Keyboard::new(1, None, NativeTables::shared()).into());
        reg.add(Gamepad::new(1, GamepadInfo::default()).into());
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.count(DeviceClass::Keyboard), 1);
        reg.remove(DeviceId::keyboard(1));
        assert!(reg.mouse(1).is_some());
        assert!(reg.gamepad(1).is_some());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut reg = DeviceRegistry::new();
        for h in [9, 2, 5] {
            reg.add(mouse(h));
        }
        reg.add(Keyboard::new(4, None, NativeTables::shared()).into());
        let handles: Vec<u32> = reg.mice().map(|m| m.native_handle()).collect();
        assert_eq!(handles, vec![9, 2, 5]);
        let ids: Vec<DeviceId> = reg.ids().collect();
        assert_eq!(ids.last(), Some(&DeviceId::keyboard(4)));
        assert_eq!(reg.devices().count(), 4);
    }
}
