//! Keyboard state tracker.

use crate::codes::{Keys, Scancodes};
use crate::device::{DeviceClass, DeviceId, InputDevice};
use crate::event::Notification;
use crate::layout::NativeTables;
use crate::press_state::PressState;
use std::fmt;
use std::sync::Arc;

/// A tracked keyboard.
///
/// Press state is kept per **physical** position ([`Scancodes`]). Keyboards are
/// registered lazily: one only exists once it has produced a key event.
pub struct Keyboard {
    handle: u32,
    name: String,
    keys: PressState<Scancodes>,
    tables: Arc<NativeTables>,
}

impl Keyboard {
    pub fn new(handle: u32, name: Option<String>, tables: Arc<NativeTables>) -> Self {
        Self {
            handle,
            name: name.unwrap_or_else(|| "Unnamed Keyboard".to_owned()),
            keys: PressState::new(),
            tables,
        }
    }

    /// Whether the physical key is held. `false` for `Scancodes::None`.
    ///
    /// Takes a **scancode**; use [`key_to_scancode`](Self::key_to_scancode) to
    /// query by logical key.
    #[inline]
    pub fn is_pressed(&self, scancode: Scancodes) -> bool {
        self.keys.is_pressed(scancode)
    }

    /// Physical keys currently held.
    pub fn pressed(&self) -> impl Iterator<Item = Scancodes> + '_ {
        self.keys.pressed()
    }

    /// Layout-independent key → physical position under the active layout.
    pub fn key_to_scancode(&self, key: Keys) -> Scancodes {
        self.tables.layout.code_to_physical(key)
    }

    /// Physical position → the key it produces under the active layout.
    pub fn scancode_to_key(&self, scancode: Scancodes) -> Keys {
        self.tables.layout.physical_to_code(scancode)
    }

    /// Apply a key transition.
    ///
    /// Returns the KeyDown/KeyUp notification, or `None` when the scancode is the
    /// sentinel (nothing changes) or the event is an auto-repeat.
    pub fn process_key_event(
        &mut self,
        scancode: Scancodes,
        down: bool,
        repeat: bool,
    ) -> Option<Notification> {
        if !self.keys.set(scancode, down) {
            return None;
        }
        if repeat && down {
            return None;
        }
        Some(Notification::Key {
            device: DeviceId::keyboard(self.handle),
            key: self.scancode_to_key(scancode),
            scancode,
            down,
        })
    }
}

impl InputDevice for Keyboard {
    fn native_handle(&self) -> u32 {
        self.handle
    }
    fn class(&self) -> DeviceClass {
        DeviceClass::Keyboard
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyboard")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("keys", &self.keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> Keyboard {
        Keyboard::new(1, None, NativeTables::shared())
    }

    #[test]
    fn key_down_then_up() {
        let mut kb = keyboard();
        let note = kb.process_key_event(Scancodes::W, true, false);
        assert_eq!(
            note,
            Some(Notification::Key {
                device: DeviceId::keyboard(1),
                key: Keys::W,
                scancode: Scancodes::W,
                down: true,
            })
        );
        assert!(kb.is_pressed(Scancodes::W));
        kb.process_key_event(Scancodes::W, false, false);
        assert!(!kb.is_pressed(Scancodes::W));
    }

    #[test]
    fn sentinel_scancode_is_discarded() {
        let mut kb = keyboard();
        assert_eq!(kb.process_key_event(Scancodes::None, true, false), None);
        assert!(!kb.is_pressed(Scancodes::None));
        assert_eq!(kb.pressed().count(), 0);
    }

    #[test]
    fn repeats_keep_state_without_notifying() {
        let mut kb = keyboard();
        kb.process_key_event(Scancodes::Space, true, false);
        assert_eq!(kb.process_key_event(Scancodes::Space, true, true), None);
        assert!(kb.is_pressed(Scancodes::Space));
    }

    #[test]
    fn layout_queries_go_through_tables() {
        let kb = keyboard();
        assert_eq!(kb.key_to_scancode(Keys::Escape), Scancodes::Escape);
        assert_eq!(kb.scancode_to_key(Scancodes::Digit0), Keys::Alpha0);
        assert_eq!(kb.key_to_scancode(Keys::None), Scancodes::None);
        assert_eq!(kb.name(), "Unnamed Keyboard");
    }
}
