//! Immutable code tables between native codes and the crate's code spaces.
//!
//! The tables are pure data: they are built once, shared behind an [`Arc`], and
//! only ever queried. An unmapped code always resolves to the target
//! enumeration's `None` sentinel; lookups never fail.
//!
//! ## Native code conventions used by [`NativeTables::standard`]
//! - **Keyboard:** USB HID keyboard-page usage ids (`0x04` = A, `0x28` = Return, ...).
//! - **Mouse buttons:** 1-based, `1` left, `2` middle, `3` right, `4`/`5` side buttons.
//! - **Gamepad buttons:** positional, `0` south, `1` east, `2` west, `3` north, `4` back,
//!   `5` guide (unmapped), `6` start, `7`/`8` stick presses, `9`/`10` shoulders,
//!   `11..=14` dpad up/down/left/right, `20` touchpad.
//! - **Gamepad axes:** `0` left X, `1` left Y, `2` right X, `3` right Y, `4`/`5` triggers.

use crate::codes::{GamepadAxes, GamepadButtons, Keys, MouseButtons, Scancodes};
use crate::index_map::IndexedEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

/// One-to-one lookup between a native code `N` and a crate code `C`.
#[derive(Clone, Debug)]
pub struct CodeTable<N, C> {
    forward: HashMap<N, C>,
    reverse: HashMap<C, N>,
}

impl<N, C> CodeTable<N, C>
where
    N: Copy + Eq + Hash,
    C: IndexedEnum,
{
    pub fn from_pairs(pairs: impl IntoIterator<Item = (N, C)>) -> Self {
        let mut table = Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        };
        for (native, code) in pairs {
            table.insert(native, code);
        }
        table
    }

    /// Insert a pair, evicting any previous pairing of either side.
    ///
    /// Pairs naming the sentinel are ignored.
    fn insert(&mut self, native: N, code: C) {
        if code.is_none() {
            return;
        }
        if let Some(old_code) = self.forward.remove(&native) {
            self.reverse.remove(&old_code);
        }
        if let Some(old_native) = self.reverse.remove(&code) {
            self.forward.remove(&old_native);
        }
        self.forward.insert(native, code);
        self.reverse.insert(code, native);
    }

    /// Native → crate code; `C::NONE` when unmapped.
    #[inline]
    pub fn to_code(&self, native: N) -> C {
        self.forward.get(&native).copied().unwrap_or(C::NONE)
    }

    /// Crate code → native.
    #[inline]
    pub fn to_native(&self, code: C) -> Option<N> {
        self.reverse.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Remaps the key produced by one physical position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOverride {
    pub scancode: Scancodes,
    pub key: Keys,
}

/// Physical ↔ logical key conversion for one keyboard layout.
#[derive(Clone, Debug)]
pub struct KeyboardLayout {
    table: CodeTable<Scancodes, Keys>,
}

impl KeyboardLayout {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Scancodes, Keys)>) -> Self {
        Self {
            table: CodeTable::from_pairs(pairs.into_iter().filter(|(sc, _)| !sc.is_none())),
        }
    }

    /// US QWERTY.
    pub fn us() -> Self {
        Self::from_pairs(US_LAYOUT.iter().copied())
    }

    /// A copy of this layout with `overrides` applied in order.
    pub fn with_overrides(&self, overrides: &[KeyOverride]) -> Self {
        let mut table = self.table.clone();
        for o in overrides.iter().filter(|o| !o.scancode.is_none()) {
            table.insert(o.scancode, o.key);
        }
        Self { table }
    }

    /// Layout-independent key → the physical position producing it.
    #[inline]
    pub fn code_to_physical(&self, key: Keys) -> Scancodes {
        self.table.to_native(key).unwrap_or(Scancodes::None)
    }

    /// Physical position → the key it produces under this layout.
    #[inline]
    pub fn physical_to_code(&self, scancode: Scancodes) -> Keys {
        if scancode.is_none() {
            return Keys::None;
        }
        self.table.to_code(scancode)
    }
}

/// Every native → crate table the dispatcher needs.
#[derive(Clone, Debug)]
pub struct NativeTables {
    pub scancodes: CodeTable<u32, Scancodes>,
    pub mouse_buttons: CodeTable<u8, MouseButtons>,
    pub gamepad_buttons: CodeTable<u8, GamepadButtons>,
    pub gamepad_axes: CodeTable<u8, GamepadAxes>,
    pub layout: KeyboardLayout,
}

impl NativeTables {
    /// Tables for the conventions documented at module level, US layout.
    pub fn standard() -> Self {
        Self {
            scancodes: CodeTable::from_pairs(HID_SCANCODES.iter().copied()),
            mouse_buttons: CodeTable::from_pairs([
                (1, MouseButtons::Mouse1),
                (2, MouseButtons::Mouse3),
                (3, MouseButtons::Mouse2),
                (4, MouseButtons::Mouse4),
                (5, MouseButtons::Mouse5),
            ]),
            gamepad_buttons: CodeTable::from_pairs([
                (0, GamepadButtons::FacePadSouth),
                (1, GamepadButtons::FacePadEast),
                (2, GamepadButtons::FacePadWest),
                (3, GamepadButtons::FacePadNorth),
                (4, GamepadButtons::Select),
                (6, GamepadButtons::Start),
                (7, GamepadButtons::LeftStickPress),
                (8, GamepadButtons::RightStickPress),
                (9, GamepadButtons::LeftShoulder),
                (10, GamepadButtons::RightShoulder),
                (11, GamepadButtons::DPadNorth),
                (12, GamepadButtons::DPadSouth),
                (13, GamepadButtons::DPadWest),
                (14, GamepadButtons::DPadEast),
                (20, GamepadButtons::TouchpadPress),
            ]),
            gamepad_axes: CodeTable::from_pairs([
                (0, GamepadAxes::LeftStickX),
                (1, GamepadAxes::LeftStickY),
                (2, GamepadAxes::RightStickX),
                (3, GamepadAxes::RightStickY),
                (4, GamepadAxes::LeftTrigger),
                (5, GamepadAxes::RightTrigger),
            ]),
            layout: KeyboardLayout::us(),
        }
    }

    /// Process-wide standard tables, built on first use.
    pub fn shared() -> Arc<Self> {
        static TABLES: OnceLock<Arc<NativeTables>> = OnceLock::new();
        TABLES.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    /// Standard tables with key overrides applied; shares the process-wide
    /// tables when there is nothing to override.
    pub fn with_key_overrides(overrides: &[KeyOverride]) -> Arc<Self> {
        if overrides.is_empty() {
            return Self::shared();
        }
        let mut tables = Self::standard();
        tables.layout = tables.layout.with_overrides(overrides);
        Arc::new(tables)
    }
}

const HID_SCANCODES: &[(u32, Scancodes)] = &[
    (0x04, Scancodes::A),
    (0x05, Scancodes::B),
    (0x06, Scancodes::C),
    (0x07, Scancodes::D),
    (0x08, Scancodes::E),
    (0x09, Scancodes::F),
    (0x0A, Scancodes::G),
    (0x0B, Scancodes::H),
    (0x0C, Scancodes::I),
    (0x0D, Scancodes::J),
    (0x0E, Scancodes::K),
    (0x0F, Scancodes::L),
    (0x10, Scancodes::M),
    (0x11, Scancodes::N),
    (0x12, Scancodes::O),
    (0x13, Scancodes::P),
    (0x14, Scancodes::Q),
    (0x15, Scancodes::R),
    (0x16, Scancodes::S),
    (0x17, Scancodes::T),
    (0x18, Scancodes::U),
    (0x19, Scancodes::V),
    (0x1A, Scancodes::W),
    (0x1B, Scancodes::X),
    (0x1C, Scancodes::Y),
    (0x1D, Scancodes::Z),
    (0x1E, Scancodes::Digit1),
    (0x1F, Scancodes::Digit2),
    (0x20, Scancodes::Digit3),
    (0x21, Scancodes::Digit4),
    (0x22, Scancodes::Digit5),
    (0x23, Scancodes::Digit6),
    (0x24, Scancodes::Digit7),
    (0x25, Scancodes::Digit8),
    (0x26, Scancodes::Digit9),
    (0x27, Scancodes::Digit0),
    (0x28, Scancodes::Return),
    (0x29, Scancodes::Escape),
    (0x2A, Scancodes::Backspace),
    (0x2B, Scancodes::Tab),
    (0x2C, Scancodes::Space),
    (0x2D, Scancodes::Minus),
    (0x2E, Scancodes::Equals),
    (0x2F, Scancodes::LeftBracket),
    (0x30, Scancodes::RightBracket),
    (0x31, Scancodes::Backslash),
    (0x32, Scancodes::NonUsHash),
    (0x33, Scancodes::Semicolon),
    (0x34, Scancodes::Apostrophe),
    (0x35, Scancodes::Grave),
    (0x36, Scancodes::Comma),
    (0x37, Scancodes::Period),
    (0x38, Scancodes::Slash),
    (0x39, Scancodes::Capslock),
    (0x3A, Scancodes::F1),
    (0x3B, Scancodes::F2),
    (0x3C, Scancodes::F3),
    (0x3D, Scancodes::F4),
    (0x3E, Scancodes::F5),
    (0x3F, Scancodes::F6),
    (0x40, Scancodes::F7),
    (0x41, Scancodes::F8),
    (0x42, Scancodes::F9),
    (0x43, Scancodes::F10),
    (0x44, Scancodes::F11),
    (0x45, Scancodes::F12),
    (0x46, Scancodes::PrintScreen),
    (0x47, Scancodes::ScrollLock),
    (0x48, Scancodes::Pause),
    (0x49, Scancodes::Insert),
    (0x4A, Scancodes::Home),
    (0x4B, Scancodes::PageUp),
    (0x4C, Scancodes::Delete),
    (0x4D, Scancodes::End),
    (0x4E, Scancodes::PageDown),
    (0x4F, Scancodes::Right),
    (0x50, Scancodes::Left),
    (0x51, Scancodes::Down),
    (0x52, Scancodes::Up),
    (0x53, Scancodes::NumLockClear),
    (0x54, Scancodes::KpDivide),
    (0x55, Scancodes::KpMultiply),
    (0x56, Scancodes::KpMinus),
    (0x57, Scancodes::KpPlus),
    (0x58, Scancodes::KpEnter),
    (0x59, Scancodes::Kp1),
    (0x5A, Scancodes::Kp2),
    (0x5B, Scancodes::Kp3),
    (0x5C, Scancodes::Kp4),
    (0x5D, Scancodes::Kp5),
    (0x5E, Scancodes::Kp6),
    (0x5F, Scancodes::Kp7),
    (0x60, Scancodes::Kp8),
    (0x61, Scancodes::Kp9),
    (0x62, Scancodes::Kp0),
    (0x63, Scancodes::KpPeriod),
    (0x64, Scancodes::NonUsBackslash),
    (0x65, Scancodes::Application),
    (0xE0, Scancodes::LCtrl),
    (0xE1, Scancodes::LShift),
    (0xE2, Scancodes::LAlt),
    (0xE3, Scancodes::LGui),
    (0xE4, Scancodes::RCtrl),
    (0xE5, Scancodes::RShift),
    (0xE6, Scancodes::RAlt),
    (0xE7, Scancodes::RGui),
];

const US_LAYOUT: &[(Scancodes, Keys)] = &[
    (Scancodes::A, Keys::A),
    (Scancodes::B, Keys::B),
    (Scancodes::C, Keys::C),
    (Scancodes::D, Keys::D),
    (Scancodes::E, Keys::E),
    (Scancodes::F, Keys::F),
    (Scancodes::G, Keys::G),
    (Scancodes::H, Keys::H),
    (Scancodes::I, Keys::I),
    (Scancodes::J, Keys::J),
    (Scancodes::K, Keys::K),
    (Scancodes::L, Keys::L),
    (Scancodes::M, Keys::M),
    (Scancodes::N, Keys::N),
    (Scancodes::O, Keys::O),
    (Scancodes::P, Keys::P),
    (Scancodes::Q, Keys::Q),
    (Scancodes::R, Keys::R),
    (Scancodes::S, Keys::S),
    (Scancodes::T, Keys::T),
    (Scancodes::U, Keys::U),
    (Scancodes::V, Keys::V),
    (Scancodes::W, Keys::W),
    (Scancodes::X, Keys::X),
    (Scancodes::Y, Keys::Y),
    (Scancodes::Z, Keys::Z),
    (Scancodes::Digit1, Keys::Alpha1),
    (Scancodes::Digit2, Keys::Alpha2),
    (Scancodes::Digit3, Keys::Alpha3),
    (Scancodes::Digit4, Keys::Alpha4),
    (Scancodes::Digit5, Keys::Alpha5),
    (Scancodes::Digit6, Keys::Alpha6),
    (Scancodes::Digit7, Keys::Alpha7),
    (Scancodes::Digit8, Keys::Alpha8),
    (Scancodes::Digit9, Keys::Alpha9),
    (Scancodes::Digit0, Keys::Alpha0),
    (Scancodes::Return, Keys::Return),
    (Scancodes::Escape, Keys::Escape),
    (Scancodes::Backspace, Keys::Backspace),
    (Scancodes::Tab, Keys::Tab),
    (Scancodes::Space, Keys::Space),
    (Scancodes::Minus, Keys::Minus),
    (Scancodes::Equals, Keys::Equals),
    (Scancodes::LeftBracket, Keys::LeftBracket),
    (Scancodes::RightBracket, Keys::RightBracket),
    (Scancodes::Backslash, Keys::Backslash),
    (Scancodes::Semicolon, Keys::Semicolon),
    (Scancodes::Apostrophe, Keys::Apostrophe),
    (Scancodes::Grave, Keys::Grave),
    (Scancodes::Comma, Keys::Comma),
    (Scancodes::Period, Keys::Period),
    (Scancodes::Slash, Keys::Slash),
    (Scancodes::Capslock, Keys::Capslock),
    (Scancodes::F1, Keys::F1),
    (Scancodes::F2, Keys::F2),
    (Scancodes::F3, Keys::F3),
    (Scancodes::F4, Keys::F4),
    (Scancodes::F5, Keys::F5),
    (Scancodes::F6, Keys::F6),
    (Scancodes::F7, Keys::F7),
    (Scancodes::F8, Keys::F8),
    (Scancodes::F9, Keys::F9),
    (Scancodes::F10, Keys::F10),
    (Scancodes::F11, Keys::F11),
    (Scancodes::F12, Keys::F12),
    (Scancodes::PrintScreen, Keys::PrintScreen),
    (Scancodes::ScrollLock, Keys::ScrollLock),
    (Scancodes::Pause, Keys::Pause),
    (Scancodes::Insert, Keys::Insert),
    (Scancodes::Home, Keys::Home),
    (Scancodes::PageUp, Keys::PageUp),
    (Scancodes::Delete, Keys::Delete),
    (Scancodes::End, Keys::End),
    (Scancodes::PageDown, Keys::PageDown),
    (Scancodes::Right, Keys::Right),
    (Scancodes::Left, Keys::Left),
    (Scancodes::Down, Keys::Down),
    (Scancodes::Up, Keys::Up),
    (Scancodes::NumLockClear, Keys::NumLockClear),
    (Scancodes::KpDivide, Keys::KpDivide),
    (Scancodes::KpMultiply, Keys::KpMultiply),
    (Scancodes::KpMinus, Keys::KpMinus),
    (Scancodes::KpPlus, Keys::KpPlus),
    (Scancodes::KpEnter, Keys::KpEnter),
    (Scancodes::Kp1, Keys::Kp1),
    (Scancodes::Kp2, Keys::Kp2),
    (Scancodes::Kp3, Keys::Kp3),
    (Scancodes::Kp4, Keys::Kp4),
    (Scancodes::Kp5, Keys::Kp5),
    (Scancodes::Kp6, Keys::Kp6),
    (Scancodes::Kp7, Keys::Kp7),
    (Scancodes::Kp8, Keys::Kp8),
    (Scancodes::Kp9, Keys::Kp9),
    (Scancodes::Kp0, Keys::Kp0),
    (Scancodes::KpPeriod, Keys::KpPeriod),
    (Scancodes::Application, Keys::Application),
    (Scancodes::LCtrl, Keys::LCtrl),
    (Scancodes::LShift, Keys::LShift),
    (Scancodes::LAlt, Keys::LAlt),
    (Scancodes::LGui, Keys::LMeta),
    (Scancodes::RCtrl, Keys::RCtrl),
    (Scancodes::RShift, Keys::RShift),
    (Scancodes::RAlt, Keys::RAlt),
    (Scancodes::RGui, Keys::RMeta),
];
