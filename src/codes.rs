//! Closed code spaces for keys, buttons and axes.
//!
//! These are the crate's own code spaces; native platform codes are translated
//! into them by the tables in [`layout`](crate::layout). Every enumeration except
//! [`GamepadModel`] starts with a `None` sentinel that is never pressed.
//!
//! ## Physical vs logical keys
//! - [`Scancodes`] name a **physical** key position (layout independent). Press state
//!   is tracked per scancode.
//! - [`Keys`] name the **logical** key a scancode produces under the active layout.
//!   Use [`KeyboardLayout`](crate::layout::KeyboardLayout) to convert between them.

use serde::{Deserialize, Serialize};

crate::indexed_enum! {
    /// Physical key positions (USB HID keyboard page order).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum Scancodes {
        None,
        A, B, C, D, E, F, G, H, I, J, K, L, M,
        N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
        Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9, Digit0,
        Return, Escape, Backspace, Tab, Space,
        Minus, Equals, LeftBracket, RightBracket, Backslash, NonUsHash,
        Semicolon, Apostrophe, Grave, Comma, Period, Slash,
        Capslock,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        PrintScreen, ScrollLock, Pause, Insert, Home, PageUp, Delete, End, PageDown,
        Right, Left, Down, Up,
        NumLockClear, KpDivide, KpMultiply, KpMinus, KpPlus, KpEnter,
        Kp1, Kp2, Kp3, Kp4, Kp5, Kp6, Kp7, Kp8, Kp9, Kp0, KpPeriod,
        NonUsBackslash, Application,
        LCtrl, LShift, LAlt, LGui, RCtrl, RShift, RAlt, RGui,
    }
}

crate::indexed_enum! {
    /// Logical (layout-resolved) keys.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum Keys {
        None,
        A, B, C, D, E, F, G, H, I, J, K, L, M,
        N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
        Alpha1, Alpha2, Alpha3, Alpha4, Alpha5, Alpha6, Alpha7, Alpha8, Alpha9, Alpha0,
        Return, Escape, Backspace, Tab, Space,
        Minus, Equals, LeftBracket, RightBracket, Backslash, Hash,
        Semicolon, Apostrophe, Grave, Comma, Period, Slash,
        Exclaim, DblApostrophe, Dollar, Percent, Ampersand, LeftParen, RightParen,
        Asterisk, Plus, Colon, Less, Greater, Question, At, Caret, Underscore,
        LeftBrace, Pipe, RightBrace, Tilde,
        Capslock,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        PrintScreen, ScrollLock, Pause, Insert, Home, PageUp, Delete, End, PageDown,
        Right, Left, Down, Up,
        NumLockClear, KpDivide, KpMultiply, KpMinus, KpPlus, KpEnter,
        Kp1, Kp2, Kp3, Kp4, Kp5, Kp6, Kp7, Kp8, Kp9, Kp0, KpPeriod,
        Application,
        LCtrl, LShift, LAlt, LMeta, RCtrl, RShift, RAlt, RMeta,
    }
}

crate::indexed_enum! {
    /// Mouse buttons. `Mouse1` is the primary (left) button, `Mouse2` secondary (right),
    /// `Mouse3` middle, `Mouse4`/`Mouse5` the side buttons.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum MouseButtons {
        None,
        Mouse1,
        Mouse2,
        Mouse3,
        Mouse4,
        Mouse5,
    }
}

crate::indexed_enum! {
    /// Buttons on a standard gamepad, named by position rather than label.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum GamepadButtons {
        None,
        /// Cross / A.
        FacePadSouth,
        /// Triangle / Y.
        FacePadNorth,
        /// Circle / B.
        FacePadEast,
        /// Square / X.
        FacePadWest,
        DPadSouth,
        DPadNorth,
        DPadEast,
        DPadWest,
        LeftShoulder,
        RightShoulder,
        LeftStickPress,
        RightStickPress,
        /// Only present on DualShock 4 / DualSense style pads.
        TouchpadPress,
        Start,
        /// Select / Back. Not present or usable on some platforms.
        Select,
    }
}

crate::indexed_enum! {
    /// Axes on a standard gamepad.
    ///
    /// Triggers read `[0, 1]`, sticks read `[-1, 1]`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum GamepadAxes {
        None,
        LeftTrigger,
        RightTrigger,
        LeftStickX,
        LeftStickY,
        RightStickX,
        RightStickY,
    }
}

impl GamepadAxes {
    /// Trigger-like axes normalize to `[0, 1]`; everything else is stick-like.
    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, GamepadAxes::LeftTrigger | GamepadAxes::RightTrigger)
    }
}

/// Known gamepad families. Good enough for picking prompt icons; not reliable
/// for third-party pads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadModel {
    #[default]
    Generic,
    Xbox360,
    XboxOne,
    Dualshock3,
    Dualshock4,
    Dualsense,
    SwitchPro,
    SwitchJoyconLeft,
    SwitchJoyconRight,
    SwitchJoyconPair,
}
