//! Text-input session parameters.
//!
//! The context only toggles text input on the source and tracks whether it is
//! active; composition and IME handling stay with the native side.

use bitflags::bitflags;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Kind of content being entered. Lets the platform pick a suitable on-screen keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextInputType {
    #[default]
    Text,
    TextName,
    TextEmail,
    TextUsername,
    TextPasswordHidden,
    TextPasswordVisible,
    Number,
    NumberPasswordHidden,
    NumberPasswordVisible,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextInputCapitalization {
    #[default]
    None,
    Sentences,
    Words,
    Letters,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TextInputFlags: u8 {
        const AUTOCORRECT = 1 << 0;
        const MULTILINE   = 1 << 1;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputParams {
    pub kind: TextInputType,
    pub capitalization: TextInputCapitalization,
    pub flags: TextInputFlags,
}

/// Where text is being entered, in window pixels. `cursor` is relative to
/// `position`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputArea {
    pub position: IVec2,
    pub size: IVec2,
    pub cursor: i32,
}
