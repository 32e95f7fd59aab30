//! Context configuration.
//!
//! Usually loaded from TOML; every key is optional.
//!
//! ```toml
//! touch_mouse_id = 4294967295
//! mouse_startup_fixed_in = "3.2.0"
//!
//! [keyboard]
//! default_instance_at_zero = true
//!
//! [mouse]
//! default_instance_at_zero = false
//!
//! [[key_overrides]]
//! scancode = "Q"
//! key = "A"
//! ```
//!
//! `pen_mouse_id` defaults to the reserved pen pointer id. Clear it in code
//! (`config.pen_mouse_id = None`) to treat that id as an ordinary mouse.

use crate::error::ConfigError;
use crate::layout::KeyOverride;
use crate::version::RuntimeVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reserved instance id of the virtual mouse driven by touch emulation.
pub const TOUCH_MOUSE_ID: u32 = 0xFFFF_FFFF;
/// Reserved instance id of the virtual mouse driven by pen emulation.
pub const PEN_MOUSE_ID: u32 = 0xFFFF_FFFE;

/// Per-class settings for lazily registered classes (keyboards, mice).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyClassConfig {
    /// The native source always reports one default instance at id `0`.
    pub default_instance_at_zero: bool,
}

impl Default for LazyClassConfig {
    fn default() -> Self {
        Self {
            default_instance_at_zero: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
    pub touch_mouse_id: u32,
    pub pen_mouse_id: Option<u32>,
    /// First runtime version that announces mice already present at startup.
    pub mouse_startup_fixed_in: RuntimeVersion,
    pub keyboard: LazyClassConfig,
    pub mouse: LazyClassConfig,
    pub key_overrides: Vec<KeyOverride>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            touch_mouse_id: TOUCH_MOUSE_ID,
            pen_mouse_id: Some(PEN_MOUSE_ID),
            mouse_startup_fixed_in: RuntimeVersion::new(3, 2, 0),
            keyboard: LazyClassConfig::default(),
            mouse: LazyClassConfig::default(),
            key_overrides: Vec::new(),
        }
    }
}

impl ContextConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Whether `which` is one of the reserved synthetic pointer ids.
    #[inline]
    pub fn is_synthetic_mouse(&self, which: u32) -> bool {
        which == self.touch_mouse_id || self.pen_mouse_id == Some(which)
    }
}
