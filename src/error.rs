//! Error types.
//!
//! Only two conditions surface as errors during event processing: a removal for
//! a device the registry never saw, and a gamepad handle the source could not
//! open. Everything else a noisy native stream produces (unmapped codes, bad
//! touch indices, duplicate connection events) is discarded where it is found.

use crate::device::DeviceClass;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// A removal arrived for a handle with no prior successful add. The
    /// dispatcher lost track of a device; the event is dropped.
    #[error("{class} {handle} was removed but never registered")]
    UnknownDevice { class: DeviceClass, handle: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("failed to open gamepad {which}: {reason}")]
    GamepadOpen { which: u32, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid runtime version {0:?}")]
    Version(String),
}
