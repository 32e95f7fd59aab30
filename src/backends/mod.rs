//! Native event source boundary.
//!
//! An [`EventSource`] is whatever owns the platform input queue: it yields
//! [`NativeEvent`]s in order, reports which runtime version it is, enumerates
//! mice on request and opens/closes gamepad handles. Windowing and IME plumbing
//! live behind it as well; the context only toggles text input.
//!
//! The only in-tree source is [`virtual_input::VirtualSource`], a scripted
//! in-memory queue used for tests, replays and headless tools.

use crate::codes::GamepadModel;
use crate::device::DeviceId;
use crate::error::SourceError;
use crate::event::NativeEvent;
use crate::text_input::{TextInputArea, TextInputParams};
use crate::version::RuntimeVersion;
use serde::{Deserialize, Serialize};

pub mod virtual_input;

/// What the source knows about a gamepad once its handle is open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadInfo {
    pub name: Option<String>,
    #[serde(default)]
    pub model: GamepadModel,
    /// Player slot assigned by the platform, if any.
    #[serde(default)]
    pub player_index: Option<i32>,
    /// Finger slot count of each touchpad, in touchpad order.
    #[serde(default)]
    pub touchpads: Vec<usize>,
}

/// A native input event queue.
pub trait EventSource {
    /// Next queued event, or `None` once the queue is drained for this frame.
    fn poll_event(&mut self) -> Option<NativeEvent>;

    fn runtime_version(&self) -> RuntimeVersion;

    /// Instance ids of every mouse currently attached.
    fn enumerate_mice(&mut self) -> Vec<u32>;

    /// Open the native handle for a connected gamepad.
    fn open_gamepad(&mut self, which: u32) -> Result<GamepadInfo, SourceError>;

    fn close_gamepad(&mut self, which: u32);

    /// Best-effort human-readable name. Gamepad names come from [`GamepadInfo`].
    fn device_name(&self, _id: DeviceId) -> Option<String> {
        None
    }

    fn start_text_input(&mut self, _params: &TextInputParams) {}

    fn stop_text_input(&mut self) {}

    fn set_text_input_area(&mut self, _area: Option<TextInputArea>) {}
}
