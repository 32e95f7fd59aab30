//! Scripted, in-memory event source.
//!
//! Events are fed in with [`VirtualSource::feed`] and drained by the context in
//! order. Gamepads open only if a [`GamepadInfo`] was registered for their id;
//! any other id fails to open. Every call the context makes back into the
//! source is recorded so callers can assert on it.
//!
//! A script can also be loaded from JSON:
//!
//! ```
//! use inputdeck::backends::virtual_input::VirtualSource;
//!
//! let src = VirtualSource::from_json(r#"{
//!     "version": "3.1.4",
//!     "mice": [2],
//!     "gamepads": { "7": { "name": "Pad", "touchpads": [2] } },
//!     "events": [
//!         { "kind": "GamepadAdded", "which": 7 },
//!         { "kind": "MouseButton", "which": 2, "button": 1, "down": true }
//!     ]
//! }"#).unwrap();
//! assert_eq!(src.pending(), 2);
//! ```

use super::{EventSource, GamepadInfo};
use crate::device::DeviceId;
use crate::error::SourceError;
use crate::event::NativeEvent;
use crate::text_input::{TextInputArea, TextInputParams};
use crate::version::RuntimeVersion;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Runtime version reported when none is given.
pub const DEFAULT_VERSION: RuntimeVersion = RuntimeVersion::new(3, 2, 0);

#[derive(Debug)]
pub struct VirtualSource {
    version: RuntimeVersion,
    queue: VecDeque<NativeEvent>,
    mice: Vec<u32>,
    gamepads: HashMap<u32, GamepadInfo>,
    names: HashMap<DeviceId, String>,
    open: BTreeSet<u32>,
    closed: Vec<u32>,
    text_input: Option<TextInputParams>,
    text_area: Option<TextInputArea>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    #[serde(default)]
    version: Option<RuntimeVersion>,
    #[serde(default)]
    mice: Vec<u32>,
    #[serde(default)]
    gamepads: HashMap<u32, GamepadInfo>,
    #[serde(default)]
    events: Vec<NativeEvent>,
}

impl Default for VirtualSource {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl VirtualSource {
    pub fn new(version: RuntimeVersion) -> Self {
        Self {
            version,
            queue: VecDeque::new(),
            mice: Vec::new(),
            gamepads: HashMap::new(),
            names: HashMap::new(),
            open: BTreeSet::new(),
            closed: Vec::new(),
            text_input: None,
            text_area: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let script: Script = serde_json::from_str(json)?;
        let mut src = Self::new(script.version.unwrap_or(DEFAULT_VERSION));
        src.mice = script.mice;
        src.gamepads = script.gamepads;
        src.queue.extend(script.events);
        Ok(src)
    }

    /// Mice reported by [`EventSource::enumerate_mice`].
    pub fn with_mice(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.mice.extend(ids);
        self
    }

    /// Make gamepad `which` openable.
    pub fn with_gamepad(mut self, which: u32, info: GamepadInfo) -> Self {
        self.gamepads.insert(which, info);
        self
    }

    pub fn with_name(mut self, id: DeviceId, name: impl Into<String>) -> Self {
        self.names.insert(id, name.into());
        self
    }

    /// Inject one native event.
    pub fn feed(&mut self, event: NativeEvent) {
        self.queue.push_back(event);
    }

    pub fn feed_all(&mut self, events: impl IntoIterator<Item = NativeEvent>) {
        self.queue.extend(events);
    }

    /// Events not yet polled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_open(&self, which: u32) -> bool {
        self.open.contains(&which)
    }

    /// Gamepad ids closed so far, in order.
    pub fn closed(&self) -> &[u32] {
        &self.closed
    }

    /// Parameters of the running text-input session, if any.
    pub fn text_input(&self) -> Option<&TextInputParams> {
        self.text_input.as_ref()
    }

    pub fn text_input_area(&self) -> Option<TextInputArea> {
        self.text_area
    }
}

impl EventSource for VirtualSource {
    fn poll_event(&mut self) -> Option<NativeEvent> {
        self.queue.pop_front()
    }

    fn runtime_version(&self) -> RuntimeVersion {
        self.version
    }

    fn enumerate_mice(&mut self) -> Vec<u32> {
        self.mice.clone()
    }

    fn open_gamepad(&mut self, which: u32) -> Result<GamepadInfo, SourceError> {
        let info = self
            .gamepads
            .get(&which)
            .cloned()
            .ok_or_else(|| SourceError::GamepadOpen {
                which,
                reason: "no such virtual gamepad".into(),
            })?;
        self.open.insert(which);
        Ok(info)
    }

    fn close_gamepad(&mut self, which: u32) {
        if self.open.remove(&which) {
            self.closed.push(which);
        }
    }

    fn device_name(&self, id: DeviceId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    fn start_text_input(&mut self, params: &TextInputParams) {
        self.text_input = Some(params.clone());
    }

    fn stop_text_input(&mut self) {
        self.text_input = None;
    }

    fn set_text_input_area(&mut self, area: Option<TextInputArea>) {
        self.text_area = area;
    }
}
