//! Device lifecycle and state tracking for keyboards, mice and gamepads.
//!
//! `inputdeck` turns an ordered native event stream into a registry of
//! connected devices with queryable, frame-coherent state.
//!
//! - [`InputContext`] dispatches [`NativeEvent`]s: it decides when a device
//!   becomes tracked, routes state events to the right tracker and raises
//!   [`Notification`]s.
//! - [`EventPump`] drives a source once per frame around the context's
//!   pre-poll and post-poll hooks.
//! - [`backends::EventSource`] is the boundary to the platform;
//!   [`backends::virtual_input::VirtualSource`] is a scripted stand-in.
//!
//! ```
//! use inputdeck::backends::virtual_input::VirtualSource;
//! use inputdeck::{EventPump, InputContext, MouseButtons, NativeEvent};
//!
//! let mut pump = EventPump::new(VirtualSource::default());
//! let mut ctx = InputContext::new(pump.source_mut());
//!
//! pump.source_mut().feed(NativeEvent::MouseButton { which: 3, button: 1, down: true });
//! pump.pump_frame(&mut ctx);
//!
//! let mouse = ctx.mouse(3).unwrap();
//! assert!(mouse.is_pressed(MouseButtons::Mouse1));
//! ```

pub mod backends;
pub mod codes;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod gamepad;
pub mod index_map;
pub mod keyboard;
pub mod layout;
pub mod logger;
pub mod mouse;
pub mod press_state;
pub mod pump;
pub mod registry;
pub mod snapshot;
pub mod text_input;
pub mod version;

pub use codes::{GamepadAxes, GamepadButtons, GamepadModel, Keys, MouseButtons, Scancodes};
pub use config::ContextConfig;
pub use context::InputContext;
pub use device::{Device, DeviceClass, DeviceId, DeviceRef, InputDevice};
pub use error::{ConfigError, InputError, SourceError};
pub use event::{NativeEvent, Notification, TouchPhase};
pub use eventbus::{EventFilter, InputListener, ListenerId, NotificationBus};
pub use filtered_listener::FilteredListener;
pub use gamepad::{FingerData, Gamepad, Touchpad};
pub use index_map::{IndexedEnum, StableIndexMap};
pub use keyboard::Keyboard;
pub use logger::LogListener;
pub use mouse::Mouse;
pub use pump::{EventPump, FrameHooks, FrameStats};
pub use registry::DeviceRegistry;
pub use snapshot::InputSnapshot;
pub use version::RuntimeVersion;
