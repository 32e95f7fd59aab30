//! The input context: event dispatcher, frame hooks and device queries.
//!
//! [`InputContext`] consumes [`NativeEvent`]s one at a time and keeps the
//! [`DeviceRegistry`] and every tracker in step with them. It is single-threaded
//! and never blocks; notifications go out synchronously from inside
//! [`handle_event`](InputContext::handle_event).
//!
//! # Registration policy
//! - **Gamepads** are registered eagerly. A connection event opens the native
//!   handle; if that fails the gamepad is not registered. Removal closes it.
//! - **Keyboards and mice** are registered lazily. Connection events only record
//!   the instance as pending, since native sources report phantom instances
//!   that never produce input. The first state event from an instance registers
//!   it and is then applied to it, so a consumer sees `DeviceAdded` immediately
//!   followed by the state change.
//! - **Synthetic pointers** (touch and pen emulation) are dropped before they can
//!   reach the registry.
//! - **Default instance at zero.** When enabled for a class, id `0` is the
//!   source's catch-all instance. It registers on its first input like any other
//!   instance but is never removed by a connection event.
//! - **Startup mice.** Runtimes older than
//!   [`ContextConfig::mouse_startup_fixed_in`] never announce mice attached
//!   before start-up. The context enumerates them at construction and registers
//!   them on the first frame or event, once listeners can hear `DeviceAdded`.
//!
//! # Frames
//! Call [`pre_poll`](InputContext::pre_poll) before draining the source and
//! [`post_poll`](InputContext::post_poll) after, or let
//! [`EventPump`](crate::pump::EventPump) do it.

use crate::backends::EventSource;
use crate::config::ContextConfig;
use crate::device::{DeviceClass, DeviceId};
use crate::error::InputError;
use crate::event::{NativeEvent, Notification};
use crate::eventbus::{EventFilter, InputListener, ListenerId, NotificationBus};
use crate::gamepad::Gamepad;
use crate::index_map::IndexedEnum;
use crate::keyboard::Keyboard;
use crate::layout::NativeTables;
use crate::mouse::Mouse;
use crate::registry::DeviceRegistry;
use crate::snapshot::InputSnapshot;
use crate::text_input::{TextInputArea, TextInputParams};
use glam::Vec2;
use log::{debug, error, info, trace, warn};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

pub struct InputContext {
    config: ContextConfig,
    tables: Arc<NativeTables>,
    registry: DeviceRegistry,
    bus: NotificationBus,
    /// Announced lazy instances that have not produced input yet.
    pending: BTreeSet<DeviceId>,
    /// Mice enumerated at construction, registered on the first frame or event.
    startup_mice: Vec<(u32, Option<String>)>,
    /// Gamepads whose handle failed to open; their removal is expected.
    unopened: HashSet<u32>,
    text_input_active: bool,
    attached: bool,
}

impl InputContext {
    pub fn new(source: &mut dyn EventSource) -> Self {
        Self::with_config(source, ContextConfig::default())
    }

    pub fn with_config(source: &mut dyn EventSource, config: ContextConfig) -> Self {
        let tables = NativeTables::with_key_overrides(&config.key_overrides);
        let mut ctx = Self {
            config,
            tables,
            registry: DeviceRegistry::new(),
            bus: NotificationBus::new(),
            pending: BTreeSet::new(),
            startup_mice: Vec::new(),
            unopened: HashSet::new(),
            text_input_active: false,
            attached: true,
        };
        ctx.enumerate_startup_mice(source);
        ctx
    }

    fn enumerate_startup_mice(&mut self, source: &mut dyn EventSource) {
        let version = source.runtime_version();
        if version >= self.config.mouse_startup_fixed_in {
            return;
        }
        let mice = source.enumerate_mice();
        debug!(
            "runtime {version} predates {}: {} enumerated mice",
            self.config.mouse_startup_fixed_in,
            mice.len()
        );
        self.startup_mice = mice
            .into_iter()
            .filter(|&which| !self.config.is_synthetic_mouse(which))
            .map(|which| (which, source.device_name(DeviceId::mouse(which))))
            .collect();
    }

    fn register_startup_mice(&mut self) {
        for (which, name) in std::mem::take(&mut self.startup_mice) {
            self.add_mouse(which, name);
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn tables(&self) -> &Arc<NativeTables> {
        &self.tables
    }

    /// `false` after [`teardown`](Self::teardown).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ---- dispatch -------------------------------------------------------

    /// Apply one native event.
    ///
    /// The only error is a gamepad removal for a handle that was never
    /// registered; the event is dropped and state is left untouched. Everything
    /// else that cannot be applied (unmapped codes, unknown devices on state
    /// events, out-of-range touch indices) is logged and discarded.
    pub fn handle_event(
        &mut self,
        source: &mut dyn EventSource,
        event: NativeEvent,
    ) -> Result<(), InputError> {
        if !self.attached {
            trace!("detached, ignoring {event:?}");
            return Ok(());
        }
        self.register_startup_mice();
        if let Some(DeviceId { class: DeviceClass::Mouse, handle }) = event.device() {
            if self.config.is_synthetic_mouse(handle) {
                trace!("dropping synthetic pointer event {event:?}");
                return Ok(());
            }
        }

        match event {
            NativeEvent::KeyboardAdded { which } => self.announce(DeviceId::keyboard(which)),
            NativeEvent::MouseAdded { which } => self.announce(DeviceId::mouse(which)),
            NativeEvent::KeyboardRemoved { which } => self.remove_lazy(DeviceId::keyboard(which)),
            NativeEvent::MouseRemoved { which } => self.remove_lazy(DeviceId::mouse(which)),
            NativeEvent::GamepadAdded { which } => self.connect_gamepad(source, which),
            NativeEvent::GamepadRemoved { which } => return self.disconnect_gamepad(source, which),

            NativeEvent::Key { which, scancode, down, repeat } => {
                let code = self.tables.scancodes.to_code(scancode);
                self.ensure_keyboard(source, which);
                if code.is_none() {
                    trace!("unmapped scancode {scancode:#x} on keyboard {which}");
                    return Ok(());
                }
                let note = self
                    .registry
                    .keyboard_mut(which)
                    .and_then(|kb| kb.process_key_event(code, down, repeat));
                self.emit(note);
            }
            NativeEvent::MouseButton { which, button, down } => {
                let code = self.tables.mouse_buttons.to_code(button);
                self.ensure_mouse(source, which);
                if code.is_none() {
                    trace!("unmapped mouse button {button} on mouse {which}");
                    return Ok(());
                }
                let note = self
                    .registry
                    .mouse_mut(which)
                    .and_then(|m| m.process_button_event(code, down));
                self.emit(note);
            }
            NativeEvent::MouseMotion { which, x, y, xrel, yrel } => {
                self.ensure_mouse(source, which);
                if let Some(m) = self.registry.mouse_mut(which) {
                    m.process_motion_event(Vec2::new(x, y), Vec2::new(xrel, yrel));
                }
            }
            NativeEvent::MouseWheel { which, x, y, flipped } => {
                self.ensure_mouse(source, which);
                let delta = if flipped { -Vec2::new(x, y) } else { Vec2::new(x, y) };
                if let Some(m) = self.registry.mouse_mut(which) {
                    m.process_wheel_event(delta);
                }
            }

            NativeEvent::GamepadRemapped { which } => {
                let note = self.registry.gamepad(which).map(Gamepad::process_remap_event);
                if note.is_none() {
                    debug!("remap for unregistered gamepad {which}");
                }
                self.emit(note);
            }
            NativeEvent::GamepadButton { which, button, down } => {
                let code = self.tables.gamepad_buttons.to_code(button);
                if code.is_none() {
                    trace!("unmapped gamepad button {button} on gamepad {which}");
                    return Ok(());
                }
                let Some(gp) = self.registry.gamepad_mut(which) else {
                    debug!("button event for unregistered gamepad {which}");
                    return Ok(());
                };
                let note = gp.process_button_event(code, down);
                self.emit(note);
            }
            NativeEvent::GamepadAxis { which, axis, value } => {
                let code = self.tables.gamepad_axes.to_code(axis);
                match self.registry.gamepad_mut(which) {
                    Some(gp) => {
                        if !gp.process_axis_event(code, value) {
                            trace!("unmapped gamepad axis {axis} on gamepad {which}");
                        }
                    }
                    None => debug!("axis event for unregistered gamepad {which}"),
                }
            }
            NativeEvent::GamepadTouchpad { which, touchpad, finger, phase, x, y, pressure } => {
                match self.registry.gamepad_mut(which) {
                    Some(gp) => {
                        if !gp.process_touchpad_event(touchpad, finger, phase, Vec2::new(x, y), pressure) {
                            trace!("touch {touchpad}/{finger} out of range on gamepad {which}");
                        }
                    }
                    None => debug!("touch event for unregistered gamepad {which}"),
                }
            }

            NativeEvent::TextInput { text } => {
                if self.text_input_active {
                    self.emit(Some(Notification::TextInput { text }));
                } else {
                    trace!("text input while inactive: {text:?}");
                }
            }
            NativeEvent::Quit => {}
        }
        Ok(())
    }

    fn emit(&mut self, note: Option<Notification>) {
        if let Some(note) = note {
            self.bus.emit(&note, &self.registry);
        }
    }

    fn default_at_zero(&self, class: DeviceClass) -> bool {
        match class {
            DeviceClass::Keyboard => self.config.keyboard.default_instance_at_zero,
            DeviceClass::Mouse => self.config.mouse.default_instance_at_zero,
            DeviceClass::Gamepad => false,
        }
    }

    fn announce(&mut self, id: DeviceId) {
        if self.registry.contains(id) {
            return;
        }
        trace!("{id} announced; waiting for input");
        self.pending.insert(id);
    }

    fn remove_lazy(&mut self, id: DeviceId) {
        self.pending.remove(&id);
        if id.handle == 0 && self.default_at_zero(id.class) {
            debug!("ignoring removal of default {} instance", id.class);
            return;
        }
        match self.registry.remove(id) {
            Some(_) => self.emit(Some(Notification::DeviceRemoved(id))),
            None => debug!("{id} removed without ever producing input"),
        }
    }

    fn ensure_keyboard(&mut self, source: &dyn EventSource, which: u32) {
        let id = DeviceId::keyboard(which);
        if self.registry.contains(id) {
            return;
        }
        self.pending.remove(&id);
        let kb = Keyboard::new(which, source.device_name(id), Arc::clone(&self.tables));
        let note = self.registry.add(kb.into());
        self.emit(note);
    }

    fn ensure_mouse(&mut self, source: &dyn EventSource, which: u32) {
        if self.registry.contains(DeviceId::mouse(which)) {
            return;
        }
        self.add_mouse(which, source.device_name(DeviceId::mouse(which)));
    }

    fn add_mouse(&mut self, which: u32, name: Option<String>) {
        let id = DeviceId::mouse(which);
        if self.registry.contains(id) {
            return;
        }
        self.pending.remove(&id);
        let note = self.registry.add(Mouse::new(which, name).into());
        self.emit(note);
    }

    fn connect_gamepad(&mut self, source: &mut dyn EventSource, which: u32) {
        if self.registry.contains(DeviceId::gamepad(which)) {
            debug!("gamepad {which} connected twice");
            return;
        }
        match source.open_gamepad(which) {
            Ok(info) => {
                self.unopened.remove(&which);
                let note = self.registry.add(Gamepad::new(which, info).into());
                self.emit(note);
            }
            Err(e) => {
                warn!("{e}; gamepad not registered");
                self.unopened.insert(which);
            }
        }
    }

    fn disconnect_gamepad(
        &mut self,
        source: &mut dyn EventSource,
        which: u32,
    ) -> Result<(), InputError> {
        let id = DeviceId::gamepad(which);
        if self.registry.remove(id).is_none() {
            if self.unopened.remove(&which) {
                debug!("gamepad {which} that failed to open was removed");
                return Ok(());
            }
            return Err(InputError::UnknownDevice {
                class: DeviceClass::Gamepad,
                handle: which,
            });
        }
        source.close_gamepad(which);
        self.emit(Some(Notification::DeviceRemoved(id)));
        Ok(())
    }

    // ---- frame hooks ----------------------------------------------------

    /// Before draining the source: registers enumerated startup mice, then
    /// zeroes wheels, which are per-frame impulses.
    pub fn pre_poll(&mut self) {
        if !self.attached {
            return;
        }
        self.register_startup_mice();
        self.registry.mice_mut().for_each(Mouse::begin_frame);
    }

    /// After draining the source: publish each mouse's accumulated motion.
    pub fn post_poll(&mut self) {
        if !self.attached {
            return;
        }
        self.registry.mice_mut().for_each(Mouse::end_frame);
    }

    // ---- queries --------------------------------------------------------

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn keyboards(&self) -> impl Iterator<Item = &Keyboard> + '_ {
        self.registry.keyboards()
    }

    pub fn mice(&self) -> impl Iterator<Item = &Mouse> + '_ {
        self.registry.mice()
    }

    pub fn gamepads(&self) -> impl Iterator<Item = &Gamepad> + '_ {
        self.registry.gamepads()
    }

    pub fn keyboard(&self, handle: u32) -> Option<&Keyboard> {
        self.registry.keyboard(handle)
    }

    pub fn mouse(&self, handle: u32) -> Option<&Mouse> {
        self.registry.mouse(handle)
    }

    pub fn gamepad(&self, handle: u32) -> Option<&Gamepad> {
        self.registry.gamepad(handle)
    }

    /// The default instance when it exists, otherwise the earliest-registered keyboard.
    pub fn primary_keyboard(&self) -> Option<&Keyboard> {
        self.default_instance(DeviceClass::Keyboard, |h| self.registry.keyboard(h))
            .or_else(|| self.registry.keyboards().next())
    }

    /// The default instance when it exists, otherwise the earliest-registered mouse.
    pub fn primary_mouse(&self) -> Option<&Mouse> {
        self.default_instance(DeviceClass::Mouse, |h| self.registry.mouse(h))
            .or_else(|| self.registry.mice().next())
    }

    fn default_instance<'a, T>(
        &'a self,
        class: DeviceClass,
        lookup: impl FnOnce(u32) -> Option<&'a T>,
    ) -> Option<&'a T> {
        if self.default_at_zero(class) {
            lookup(0)
        } else {
            None
        }
    }

    pub fn gamepad_by_player_index(&self, player: i32) -> Option<&Gamepad> {
        self.registry
            .gamepads()
            .find(|g| g.player_index() == Some(player))
    }

    /// Announced keyboards and mice that have not produced input yet, keyboards
    /// first, then by handle.
    pub fn pending_devices(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.pending.iter().copied()
    }

    /// Owned copy of every device's current state.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::capture(&self.registry)
    }

    // ---- listeners ------------------------------------------------------

    pub fn subscribe(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<DeviceId>,
    ) -> ListenerId {
        self.bus.add_listener(listener, filter, device)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.remove_listener(id)
    }

    /// Direct access for enabling and disabling listeners.
    pub fn listeners_mut(&mut self) -> &mut NotificationBus {
        &mut self.bus
    }

    // ---- text input -----------------------------------------------------

    pub fn begin_text_input(&mut self, source: &mut dyn EventSource, params: TextInputParams) {
        source.start_text_input(&params);
        self.text_input_active = true;
    }

    pub fn end_text_input(&mut self, source: &mut dyn EventSource) {
        if self.text_input_active {
            source.stop_text_input();
            self.text_input_active = false;
        }
    }

    pub fn set_text_input_area(&mut self, source: &mut dyn EventSource, area: Option<TextInputArea>) {
        source.set_text_input_area(area);
    }

    pub fn text_input_active(&self) -> bool {
        self.text_input_active
    }

    // ---- teardown -------------------------------------------------------

    /// Detach from the source: close gamepad handles, drop every listener and
    /// device. Afterwards events and frame hooks are no-ops and every query
    /// reports no devices.
    pub fn teardown(&mut self, source: &mut dyn EventSource) {
        if !self.attached {
            return;
        }
        let open: Vec<u32> = self
            .registry
            .ids()
            .filter(|id| id.class == DeviceClass::Gamepad)
            .map(|id| id.handle)
            .collect();
        for which in open {
            source.close_gamepad(which);
        }
        if self.text_input_active {
            source.stop_text_input();
            self.text_input_active = false;
        }
        self.bus.clear();
        self.registry.clear();
        self.pending.clear();
        self.startup_mice.clear();
        self.unopened.clear();
        self.attached = false;
        info!("input context detached");
    }
}

impl std::fmt::Debug for InputContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputContext")
            .field("attached", &self.attached)
            .field("registry", &self.registry)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

/// Logged and swallowed; used by the frame driver.
pub(crate) fn report(err: &InputError) {
    error!("dropping event: {err}");
}
