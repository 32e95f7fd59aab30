use crate::event::Notification;
use crate::device::DeviceId;
use crate::registry::DeviceRegistry;
use std::collections::BTreeMap;

/// Trait for reacting to device notifications.
///
/// Called synchronously while the event that caused the notification is being
/// processed. The registry passed alongside reflects every change up to and
/// including that event.
pub trait InputListener {
    fn on_notification(&mut self, note: &Notification, devices: &DeviceRegistry);
}

impl<F> InputListener for F
where
    F: FnMut(&Notification, &DeviceRegistry),
{
    fn on_notification(&mut self, note: &Notification, devices: &DeviceRegistry) {
        self(note, devices)
    }
}

/// Determines which kinds of notifications a listener wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFilter {
    All,
    /// `DeviceAdded` / `DeviceRemoved` / `GamepadRemapped`.
    LifecycleOnly,
    /// Key, mouse-button and gamepad-button transitions.
    ButtonsOnly,
    TextOnly,
    Custom(fn(&Notification) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, note: &Notification) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::LifecycleOnly => matches!(
                note,
                Notification::DeviceAdded(_)
                    | Notification::DeviceRemoved(_)
                    | Notification::GamepadRemapped { .. }
            ),
            EventFilter::ButtonsOnly => matches!(
                note,
                Notification::Key { .. }
                    | Notification::MouseButton { .. }
                    | Notification::GamepadButton { .. }
            ),
            EventFilter::TextOnly => matches!(note, Notification::TextInput { .. }),
            EventFilter::Custom(f) => f(note),
        }
    }
}

/// Handle returned by [`NotificationBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
    device: Option<DeviceId>,
}

/// Subscription list. Delivery is in subscription order.
#[derive(Default)]
pub struct NotificationBus {
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with a filter and an optional device tag.
    ///
    /// A tagged listener only sees notifications about that device; notifications
    /// with no device (text input) never reach it.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        device: Option<DeviceId>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                device,
            },
        );
        id
    }

    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Returns whether the listener was present.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers one notification to all active and matching listeners.
    pub fn emit(&mut self, note: &Notification, devices: &DeviceRegistry) {
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }
            if let Some(wanted) = entry.device {
                if note.device() != Some(wanted) {
                    continue;
                }
            }
            if entry.filter.accepts(note) {
                entry.listener.on_notification(note, devices);
            }
        }
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<Notification>>>, impl InputListener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |n: &Notification, _: &DeviceRegistry| sink.borrow_mut().push(n.clone()))
    }

    #[test]
    fn delivery_follows_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus = NotificationBus::new();
        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            bus.add_listener(
                move |_: &Notification, _: &DeviceRegistry| order.borrow_mut().push(tag),
                EventFilter::All,
                None,
            );
        }
        bus.emit(&Notification::DeviceAdded(DeviceId::mouse(0)), &DeviceRegistry::new());
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn filters_and_device_tags() {
        let reg = DeviceRegistry::new();
        let mut bus = NotificationBus::new();
        let (lifecycle, l) = recorder();
        bus.add_listener(l, EventFilter::LifecycleOnly, None);
        let (tagged, t) = recorder();
        bus.add_listener(t, EventFilter::All, Some(DeviceId::gamepad(2)));

        bus.emit(&Notification::DeviceAdded(DeviceId::gamepad(1)), &reg);
        bus.emit(&Notification::GamepadRemapped { device: DeviceId::gamepad(2) }, &reg);
        bus.emit(&Notification::TextInput { text: "x".into() }, &reg);

        assert_eq!(lifecycle.borrow().len(), 2);
        assert_eq!(
            *tagged.borrow(),
            vec![Notification::GamepadRemapped { device: DeviceId::gamepad(2) }]
        );
    }

    #[test]
    fn disabled_and_removed_listeners_are_skipped() {
        let reg = DeviceRegistry::new();
        let mut bus = NotificationBus::new();
        let (seen, l) = recorder();
        let id = bus.add_listener(l, EventFilter::All, None);
        let note = Notification::DeviceRemoved(DeviceId::keyboard(0));

        bus.disable(id);
        bus.emit(&note, &reg);
        assert!(seen.borrow().is_empty());

        bus.enable(id);
        bus.emit(&note, &reg);
        assert_eq!(seen.borrow().len(), 1);

        assert!(bus.remove_listener(id));
        assert!(!bus.remove_listener(id));
        bus.emit(&note, &reg);
        assert_eq!(seen.borrow().len(), 1);
    }
}
