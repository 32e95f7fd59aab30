use crate::event::Notification;
use crate::eventbus::InputListener;
use crate::registry::DeviceRegistry;

/// Wraps a listener and forwards only notifications matching a predicate.
///
/// Use this when [`EventFilter::Custom`](crate::eventbus::EventFilter::Custom) is
/// not enough, i.e. the predicate needs captured state.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&Notification) -> bool>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&Notification) -> bool + 'static,
        inner: impl InputListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl InputListener for FilteredListener {
    fn on_notification(&mut self, note: &Notification, devices: &DeviceRegistry) {
        if (self.predicate)(note) {
            self.inner.on_notification(note, devices);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::MouseButtons;
    use crate::device::DeviceId;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn only_matching_notifications_pass() {
        let wanted = MouseButtons::Mouse2;
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut listener = FilteredListener::new(
            move |n| matches!(n, Notification::MouseButton { button, .. } if *button == wanted),
            move |_: &Notification, _: &DeviceRegistry| counter.set(counter.get() + 1),
        );
        let reg = DeviceRegistry::new();
        for button in [MouseButtons::Mouse1, MouseButtons::Mouse2] {
            listener.on_notification(
                &Notification::MouseButton { device: DeviceId::mouse(0), button, down: true },
                &reg,
            );
        }
        assert_eq!(hits.get(), 1);
    }
}
