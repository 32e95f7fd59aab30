use crate::device::InputDevice;
use crate::event::Notification;
use crate::eventbus::InputListener;
use crate::registry::DeviceRegistry;
use log::Level;

/// A listener that writes every notification to the `log` facade.
///
/// When the notification names a device still present in the registry, the
/// device's name is included.
pub struct LogListener {
    level: Level,
}

impl LogListener {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LogListener {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl InputListener for LogListener {
    fn on_notification(&mut self, note: &Notification, devices: &DeviceRegistry) {
        match note.device().and_then(|id| devices.get(id)) {
            Some(dev) => log::log!(self.level, "[input] {:?} from {}", note, dev.name()),
            None => log::log!(self.level, "[input] {:?}", note),
        }
    }
}
