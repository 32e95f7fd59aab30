#![allow(dead_code)]

use inputdeck::backends::virtual_input::VirtualSource;
use inputdeck::backends::GamepadInfo;
use inputdeck::{DeviceRegistry, EventFilter, InputContext, Notification};
use std::cell::RefCell;
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn pad_info(name: &str, player: i32, touchpads: Vec<usize>) -> GamepadInfo {
    GamepadInfo {
        name: Some(name.to_owned()),
        player_index: Some(player),
        touchpads,
        ..Default::default()
    }
}

/// Subscribe a listener that records every notification it sees.
pub fn record(ctx: &mut InputContext, filter: EventFilter) -> Rc<RefCell<Vec<Notification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctx.subscribe(
        move |n: &Notification, _: &DeviceRegistry| sink.borrow_mut().push(n.clone()),
        filter,
        None,
    );
    seen
}

pub fn context(src: &mut VirtualSource) -> InputContext {
    init_logging();
    InputContext::new(src)
}
