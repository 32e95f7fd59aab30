mod common;

use common::{init_logging, pad_info, record};
use glam::Vec2;
use inputdeck::backends::virtual_input::VirtualSource;
use inputdeck::{
    DeviceId, EventFilter, EventPump, FrameStats, GamepadAxes, InputContext, NativeEvent,
    Notification, RuntimeVersion, TouchPhase,
};
use proptest::prelude::*;

fn pump_with(source: VirtualSource) -> (EventPump<VirtualSource>, InputContext) {
    init_logging();
    let mut pump = EventPump::new(source);
    let ctx = InputContext::new(pump.source_mut());
    (pump, ctx)
}

fn motion(which: u32, x: f32, y: f32, xrel: f32, yrel: f32) -> NativeEvent {
    NativeEvent::MouseMotion { which, x, y, xrel, yrel }
}

fn wheel(which: u32, x: f32, y: f32) -> NativeEvent {
    NativeEvent::MouseWheel { which, x, y, flipped: false }
}

#[test]
fn wheel_reads_frame_total_then_resets() {
    let (mut pump, mut ctx) = pump_with(VirtualSource::default());

    pump.source_mut().feed_all([wheel(1, 1.0, 0.0), wheel(1, 0.0, 2.0)]);
    pump.pump_frame(&mut ctx);
    assert_eq!(ctx.mouse(1).unwrap().wheel(), Vec2::new(1.0, 2.0));

    pump.pump_frame(&mut ctx);
    assert_eq!(ctx.mouse(1).unwrap().wheel(), Vec2::ZERO);
}

#[test]
fn flipped_wheel_is_negated() {
    let (mut pump, mut ctx) = pump_with(VirtualSource::default());
    pump.source_mut()
        .feed(NativeEvent::MouseWheel { which: 1, x: 0.5, y: 3.0, flipped: true });
    pump.pump_frame(&mut ctx);
    assert_eq!(ctx.mouse(1).unwrap().wheel(), Vec2::new(-0.5, -3.0));
}

#[test]
fn motion_delta_is_one_value_per_frame() {
    let (mut pump, mut ctx) = pump_with(VirtualSource::default());

    pump.source_mut().feed_all([
        motion(2, 10.0, 10.0, 10.0, 10.0),
        motion(2, 12.0, 15.0, 2.0, 5.0),
        motion(2, 11.0, 15.0, -1.0, 0.0),
    ]);
    pump.pump_frame(&mut ctx);
    let m = ctx.mouse(2).unwrap();
    assert_eq!(m.position(), Vec2::new(11.0, 15.0));
    assert_eq!(m.position_delta(), Vec2::new(11.0, 15.0));

    pump.pump_frame(&mut ctx);
    let m = ctx.mouse(2).unwrap();
    assert_eq!(m.position_delta(), Vec2::ZERO);
    assert_eq!(m.position(), Vec2::new(11.0, 15.0));
}

#[test]
fn frames_are_independent_per_mouse() {
    let (mut pump, mut ctx) = pump_with(VirtualSource::default());
    pump.source_mut().feed_all([motion(1, 1.0, 1.0, 1.0, 1.0), motion(2, 5.0, 0.0, 5.0, 0.0)]);
    pump.pump_frame(&mut ctx);
    pump.source_mut().feed(motion(2, 6.0, 0.0, 1.0, 0.0));
    pump.pump_frame(&mut ctx);
    assert_eq!(ctx.mouse(1).unwrap().position_delta(), Vec2::ZERO);
    assert_eq!(ctx.mouse(2).unwrap().position_delta(), Vec2::new(1.0, 0.0));
}

#[test]
fn touchpad_finger_down_and_up() {
    let src = VirtualSource::default().with_gamepad(3, pad_info("DS", 0, vec![2]));
    let (mut pump, mut ctx) = pump_with(src);

    pump.source_mut().feed_all([
        NativeEvent::GamepadAdded { which: 3 },
        NativeEvent::GamepadTouchpad {
            which: 3,
            touchpad: 0,
            finger: 0,
            phase: TouchPhase::Down,
            x: 0.5,
            y: 0.5,
            pressure: 0.8,
        },
    ]);
    pump.pump_frame(&mut ctx);
    let finger = ctx.gamepad(3).unwrap().touchpads()[0].fingers()[0];
    assert!(finger.is_touching());
    assert_eq!(finger.position, Vec2::new(0.5, 0.5));

    pump.source_mut().feed_all([
        NativeEvent::GamepadTouchpad {
            which: 3,
            touchpad: 0,
            finger: 0,
            phase: TouchPhase::Up,
            x: 0.5,
            y: 0.5,
            pressure: 0.0,
        },
        // Out of range: ignored.
        NativeEvent::GamepadTouchpad {
            which: 3,
            touchpad: 4,
            finger: 9,
            phase: TouchPhase::Down,
            x: 0.1,
            y: 0.1,
            pressure: 1.0,
        },
    ]);
    let stats = pump.pump_frame(&mut ctx);
    assert_eq!(stats.errors, 0);
    let finger = ctx.gamepad(3).unwrap().touchpads()[0].fingers()[0];
    assert!(!finger.is_touching());
    assert!(finger.position.is_nan());
}

#[test]
fn axes_and_remaps_through_the_dispatcher() {
    let src = VirtualSource::default().with_gamepad(1, pad_info("Pad", 0, vec![]));
    let (mut pump, mut ctx) = pump_with(src);
    let seen = record(&mut ctx, EventFilter::LifecycleOnly);

    pump.source_mut().feed_all([
        NativeEvent::GamepadAdded { which: 1 },
        NativeEvent::GamepadAxis { which: 1, axis: 0, value: i16::MIN },
        NativeEvent::GamepadAxis { which: 1, axis: 5, value: i16::MAX },
        NativeEvent::GamepadAxis { which: 1, axis: 42, value: 100 },
        NativeEvent::GamepadRemapped { which: 1 },
    ]);
    pump.pump_frame(&mut ctx);

    let pad = ctx.gamepad(1).unwrap();
    assert_eq!(pad.axis_value(GamepadAxes::LeftStickX), -1.0);
    assert_eq!(pad.axis_value(GamepadAxes::RightTrigger), 1.0);
    assert_eq!(pad.axis_value(GamepadAxes::LeftStickY), 0.0);
    assert_eq!(
        *seen.borrow(),
        vec![
            Notification::DeviceAdded(DeviceId::gamepad(1)),
            Notification::GamepadRemapped { device: DeviceId::gamepad(1) },
        ]
    );
}

#[test]
fn pump_reports_quit_and_protocol_errors() {
    let (mut pump, mut ctx) = pump_with(VirtualSource::default());
    pump.source_mut().feed_all([
        NativeEvent::GamepadRemoved { which: 5 },
        motion(0, 1.0, 1.0, 1.0, 1.0),
        NativeEvent::Quit,
    ]);
    let stats = pump.pump_frame(&mut ctx);
    assert_eq!(stats, FrameStats { events: 3, errors: 1, quit_requested: true });
    // Processing carried on past the error.
    assert_eq!(ctx.mouse(0).unwrap().position_delta(), Vec2::ONE);

    assert_eq!(pump.pump_frame(&mut ctx), FrameStats::default());
}

#[test]
fn scripted_session_from_json() {
    let src = VirtualSource::from_json(
        r#"{
            "version": "3.1.0",
            "mice": [6],
            "gamepads": { "2": { "name": "Pad", "touchpads": [1] } },
            "events": [
                { "kind": "GamepadAdded", "which": 2 },
                { "kind": "GamepadButton", "which": 2, "button": 6, "down": true },
                { "kind": "MouseMotion", "which": 6, "x": 3.0, "y": 4.0, "xrel": 3.0, "yrel": 4.0 }
            ]
        }"#,
    )
    .unwrap();
    let (mut pump, mut ctx) = pump_with(src);
    assert!(ctx.mouse(6).is_none());

    pump.pump_frame(&mut ctx);
    assert!(ctx.mouse(6).is_some());
    let snap = ctx.snapshot();
    assert_eq!(snap.mouse(6).unwrap().position_delta, Vec2::new(3.0, 4.0));
    assert_eq!(snap.gamepad(2).unwrap().pressed, vec![inputdeck::GamepadButtons::Start]);
    let json = snap.to_json().unwrap();
    assert!(json.contains("\"Start\""));
}

#[test]
fn startup_mice_are_announced_on_the_first_frame() {
    let src = VirtualSource::new(RuntimeVersion::new(3, 1, 0)).with_mice([4]);
    let (mut pump, mut ctx) = pump_with(src);
    let seen = record(&mut ctx, EventFilter::All);

    pump.pump_frame(&mut ctx);
    pump.pump_frame(&mut ctx);
    assert_eq!(*seen.borrow(), vec![Notification::DeviceAdded(DeviceId::mouse(4))]);
}

proptest! {
    #[test]
    fn delta_equals_sum_of_motion_deltas(
        frames in prop::collection::vec(
            prop::collection::vec((-100i16..100, -100i16..100), 0..16),
            1..6,
        )
    ) {
        let (mut pump, mut ctx) = pump_with(VirtualSource::default());
        // Register the mouse up front so empty frames have something to read.
        pump.source_mut().feed(motion(1, 0.0, 0.0, 0.0, 0.0));
        pump.pump_frame(&mut ctx);

        for frame in frames {
            let mut expected = Vec2::ZERO;
            for (dx, dy) in frame {
                let rel = Vec2::new(dx as f32, dy as f32);
                expected += rel;
                pump.source_mut().feed(motion(1, 0.0, 0.0, rel.x, rel.y));
            }
            pump.pump_frame(&mut ctx);
            prop_assert_eq!(ctx.mouse(1).unwrap().position_delta(), expected);
            prop_assert_eq!(ctx.mouse(1).unwrap().wheel(), Vec2::ZERO);
        }
    }
}
