//! Once-per-frame loop driver.
//!
//! [`EventPump`] owns the native source and drains it once per frame, bracketed
//! by the pre-poll and post-poll hooks of whatever implements [`FrameHooks`]
//! (normally an [`InputContext`]).
//!
//! ```
//! use inputdeck::backends::virtual_input::VirtualSource;
//! use inputdeck::{EventPump, InputContext, NativeEvent};
//!
//! let mut pump = EventPump::new(VirtualSource::default());
//! let mut ctx = InputContext::new(pump.source_mut());
//!
//! pump.source_mut().feed(NativeEvent::MouseMotion { which: 1, x: 5.0, y: 5.0, xrel: 5.0, yrel: 0.0 });
//! let stats = pump.pump_frame(&mut ctx);
//! assert_eq!(stats.events, 1);
//! assert_eq!(ctx.mouse(1).unwrap().position_delta().x, 5.0);
//! ```

use crate::backends::EventSource;
use crate::context::{self, InputContext};
use crate::error::InputError;
use crate::event::NativeEvent;

/// Hook points the loop driver calls around each drain of the source.
pub trait FrameHooks {
    /// Before the first event of the frame.
    fn pre_poll(&mut self);

    fn on_event(&mut self, source: &mut dyn EventSource, event: NativeEvent)
        -> Result<(), InputError>;

    /// After the last event of the frame.
    fn post_poll(&mut self);
}

impl FrameHooks for InputContext {
    fn pre_poll(&mut self) {
        InputContext::pre_poll(self)
    }

    fn on_event(
        &mut self,
        source: &mut dyn EventSource,
        event: NativeEvent,
    ) -> Result<(), InputError> {
        self.handle_event(source, event)
    }

    fn post_poll(&mut self) {
        InputContext::post_poll(self)
    }
}

/// What happened during one [`EventPump::pump_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub events: usize,
    /// Events dropped because they violated the device protocol.
    pub errors: usize,
    pub quit_requested: bool,
}

#[derive(Debug)]
pub struct EventPump<S: EventSource> {
    source: S,
}

impl<S: EventSource> EventPump<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Run one frame: `pre_poll`, every queued event, `post_poll`.
    ///
    /// Protocol errors are logged and counted; they never stop the drain.
    pub fn pump_frame(&mut self, hooks: &mut dyn FrameHooks) -> FrameStats {
        let mut stats = FrameStats::default();
        hooks.pre_poll();
        while let Some(event) = self.source.poll_event() {
            stats.events += 1;
            if matches!(event, NativeEvent::Quit) {
                stats.quit_requested = true;
            }
            if let Err(err) = hooks.on_event(&mut self.source, event) {
                context::report(&err);
                stats.errors += 1;
            }
        }
        hooks.post_poll();
        stats
    }
}
