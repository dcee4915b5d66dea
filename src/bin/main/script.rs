use std::{cell::Cell, collections::VecDeque, convert::Infallible, rc::Rc};

use swipefeed_core::input::{FeedInput, InputProvider};

/// Replays a fixed gesture timeline against the simulated clock.
pub(super) struct ScriptedInput {
    events: VecDeque<(u64, FeedInput)>,
    clock: Rc<Cell<u64>>,
}

impl ScriptedInput {
    pub(super) fn new(events: &[(u64, FeedInput)], clock: Rc<Cell<u64>>) -> Self {
        let mut events: Vec<_> = events.to_vec();
        events.sort_by_key(|(at_ms, _)| *at_ms);
        Self {
            events: events.into(),
            clock,
        }
    }
}

impl InputProvider for ScriptedInput {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<FeedInput>, Self::Error> {
        let now_ms = self.clock.get();
        match self.events.front() {
            Some((at_ms, _)) if *at_ms <= now_ms => {
                Ok(self.events.pop_front().map(|(_, event)| event))
            }
            _ => Ok(None),
        }
    }
}

/// Scroll offset that lands exactly on `index`.
pub(super) fn scroll_to(index: u16, item_height_px: f32) -> FeedInput {
    FeedInput::Scroll {
        offset_px: index as f32 * item_height_px,
    }
}
