use super::{FeedInput, InputProvider};

/// Replays a fixed gesture list, one event per poll, then goes quiet.
///
/// Useful for bring-up without a touch surface: the whole list drains on the
/// first tick, so it models a burst of samples arriving between two frames.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput<'a> {
    events: &'a [FeedInput],
    cursor: usize,
}

impl<'a> MockInput<'a> {
    pub const fn new(events: &'a [FeedInput]) -> Self {
        Self { events, cursor: 0 }
    }

    /// Never produces an event.
    pub const fn idle() -> Self {
        Self::new(&[])
    }

    pub fn remaining(&self) -> usize {
        self.events.len().saturating_sub(self.cursor)
    }
}

impl InputProvider for MockInput<'_> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<FeedInput>, Self::Error> {
        let event = self.events.get(self.cursor).copied();
        if event.is_some() {
            self.cursor += 1;
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_events_in_order_then_stays_quiet() {
        let events = [
            FeedInput::Scroll { offset_px: 420.0 },
            FeedInput::AdDismiss,
        ];
        let mut input = MockInput::new(&events);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll_event(), Ok(Some(FeedInput::Scroll { offset_px: 420.0 })));
        assert_eq!(input.poll_event(), Ok(Some(FeedInput::AdDismiss)));
        assert_eq!(input.poll_event(), Ok(None));
        assert_eq!(input.poll_event(), Ok(None));
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn idle_input_never_produces_events() {
        let mut input = MockInput::idle();
        assert_eq!(input.poll_event(), Ok(None));
    }
}
