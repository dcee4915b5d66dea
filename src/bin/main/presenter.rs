use log::info;
use swipefeed_core::ad::{AdKind, AdPresenter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct AdLoadError;

/// Prints presented ads; `broken` simulates an ad unit that never loads.
pub(super) struct ConsolePresenter {
    broken: Option<AdKind>,
    presented: u32,
}

impl ConsolePresenter {
    pub(super) fn new(broken: Option<AdKind>) -> Self {
        Self {
            broken,
            presented: 0,
        }
    }

    pub(super) fn presented(&self) -> u32 {
        self.presented
    }
}

impl AdPresenter for ConsolePresenter {
    type Error = AdLoadError;

    fn present(&mut self, kind: AdKind) -> Result<(), Self::Error> {
        if self.broken == Some(kind) {
            return Err(AdLoadError);
        }
        self.presented += 1;
        info!("ads: presenting \"{}\"", kind.label());
        Ok(())
    }
}
