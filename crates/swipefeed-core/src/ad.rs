//! Full-screen ad overlay presentation.

use log::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdKind {
    Interstitial,
    Rewarded,
    RewardedInterstitial,
    AppOpen,
}

impl AdKind {
    /// Whether completing this ad credits the viewer an ad-watch bonus.
    pub fn grants_viewer_bonus(self) -> bool {
        matches!(self, Self::Rewarded | Self::RewardedInterstitial)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Interstitial => "ANÚNCIO INTERSTICIAL",
            Self::Rewarded => "VÍDEO PREMIADO",
            Self::RewardedInterstitial => "BÔNUS RELÂMPAGO",
            Self::AppOpen => "BEM-VINDO",
        }
    }
}

/// Minimum time an overlay stays locked before it can be closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdTiming {
    pub rewarded_min_ms: u32,
    pub default_min_ms: u32,
}

impl Default for AdTiming {
    fn default() -> Self {
        Self {
            rewarded_min_ms: 15_000,
            default_min_ms: 5_000,
        }
    }
}

impl AdTiming {
    pub fn min_display_ms(&self, kind: AdKind) -> u32 {
        match kind {
            AdKind::Rewarded => self.rewarded_min_ms,
            _ => self.default_min_ms,
        }
    }
}

/// Ad presentation collaborator. Only asked *what* to show once the
/// scheduler decided *when*.
pub trait AdPresenter {
    type Error;

    fn present(&mut self, kind: AdKind) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdContent {
    Loaded,
    /// Content failed to load; the overlay stays inert but dismissible.
    Placeholder,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverlayAction {
    Collect,
    Dismiss,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverlayOutcome {
    /// Minimum display time has not elapsed; the action was ignored.
    Locked,
    /// Overlay closed; `completed` is true when the viewer collected.
    Closed { completed: bool },
}

/// A presented ad, anchored to the feed index that triggered it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdOverlay {
    kind: AdKind,
    content: AdContent,
    anchor_index: Option<u16>,
    shown_at_ms: u64,
    min_display_ms: u32,
    collected: bool,
}

impl AdOverlay {
    pub fn new(
        kind: AdKind,
        content: AdContent,
        anchor_index: Option<u16>,
        now_ms: u64,
        timing: &AdTiming,
    ) -> Self {
        Self {
            kind,
            content,
            anchor_index,
            shown_at_ms: now_ms,
            min_display_ms: timing.min_display_ms(kind),
            collected: false,
        }
    }

    pub fn kind(&self) -> AdKind {
        self.kind
    }

    pub fn content(&self) -> AdContent {
        self.content
    }

    pub fn anchor_index(&self) -> Option<u16> {
        self.anchor_index
    }

    pub fn can_close(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.shown_at_ms) >= self.min_display_ms as u64
    }

    /// Whole seconds left on the lock, rounded up.
    pub fn seconds_left(&self, now_ms: u64) -> u8 {
        let elapsed = now_ms.saturating_sub(self.shown_at_ms);
        let remaining = (self.min_display_ms as u64).saturating_sub(elapsed);
        remaining.div_ceil(1_000).min(u8::MAX as u64) as u8
    }

    pub fn apply(&mut self, action: OverlayAction, now_ms: u64) -> OverlayOutcome {
        if !self.can_close(now_ms) {
            debug!(
                "ad-overlay: {:?} ignored, {}s left on {:?}",
                action,
                self.seconds_left(now_ms),
                self.kind
            );
            return OverlayOutcome::Locked;
        }

        // An inert placeholder closes but never completes.
        let completed = match action {
            OverlayAction::Collect if !self.collected && self.content == AdContent::Loaded => {
                self.collected = true;
                true
            }
            _ => false,
        };
        OverlayOutcome::Closed { completed }
    }
}
