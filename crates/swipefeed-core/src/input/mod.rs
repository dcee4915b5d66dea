//! Input abstraction layer.

pub mod mock;

/// Logical actions consumed by the feed session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedInput {
    /// Current scroll offset of the feed container.
    Scroll { offset_px: f32 },
    /// Viewport resize; every feed item is one viewport tall.
    Resize { item_height_px: f32 },
    /// Wallet "watch a bonus video" button; opens a rewarded ad on request.
    RequestRewardedAd,
    /// Ad overlay "collect reward" button.
    AdCollect,
    /// Ad overlay close button.
    AdDismiss,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<FeedInput>, Self::Error>;
}
