//! View models handed to the presentation layer.

use crate::{
    ad::{AdContent, AdKind},
    feed::FeedItem,
    ledger::{Amount, WalletSnapshot},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeedView<'a> {
    pub index: u16,
    pub total: u16,
    pub item: FeedItem<'a>,
    /// 0..=100, watch progress toward the reward.
    pub progress_pct: u8,
    pub show_progress: bool,
    pub rewarded: bool,
    /// Display counter including the current view.
    pub views: u32,
    pub balance: Amount,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdView {
    pub kind: AdKind,
    pub title: &'static str,
    pub placeholder: bool,
    pub seconds_left: u8,
    pub can_close: bool,
}

impl AdView {
    pub fn new(kind: AdKind, content: AdContent, seconds_left: u8, can_close: bool) -> Self {
        Self {
            kind,
            title: kind.label(),
            placeholder: matches!(content, AdContent::Placeholder),
            seconds_left,
            can_close,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    /// Content source delivered no items.
    Empty { wallet: WalletSnapshot },
    Feed(FeedView<'a>),
    Ad {
        ad: AdView,
        /// Feed item under the overlay, if any.
        behind: Option<FeedView<'a>>,
    },
}
