//! Feed content model and content sources.

mod static_source;

pub use static_source::{DEMO_VIDEOS, StaticFeedSource, default_demo_source};

/// Playable short video delivered by the content source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VideoItem<'a> {
    pub id: &'a str,
    /// External player identifier (e.g. a hosted video id).
    pub media_ref: &'a str,
    pub creator_id: &'a str,
    pub creator_name: &'a str,
    pub title: &'a str,
    pub tags: &'a [&'a str],
    /// Display-only counters.
    pub views: u32,
    pub likes: u32,
}

/// Sponsored card placed between videos. Never accrues watch rewards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NativeAdSlot<'a> {
    pub slot: u16,
    pub advertiser: &'a str,
    pub headline: &'a str,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeedItemKind {
    PlayableVideo,
    NativeAdSlot,
}

/// Stable identity of a feed entry across re-renders.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemKey<'a> {
    Video(&'a str),
    NativeAd(u16),
}

/// One unit of the scrollable list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeedItem<'a> {
    Video(VideoItem<'a>),
    NativeAd(NativeAdSlot<'a>),
}

impl<'a> FeedItem<'a> {
    pub fn key(&self) -> ItemKey<'a> {
        match self {
            Self::Video(video) => ItemKey::Video(video.id),
            Self::NativeAd(ad) => ItemKey::NativeAd(ad.slot),
        }
    }

    pub fn kind(&self) -> FeedItemKind {
        match self {
            Self::Video(_) => FeedItemKind::PlayableVideo,
            Self::NativeAd(_) => FeedItemKind::NativeAdSlot,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    pub fn creator_id(&self) -> Option<&'a str> {
        match self {
            Self::Video(video) => Some(video.creator_id),
            Self::NativeAd(_) => None,
        }
    }
}

/// Ordered, read-only feed delivered once per session.
///
/// Implementations must keep indices stable for the lifetime of a session;
/// the core never re-fetches or reorders.
pub trait FeedCatalog {
    fn item_count(&self) -> u16;
    fn item_at(&self, index: u16) -> Option<FeedItem<'_>>;
}
