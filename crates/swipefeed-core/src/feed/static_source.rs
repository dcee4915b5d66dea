use super::{FeedCatalog, FeedItem, NativeAdSlot, VideoItem};

const DEFAULT_ADVERTISER: &str = "anunciante_oficial";
const DEFAULT_HEADLINE: &str = "Conheça o Novo App Premium";

/// Sample feed used by the host simulator and tests.
pub const DEMO_VIDEOS: [VideoItem<'static>; 2] = [
    VideoItem {
        id: "1",
        media_ref: "3X0-85zT970",
        creator_id: "user1",
        creator_name: "Tech Master",
        title: "Dicas Incríveis de React",
        tags: &["react", "coding", "tech"],
        views: 1_200,
        likes: 450,
    },
    VideoItem {
        id: "2",
        media_ref: "pS-gbqVPaW8",
        creator_id: "user2",
        creator_name: "Viagem & Aventura",
        title: "Paraíso Escondido no Brasil",
        tags: &["viagem", "natureza", "brasil"],
        views: 8_500,
        likes: 2_100,
    },
];

pub fn default_demo_source() -> StaticFeedSource<'static> {
    StaticFeedSource::new(&DEMO_VIDEOS)
}

/// Static in-memory feed, optionally interleaving a native ad card after
/// every `n` videos.
#[derive(Debug, Clone)]
pub struct StaticFeedSource<'a> {
    videos: &'a [VideoItem<'a>],
    native_ad_every: u16,
    advertiser: &'a str,
    headline: &'a str,
}

impl<'a> StaticFeedSource<'a> {
    pub fn new(videos: &'a [VideoItem<'a>]) -> Self {
        Self {
            videos,
            native_ad_every: 0,
            advertiser: DEFAULT_ADVERTISER,
            headline: DEFAULT_HEADLINE,
        }
    }

    /// Place a native ad slot after every `every` videos. `0` disables slots.
    pub fn with_native_ads(mut self, every: u16, advertiser: &'a str, headline: &'a str) -> Self {
        self.native_ad_every = every;
        self.advertiser = advertiser;
        self.headline = headline;
        self
    }

    fn video_count(&self) -> usize {
        self.videos.len().min(u16::MAX as usize)
    }
}

impl FeedCatalog for StaticFeedSource<'_> {
    fn item_count(&self) -> u16 {
        let videos = self.video_count();
        let slots = match self.native_ad_every {
            0 => 0,
            every => videos / every as usize,
        };
        (videos + slots).min(u16::MAX as usize) as u16
    }

    fn item_at(&self, index: u16) -> Option<FeedItem<'_>> {
        if index >= self.item_count() {
            return None;
        }

        let index = index as usize;
        if self.native_ad_every == 0 {
            return self.videos.get(index).copied().map(FeedItem::Video);
        }

        let block = self.native_ad_every as usize + 1;
        let (group, pos) = (index / block, index % block);
        if pos == self.native_ad_every as usize {
            return Some(FeedItem::NativeAd(NativeAdSlot {
                slot: group as u16,
                advertiser: self.advertiser,
                headline: self.headline,
            }));
        }

        self.videos
            .get(group * self.native_ad_every as usize + pos)
            .copied()
            .map(FeedItem::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedItemKind, ItemKey};

    const FOUR: [VideoItem<'static>; 4] = [
        DEMO_VIDEOS[0],
        DEMO_VIDEOS[1],
        VideoItem {
            id: "3",
            ..DEMO_VIDEOS[0]
        },
        VideoItem {
            id: "4",
            ..DEMO_VIDEOS[1]
        },
    ];

    #[test]
    fn plain_source_keeps_delivery_order() {
        let source = default_demo_source();
        assert_eq!(source.item_count(), 2);
        assert_eq!(source.item_at(0).map(|item| item.key()), Some(ItemKey::Video("1")));
        assert_eq!(source.item_at(1).map(|item| item.key()), Some(ItemKey::Video("2")));
        assert!(source.item_at(2).is_none());
    }

    #[test]
    fn native_slots_follow_every_block_of_videos() {
        let source = StaticFeedSource::new(&FOUR).with_native_ads(2, "acme", "buy");
        assert_eq!(source.item_count(), 6);

        let kinds: [FeedItemKind; 6] =
            core::array::from_fn(|idx| source.item_at(idx as u16).map(|item| item.kind()).unwrap());
        assert_eq!(
            kinds,
            [
                FeedItemKind::PlayableVideo,
                FeedItemKind::PlayableVideo,
                FeedItemKind::NativeAdSlot,
                FeedItemKind::PlayableVideo,
                FeedItemKind::PlayableVideo,
                FeedItemKind::NativeAdSlot,
            ]
        );
        assert_eq!(source.item_at(3).map(|item| item.key()), Some(ItemKey::Video("3")));
        assert_eq!(source.item_at(5).map(|item| item.key()), Some(ItemKey::NativeAd(1)));
        assert_eq!(source.item_at(2).and_then(|item| item.creator_id()), None);
    }

    #[test]
    fn empty_source_has_no_items() {
        let source = StaticFeedSource::new(&[]).with_native_ads(3, "acme", "buy");
        assert_eq!(source.item_count(), 0);
        assert!(source.item_at(0).is_none());
    }
}
