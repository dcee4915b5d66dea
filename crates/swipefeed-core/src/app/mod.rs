//! Feed session state machine: scroll tracking, watch rewards and ad overlays.

use heapless::String;
use log::{debug, warn};

use crate::{
    ad::{AdContent, AdKind, AdOverlay, AdPresenter, AdTiming, OverlayAction, OverlayOutcome},
    cadence::{AdCadencePolicy, AdCadenceScheduler},
    feed::{FeedCatalog, FeedItem},
    input::{FeedInput, InputProvider},
    ledger::{ID_BYTES, Ledger, RewardAmounts, RewardKind, WalletSnapshot},
    render::{AdView, FeedView, Screen},
    reward::{RewardEngine, RewardPolicy, RewardProgress},
    tracker::{FeedPositionTracker, IndexChange},
};

/// Reward slots per session. Items past this index scroll and trigger ads
/// like any other but never accrue watch rewards.
pub const MAX_FEED_ITEMS: usize = 256;
const DEFAULT_ITEM_HEIGHT_PX: f32 = 844.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedConfig {
    pub reward: RewardPolicy,
    pub cadence: AdCadencePolicy,
    pub ad_timing: AdTiming,
    pub amounts: RewardAmounts,
    /// Initial viewport height; every item fills one viewport.
    pub item_height_px: f32,
    /// Present an app-open ad on the first tick.
    pub app_open_ad: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            reward: RewardPolicy::default(),
            cadence: AdCadencePolicy::default(),
            ad_timing: AdTiming::default(),
            amounts: RewardAmounts::default(),
            item_height_px: DEFAULT_ITEM_HEIGHT_PX,
            app_open_ad: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UiState {
    Feed,
    /// Modal; scroll samples are dropped until the overlay closes.
    Ad(AdOverlay),
}

pub struct FeedApp<FC, IN, LG, AP>
where
    FC: FeedCatalog,
    IN: InputProvider,
    LG: Ledger,
    AP: AdPresenter,
{
    content: FC,
    input: IN,
    ledger: LG,
    ads: AP,
    config: FeedConfig,
    viewer: Option<String<ID_BYTES>>,
    tracker: FeedPositionTracker,
    rewards: RewardEngine<MAX_FEED_ITEMS>,
    cadence: AdCadenceScheduler,
    ui: UiState,
    wallet: WalletSnapshot,
    mounted: bool,
    pending_redraw: bool,
    last_progress_pct: u8,
    last_ad_countdown: Option<(u8, bool)>,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
