impl<FC, IN, LG, AP> FeedApp<FC, IN, LG, AP>
where
    FC: FeedCatalog,
    IN: InputProvider,
    LG: Ledger,
    AP: AdPresenter,
{
    pub fn new(content: FC, input: IN, ledger: LG, ads: AP, mut config: FeedConfig) -> Self {
        config.reward = config.reward.normalized();
        config.cadence = config.cadence.normalized();
        if !config.item_height_px.is_finite() || config.item_height_px <= 0.0 {
            config.item_height_px = DEFAULT_ITEM_HEIGHT_PX;
        }

        let item_count = content.item_count();
        if item_count as usize > MAX_FEED_ITEMS {
            warn!(
                "feed: {} items delivered, rewards accrue on the first {} only",
                item_count, MAX_FEED_ITEMS
            );
        }

        Self {
            content,
            input,
            ledger,
            ads,
            config,
            viewer: None,
            tracker: FeedPositionTracker::new(item_count, config.item_height_px),
            rewards: RewardEngine::new(item_count, config.reward),
            cadence: AdCadenceScheduler::new(config.cadence),
            ui: UiState::Feed,
            wallet: WalletSnapshot::default(),
            mounted: false,
            pending_redraw: true,
            last_progress_pct: 0,
            last_ad_countdown: None,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn content(&self) -> &FC {
        &self.content
    }

    pub fn ledger(&self) -> &LG {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LG {
        &mut self.ledger
    }

    pub fn ads(&self) -> &AP {
        &self.ads
    }

    /// Set or clear the signed-in viewer. Without a viewer nothing is credited.
    ///
    /// Returns `false` (and clears the viewer) when the id does not fit.
    pub fn set_viewer(&mut self, viewer_id: Option<&str>) -> bool {
        self.viewer = None;
        let Some(viewer_id) = viewer_id else {
            return true;
        };

        let mut id = String::new();
        if id.push_str(viewer_id).is_err() {
            warn!("identity: viewer id longer than {} bytes, rewards disabled", ID_BYTES);
            return false;
        }
        self.viewer = Some(id);
        true
    }

    pub fn viewer(&self) -> Option<&str> {
        self.viewer.as_deref()
    }

    pub fn active_index(&self) -> Option<u16> {
        self.tracker.active()
    }

    pub fn item_count(&self) -> u16 {
        self.tracker.item_count()
    }

    pub fn reward_progress(&self, index: u16) -> Option<RewardProgress> {
        self.rewards.progress(index)
    }

    pub fn last_triggered_ad_index(&self) -> u16 {
        self.cadence.last_triggered_index()
    }

    pub fn open_ad_kind(&self) -> Option<AdKind> {
        match self.ui {
            UiState::Ad(overlay) => Some(overlay.kind()),
            UiState::Feed => None,
        }
    }

    /// Optimistic local view of the viewer's earnings.
    pub fn wallet(&self) -> WalletSnapshot {
        self.wallet
    }

    pub fn with_screen<F>(&self, now_ms: u64, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let screen = match self.ui {
            UiState::Feed => match self.feed_view(now_ms) {
                Some(view) => Screen::Feed(view),
                None => Screen::Empty {
                    wallet: self.wallet,
                },
            },
            UiState::Ad(overlay) => Screen::Ad {
                ad: AdView::new(
                    overlay.kind(),
                    overlay.content(),
                    overlay.seconds_left(now_ms),
                    overlay.can_close(now_ms),
                ),
                behind: self.feed_view(now_ms),
            },
        };

        f(screen)
    }

    fn feed_view(&self, now_ms: u64) -> Option<FeedView<'_>> {
        let index = self.tracker.active()?;
        let item = self.content.item_at(index)?;
        let progress = self.rewards.progress(index);
        let rewarded = progress.is_some_and(|progress| progress.is_rewarded());
        let views = match item {
            FeedItem::Video(video) => video.views.saturating_add(1),
            FeedItem::NativeAd(_) => 0,
        };

        Some(FeedView {
            index,
            total: self.tracker.item_count(),
            item,
            progress_pct: self.rewards.progress_pct(index, now_ms),
            show_progress: item.is_playable() && progress.is_some() && !rewarded,
            rewarded,
            views,
            balance: self.wallet.balance,
        })
    }
}
