impl<FC, IN, LG, AP> FeedApp<FC, IN, LG, AP>
where
    FC: FeedCatalog,
    IN: InputProvider,
    LG: Ledger,
    AP: AdPresenter,
{
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if !self.mounted {
            self.mount(now_ms);
        }

        self.process_inputs(now_ms);
        self.sample_active(now_ms);
        let countdown_changed = self.tick_overlay(now_ms);

        if self.pending_redraw || countdown_changed {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    fn mount(&mut self, now_ms: u64) {
        self.mounted = true;
        self.pending_redraw = true;

        if let Some(active) = self.tracker.active() {
            let playable = self
                .content
                .item_at(active)
                .is_some_and(|item| item.is_playable());
            if playable && self.rewards.activate(active, now_ms).is_some() {
                self.grant_watch_reward(active);
            }
        }
        debug!(
            "ui-feed: mounted items={} active={:?}",
            self.tracker.item_count(),
            self.tracker.active()
        );

        if self.config.app_open_ad {
            self.open_ad(AdKind::AppOpen, None, now_ms);
        }
    }

    fn sample_active(&mut self, now_ms: u64) {
        let Some(active) = self.tracker.active() else {
            return;
        };
        if !self.rewards.due(now_ms) {
            return;
        }

        if self.rewards.sample(active, now_ms).is_some() {
            self.grant_watch_reward(active);
        }

        let pct = self.rewards.progress_pct(active, now_ms);
        if pct != self.last_progress_pct {
            self.last_progress_pct = pct;
            self.pending_redraw = true;
        }
    }

    fn tick_overlay(&mut self, now_ms: u64) -> bool {
        let UiState::Ad(overlay) = self.ui else {
            return false;
        };

        let countdown = (overlay.seconds_left(now_ms), overlay.can_close(now_ms));
        if self.last_ad_countdown == Some(countdown) {
            return false;
        }
        self.last_ad_countdown = Some(countdown);
        true
    }

    fn grant_watch_reward(&mut self, index: u16) {
        let Some(viewer) = self.viewer.as_deref() else {
            debug!("reward: index={} earned with no viewer, crediting disabled", index);
            return;
        };

        let amount = self.config.amounts.watch;
        self.wallet.credit(RewardKind::Watch, amount);
        self.pending_redraw = true;
        debug!("reward: index={} credit viewer={} amount={}", index, viewer, amount);

        if self
            .ledger
            .credit_viewer_reward(viewer, RewardKind::Watch, amount)
            .is_err()
        {
            warn!(
                "ledger: watch credit for index={} failed, kept locally",
                index
            );
        }
    }

    fn complete_ad(&mut self, overlay: &AdOverlay) {
        self.wallet.ads_completed = self.wallet.ads_completed.saturating_add(1);

        let Some(viewer) = self.viewer.as_deref() else {
            debug!("ads: {:?} completed with no viewer, crediting disabled", overlay.kind());
            return;
        };

        if overlay.kind().grants_viewer_bonus() {
            let amount = self.config.amounts.ad_watch;
            self.wallet.credit(RewardKind::AdWatched, amount);
            if self
                .ledger
                .credit_viewer_reward(viewer, RewardKind::AdWatched, amount)
                .is_err()
            {
                warn!("ledger: ad bonus for {:?} failed, kept locally", overlay.kind());
            }
        }

        let creator = overlay
            .anchor_index()
            .and_then(|index| self.content.item_at(index))
            .and_then(|item| item.creator_id());
        if let Some(creator_id) = creator {
            let amount = self.config.amounts.creator_ad;
            if creator_id == viewer {
                self.wallet.credit(RewardKind::CreatorAdBonus, amount);
            }
            if self
                .ledger
                .credit_creator_reward(creator_id, RewardKind::CreatorAdBonus, amount)
                .is_err()
            {
                warn!("ledger: creator bonus for {} failed", creator_id);
            }
        }
    }
}
