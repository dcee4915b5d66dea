impl<FC, IN, LG, AP> FeedApp<FC, IN, LG, AP>
where
    FC: FeedCatalog,
    IN: InputProvider,
    LG: Ledger,
    AP: AdPresenter,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: provider error, remaining events deferred to next tick");
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: FeedInput, now_ms: u64) {
        match (self.ui, event) {
            (UiState::Feed, FeedInput::Scroll { offset_px }) => {
                if let Some(change) = self.tracker.observe(offset_px) {
                    self.on_index_changed(change, now_ms);
                }
            }
            (UiState::Ad(overlay), FeedInput::Scroll { offset_px }) => {
                debug!(
                    "ui-feed: scroll offset={} dropped while {:?} overlay is open",
                    offset_px,
                    overlay.kind()
                );
            }
            (_, FeedInput::Resize { item_height_px }) => {
                self.tracker.set_item_height(item_height_px);
                self.pending_redraw = true;
            }
            (UiState::Feed, FeedInput::RequestRewardedAd) => {
                self.open_ad(AdKind::Rewarded, None, now_ms)
            }
            (UiState::Ad(overlay), FeedInput::RequestRewardedAd) => {
                debug!("ui-ad: rewarded ad request ignored, {:?} already open", overlay.kind());
            }
            (UiState::Ad(overlay), FeedInput::AdCollect) => {
                self.apply_overlay_action(overlay, OverlayAction::Collect, now_ms)
            }
            (UiState::Ad(overlay), FeedInput::AdDismiss) => {
                self.apply_overlay_action(overlay, OverlayAction::Dismiss, now_ms)
            }
            (UiState::Feed, FeedInput::AdCollect | FeedInput::AdDismiss) => {
                debug!("ui-feed: {:?} without an open overlay", event);
            }
        }
    }

    fn on_index_changed(&mut self, change: IndexChange, now_ms: u64) {
        // Deactivate before activating so a reward already earned by the
        // outgoing item is granted ahead of the switch.
        if let Some(old) = change.old
            && self.rewards.deactivate(old, now_ms).is_some()
        {
            self.grant_watch_reward(old);
        }

        let playable = self
            .content
            .item_at(change.new)
            .is_some_and(|item| item.is_playable());
        if playable && self.rewards.activate(change.new, now_ms).is_some() {
            self.grant_watch_reward(change.new);
        }

        self.last_progress_pct = self.rewards.progress_pct(change.new, now_ms);
        self.pending_redraw = true;

        if let Some(kind) = self.cadence.on_index_changed(change) {
            self.open_ad(kind, Some(change.new), now_ms);
        }
    }

    fn open_ad(&mut self, kind: AdKind, anchor_index: Option<u16>, now_ms: u64) {
        let content = match self.ads.present(kind) {
            Ok(()) => AdContent::Loaded,
            Err(_) => {
                warn!("ads: {:?} failed to load, showing placeholder", kind);
                AdContent::Placeholder
            }
        };

        debug!(
            "ui-ad: open {:?} content={:?} anchor={:?}",
            kind, content, anchor_index
        );
        self.ui = UiState::Ad(AdOverlay::new(
            kind,
            content,
            anchor_index,
            now_ms,
            &self.config.ad_timing,
        ));
        self.last_ad_countdown = None;
        self.pending_redraw = true;
    }

    fn apply_overlay_action(&mut self, mut overlay: AdOverlay, action: OverlayAction, now_ms: u64) {
        match overlay.apply(action, now_ms) {
            OverlayOutcome::Locked => {
                self.ui = UiState::Ad(overlay);
            }
            OverlayOutcome::Closed { completed } => {
                debug!(
                    "ui-ad: close {:?} action={:?} completed={}",
                    overlay.kind(),
                    action,
                    completed
                );
                if completed {
                    self.complete_ad(&overlay);
                }
                self.ui = UiState::Feed;
                self.last_ad_countdown = None;
                self.pending_redraw = true;
            }
        }
    }
}
