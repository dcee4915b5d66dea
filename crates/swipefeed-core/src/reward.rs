//! Watch-time reward eligibility.
//!
//! Each playable feed item owns a [`RewardProgress`]. The item accrues
//! wall-clock watch time while it is the active item and grants a single
//! reward once the accrued time reaches [`RewardPolicy::threshold_ms`].
//! Deactivating an item before that discards the accrued time; a later
//! activation starts again from zero. A rewarded item never accrues again.
//!
//! Transitions are pure: [`RewardProgress::advance`] takes an event carrying
//! its own timestamp and returns the next state plus the emitted effect, so
//! the decision does not depend on how often the caller samples.

use heapless::Vec;
use log::debug;

pub const DEFAULT_REWARD_THRESHOLD_MS: u32 = 8_000;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardPolicy {
    pub threshold_ms: u32,
    /// Progress sampling period. Only affects UI feedback, never eligibility.
    pub sample_interval_ms: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            threshold_ms: DEFAULT_REWARD_THRESHOLD_MS,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
        }
    }
}

impl RewardPolicy {
    /// Threshold at least 1 ms, sample interval within `1..=threshold / 10`.
    pub fn normalized(mut self) -> Self {
        self.threshold_ms = self.threshold_ms.max(1);
        self.sample_interval_ms = self
            .sample_interval_ms
            .clamp(1, (self.threshold_ms / 10).max(1));
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardPhase {
    /// Never activated.
    Idle,
    Accruing { started_ms: u64 },
    /// Deactivated before the threshold; accrued time was discarded.
    Paused,
    /// Terminal.
    Rewarded,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackEvent {
    Activated { at_ms: u64 },
    Deactivated { at_ms: u64 },
    Sampled { at_ms: u64 },
}

/// One-shot effect: the item crossed the watch threshold.
///
/// Carries no amount; the ledger boundary decides how much to credit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardTriggered;

pub fn elapsed_ms(now_ms: u64, started_ms: u64) -> u64 {
    now_ms.saturating_sub(started_ms)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardProgress {
    phase: RewardPhase,
}

impl Default for RewardProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardProgress {
    pub const fn new() -> Self {
        Self {
            phase: RewardPhase::Idle,
        }
    }

    pub fn phase(&self) -> RewardPhase {
        self.phase
    }

    pub fn is_rewarded(&self) -> bool {
        matches!(self.phase, RewardPhase::Rewarded)
    }

    pub fn advance(
        self,
        event: PlaybackEvent,
        policy: &RewardPolicy,
    ) -> (Self, Option<RewardTriggered>) {
        let threshold = policy.threshold_ms as u64;

        let (phase, effect) = match (self.phase, event) {
            (RewardPhase::Rewarded, _) => (RewardPhase::Rewarded, None),
            (RewardPhase::Idle | RewardPhase::Paused, PlaybackEvent::Activated { at_ms }) => {
                (RewardPhase::Accruing { started_ms: at_ms }, None)
            }
            (phase @ (RewardPhase::Idle | RewardPhase::Paused), _) => (phase, None),
            (RewardPhase::Accruing { started_ms }, PlaybackEvent::Activated { .. }) => {
                // Re-activation while already accruing keeps the running measurement.
                (RewardPhase::Accruing { started_ms }, None)
            }
            (RewardPhase::Accruing { started_ms }, PlaybackEvent::Sampled { at_ms }) => {
                if elapsed_ms(at_ms, started_ms) >= threshold {
                    (RewardPhase::Rewarded, Some(RewardTriggered))
                } else {
                    (RewardPhase::Accruing { started_ms }, None)
                }
            }
            (RewardPhase::Accruing { started_ms }, PlaybackEvent::Deactivated { at_ms }) => {
                // A threshold already reached is granted before the deactivation discards time.
                if elapsed_ms(at_ms, started_ms) >= threshold {
                    (RewardPhase::Rewarded, Some(RewardTriggered))
                } else {
                    (RewardPhase::Paused, None)
                }
            }
        };

        (Self { phase }, effect)
    }

    /// Watch progress in percent for UI feedback.
    pub fn progress_pct(&self, now_ms: u64, policy: &RewardPolicy) -> u8 {
        match self.phase {
            RewardPhase::Idle | RewardPhase::Paused => 0,
            RewardPhase::Rewarded => 100,
            RewardPhase::Accruing { started_ms } => {
                let threshold = policy.threshold_ms.max(1) as u64;
                let elapsed = elapsed_ms(now_ms, started_ms).min(threshold);
                (elapsed * 100 / threshold) as u8
            }
        }
    }
}

/// Reward slots for every feed index in a session, plus the next sampling deadline.
#[derive(Debug)]
pub struct RewardEngine<const N: usize> {
    policy: RewardPolicy,
    slots: Vec<RewardProgress, N>,
    next_sample_ms: Option<u64>,
}

impl<const N: usize> RewardEngine<N> {
    /// Slots beyond `N` are not tracked and never reward.
    pub fn new(item_count: u16, policy: RewardPolicy) -> Self {
        let mut slots = Vec::new();
        for _ in 0..(item_count as usize).min(N) {
            let _ = slots.push(RewardProgress::new());
        }

        Self {
            policy: policy.normalized(),
            slots,
            next_sample_ms: None,
        }
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    pub fn tracked_count(&self) -> usize {
        self.slots.len()
    }

    pub fn progress(&self, index: u16) -> Option<RewardProgress> {
        self.slots.get(index as usize).copied()
    }

    pub fn activate(&mut self, index: u16, now_ms: u64) -> Option<RewardTriggered> {
        let effect = self.apply(index, PlaybackEvent::Activated { at_ms: now_ms });
        self.schedule_sample(index, now_ms);
        effect
    }

    pub fn deactivate(&mut self, index: u16, now_ms: u64) -> Option<RewardTriggered> {
        self.next_sample_ms = None;
        self.apply(index, PlaybackEvent::Deactivated { at_ms: now_ms })
    }

    /// Whether the active item should be re-checked at `now_ms`.
    pub fn due(&self, now_ms: u64) -> bool {
        self.next_sample_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    pub fn sample(&mut self, index: u16, now_ms: u64) -> Option<RewardTriggered> {
        let effect = self.apply(index, PlaybackEvent::Sampled { at_ms: now_ms });
        self.schedule_sample(index, now_ms);
        effect
    }

    pub fn progress_pct(&self, index: u16, now_ms: u64) -> u8 {
        self.progress(index)
            .map(|progress| progress.progress_pct(now_ms, &self.policy))
            .unwrap_or(0)
    }

    /// Next check is one sampling period away, but never later than the
    /// moment the threshold is reached.
    fn schedule_sample(&mut self, index: u16, now_ms: u64) {
        self.next_sample_ms = match self.progress(index).map(|progress| progress.phase()) {
            Some(RewardPhase::Accruing { started_ms }) => {
                let threshold_at = started_ms.saturating_add(self.policy.threshold_ms as u64);
                let next = now_ms.saturating_add(self.policy.sample_interval_ms as u64);
                Some(next.min(threshold_at).max(now_ms))
            }
            _ => None,
        };
    }

    fn apply(&mut self, index: u16, event: PlaybackEvent) -> Option<RewardTriggered> {
        let slot = self.slots.get_mut(index as usize)?;
        let before = slot.phase();
        let (next, effect) = slot.advance(event, &self.policy);
        *slot = next;

        if before != next.phase() {
            debug!(
                "reward: index={} {:?} -> {:?} on {:?}",
                index,
                before,
                next.phase(),
                event
            );
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RewardPolicy {
        RewardPolicy::default()
    }

    #[test]
    fn holding_for_the_threshold_rewards_exactly_once() {
        let policy = policy();
        let progress = RewardProgress::new();
        let (progress, effect) = progress.advance(PlaybackEvent::Activated { at_ms: 1_000 }, &policy);
        assert_eq!(effect, None);

        let (progress, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 8_999 }, &policy);
        assert_eq!(effect, None);

        let (progress, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 9_000 }, &policy);
        assert_eq!(effect, Some(RewardTriggered));
        assert!(progress.is_rewarded());

        let (progress, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 9_100 }, &policy);
        assert_eq!(effect, None);
        let (_, effect) = progress.advance(PlaybackEvent::Activated { at_ms: 20_000 }, &policy);
        assert_eq!(effect, None);
    }

    #[test]
    fn early_deactivation_discards_accrued_time() {
        let policy = policy();
        let (progress, _) =
            RewardProgress::new().advance(PlaybackEvent::Activated { at_ms: 0 }, &policy);
        let (progress, effect) =
            progress.advance(PlaybackEvent::Deactivated { at_ms: 7_999 }, &policy);
        assert_eq!(effect, None);
        assert_eq!(progress.phase(), RewardPhase::Paused);

        let (progress, _) = progress.advance(PlaybackEvent::Activated { at_ms: 10_000 }, &policy);
        let (progress, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 17_999 }, &policy);
        assert_eq!(effect, None);
        let (_, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 18_000 }, &policy);
        assert_eq!(effect, Some(RewardTriggered));
    }

    #[test]
    fn deactivation_after_threshold_still_rewards() {
        let policy = policy();
        let (progress, _) =
            RewardProgress::new().advance(PlaybackEvent::Activated { at_ms: 0 }, &policy);
        let (progress, effect) =
            progress.advance(PlaybackEvent::Deactivated { at_ms: 8_050 }, &policy);
        assert_eq!(effect, Some(RewardTriggered));
        assert!(progress.is_rewarded());
    }

    #[test]
    fn irregular_sampling_does_not_change_eligibility() {
        let policy = policy();
        let (progress, _) =
            RewardProgress::new().advance(PlaybackEvent::Activated { at_ms: 500 }, &policy);
        // A single late sample (e.g. after a frame stall) is enough.
        let (_, effect) = progress.advance(PlaybackEvent::Sampled { at_ms: 30_000 }, &policy);
        assert_eq!(effect, Some(RewardTriggered));
    }

    #[test]
    fn progress_is_reported_in_percent() {
        let policy = policy();
        let (progress, _) =
            RewardProgress::new().advance(PlaybackEvent::Activated { at_ms: 0 }, &policy);
        assert_eq!(progress.progress_pct(0, &policy), 0);
        assert_eq!(progress.progress_pct(4_000, &policy), 50);
        assert_eq!(progress.progress_pct(60_000, &policy), 100);
        assert_eq!(RewardProgress::new().progress_pct(5_000, &policy), 0);
    }

    #[test]
    fn policy_normalization_bounds_sampling() {
        let policy = RewardPolicy {
            threshold_ms: 0,
            sample_interval_ms: 0,
        }
        .normalized();
        assert_eq!(policy.threshold_ms, 1);
        assert_eq!(policy.sample_interval_ms, 1);

        let policy = RewardPolicy {
            threshold_ms: 8_000,
            sample_interval_ms: 5_000,
        }
        .normalized();
        assert_eq!(policy.sample_interval_ms, 800);
    }

    #[test]
    fn engine_rewards_each_item_at_most_once_across_cycles() {
        let mut engine = RewardEngine::<4>::new(3, policy());
        let mut rewards = 0;
        let mut now = 0u64;

        for _ in 0..5 {
            if engine.activate(1, now).is_some() {
                rewards += 1;
            }
            now += 3_000;
            if engine.sample(1, now).is_some() {
                rewards += 1;
            }
            if engine.deactivate(1, now).is_some() {
                rewards += 1;
            }
        }
        assert_eq!(rewards, 0);

        engine.activate(1, now);
        now += 8_000;
        assert!(engine.due(now));
        assert_eq!(engine.sample(1, now), Some(RewardTriggered));
        assert!(!engine.due(now + 1_000));
        assert_eq!(engine.deactivate(1, now + 1), None);
        assert_eq!(engine.activate(1, now + 2), None);
        assert_eq!(engine.sample(1, now + 20_000), None);
    }

    #[test]
    fn engine_schedules_bounded_sampling() {
        let mut engine = RewardEngine::<2>::new(2, policy());
        engine.activate(0, 1_000);
        assert!(!engine.due(1_099));
        assert!(engine.due(1_100));
        engine.sample(0, 1_100);
        assert!(!engine.due(1_150));
        assert!(engine.due(1_200));
        engine.deactivate(0, 1_250);
        assert!(!engine.due(50_000));
    }

    #[test]
    fn engine_checks_exactly_at_the_threshold() {
        let mut engine = RewardEngine::<1>::new(1, policy());
        engine.activate(0, 0);
        engine.sample(0, 7_950);
        assert!(!engine.due(7_999));
        assert!(engine.due(8_000));
        assert_eq!(engine.sample(0, 8_000), Some(RewardTriggered));
    }

    #[test]
    fn engine_ignores_untracked_indices() {
        let mut engine = RewardEngine::<2>::new(5, policy());
        assert_eq!(engine.tracked_count(), 2);
        assert_eq!(engine.activate(4, 0), None);
        assert_eq!(engine.sample(4, 10_000), None);
        assert_eq!(engine.progress_pct(4, 10_000), 0);
    }
}
