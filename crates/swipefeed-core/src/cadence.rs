//! Index-based ad injection policy.

use log::debug;

use crate::{ad::AdKind, tracker::IndexChange};

pub const DEFAULT_INTERSTITIAL_PERIOD: u16 = 5;
pub const DEFAULT_REWARDED_INTERSTITIAL_PERIOD: u16 = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdCadencePolicy {
    pub interstitial_period: u16,
    pub rewarded_interstitial_period: u16,
}

impl Default for AdCadencePolicy {
    fn default() -> Self {
        Self {
            interstitial_period: DEFAULT_INTERSTITIAL_PERIOD,
            rewarded_interstitial_period: DEFAULT_REWARDED_INTERSTITIAL_PERIOD,
        }
    }
}

impl AdCadencePolicy {
    pub fn normalized(mut self) -> Self {
        self.interstitial_period = self.interstitial_period.max(1);
        self.rewarded_interstitial_period = self.rewarded_interstitial_period.max(1);
        self
    }
}

/// Decides on which active-index changes a full-screen ad interrupts the feed.
///
/// Rules are evaluated in order and the first match wins, so an index that is
/// a multiple of both periods gets the standard interstitial. An index that
/// already triggered an ad never triggers again while it stays the last
/// triggered index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdCadenceScheduler {
    policy: AdCadencePolicy,
    last_triggered_index: u16,
}

impl AdCadenceScheduler {
    pub fn new(policy: AdCadencePolicy) -> Self {
        Self {
            policy: policy.normalized(),
            last_triggered_index: 0,
        }
    }

    pub fn last_triggered_index(&self) -> u16 {
        self.last_triggered_index
    }

    pub fn on_index_changed(&mut self, change: IndexChange) -> Option<AdKind> {
        let index = change.new;
        if index == 0 || index == self.last_triggered_index {
            return None;
        }

        let kind = if index % self.policy.interstitial_period == 0 {
            AdKind::Interstitial
        } else if index % self.policy.rewarded_interstitial_period == 0 {
            AdKind::RewardedInterstitial
        } else {
            return None;
        };

        debug!(
            "cadence: schedule {:?} at index={} (from {:?}, last={})",
            kind, index, change.old, self.last_triggered_index
        );
        self.last_triggered_index = index;
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(scheduler: &mut AdCadenceScheduler, old: u16, new: u16) -> Option<AdKind> {
        scheduler.on_index_changed(IndexChange {
            old: Some(old),
            new,
        })
    }

    #[test]
    fn sequential_scroll_hits_both_periods() {
        let mut scheduler = AdCadenceScheduler::new(AdCadencePolicy::default());
        let mut triggered = heapless::Vec::<(u16, AdKind), 8>::new();

        for index in 1..=12u16 {
            if let Some(kind) = step(&mut scheduler, index - 1, index) {
                triggered.push((index, kind)).unwrap();
            }
        }

        assert_eq!(
            triggered.as_slice(),
            &[
                (5u16, AdKind::Interstitial),
                (10, AdKind::Interstitial),
                (12, AdKind::RewardedInterstitial),
            ]
        );
    }

    #[test]
    fn index_zero_never_triggers() {
        let mut scheduler = AdCadenceScheduler::new(AdCadencePolicy::default());
        assert_eq!(step(&mut scheduler, 3, 0), None);
    }

    #[test]
    fn bouncing_back_to_the_triggered_index_does_not_retrigger() {
        let mut scheduler = AdCadenceScheduler::new(AdCadencePolicy::default());
        assert_eq!(step(&mut scheduler, 4, 5), Some(AdKind::Interstitial));
        assert_eq!(step(&mut scheduler, 5, 4), None);
        assert_eq!(step(&mut scheduler, 4, 5), None);
        assert_eq!(scheduler.last_triggered_index(), 5);
    }

    #[test]
    fn multiples_of_both_periods_take_the_first_rule() {
        let mut scheduler = AdCadenceScheduler::new(AdCadencePolicy::default());
        assert_eq!(step(&mut scheduler, 59, 60), Some(AdKind::Interstitial));
        assert_eq!(step(&mut scheduler, 60, 61), None);
    }

    #[test]
    fn zero_periods_are_normalized() {
        let mut scheduler = AdCadenceScheduler::new(AdCadencePolicy {
            interstitial_period: 0,
            rewarded_interstitial_period: 0,
        });
        assert_eq!(step(&mut scheduler, 0, 1), Some(AdKind::Interstitial));
    }
}
