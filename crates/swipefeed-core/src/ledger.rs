//! Virtual currency ledger boundary and wallet snapshot.

use heapless::{String, Vec};

pub const ID_BYTES: usize = 48;

/// Currency amount in micro-units (1/1_000_000 of the display unit).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MICROS_PER_UNIT: u64 = 1_000_000;

    pub const fn micros(self) -> u64 {
        self.0
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `(whole, fraction)` split, with the fraction in units of 1/10_000.
    pub const fn split_4(self) -> (u64, u64) {
        (
            self.0 / Self::MICROS_PER_UNIT,
            (self.0 % Self::MICROS_PER_UNIT) / 100,
        )
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (whole, fraction) = self.split_4();
        write!(f, "{}.{:04}", whole, fraction)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardKind {
    /// Viewer watched a video past the reward threshold.
    Watch,
    /// Viewer completed a rewarded ad.
    AdWatched,
    /// Creator bonus for an ad completed on top of their video.
    CreatorAdBonus,
}

/// Fixed amounts credited per trigger type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardAmounts {
    pub watch: Amount,
    pub ad_watch: Amount,
    pub creator_ad: Amount,
}

impl Default for RewardAmounts {
    fn default() -> Self {
        Self {
            watch: Amount(2_500),
            ad_watch: Amount(2_500),
            creator_ad: Amount(2_500),
        }
    }
}

/// Persistence collaborator for earnings.
///
/// Calls are fire-and-forget from the feed's point of view: failures are
/// logged and never retried by the caller. Implementations must tolerate
/// duplicate credits.
pub trait Ledger {
    type Error;

    fn credit_viewer_reward(
        &mut self,
        viewer_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error>;

    fn credit_creator_reward(
        &mut self,
        creator_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error>;
}

/// Earnings as surfaced by the wallet view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WalletSnapshot {
    pub balance: Amount,
    pub viewer_earnings: Amount,
    pub creator_earnings: Amount,
    pub ad_bonus_earnings: Amount,
    pub rewards_granted: u32,
    pub ads_completed: u32,
}

impl WalletSnapshot {
    /// Apply a credit addressed to the wallet owner.
    pub fn credit(&mut self, kind: RewardKind, amount: Amount) {
        self.balance = self.balance.saturating_add(amount);
        match kind {
            RewardKind::Watch => {
                self.viewer_earnings = self.viewer_earnings.saturating_add(amount);
                self.rewards_granted = self.rewards_granted.saturating_add(1);
            }
            RewardKind::AdWatched => {
                self.ad_bonus_earnings = self.ad_bonus_earnings.saturating_add(amount);
            }
            RewardKind::CreatorAdBonus => {
                self.creator_earnings = self.creator_earnings.saturating_add(amount);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Party {
    Viewer,
    Creator,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerEntry {
    pub party: Party,
    pub account: String<ID_BYTES>,
    pub kind: RewardKind,
    pub amount: Amount,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerError {
    /// Entry capacity exhausted.
    Full,
    /// Account id longer than [`ID_BYTES`].
    AccountTooLong,
    /// Backend refused the write (injected for tests and simulation).
    Unavailable,
}

/// Bounded in-memory ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger<const N: usize> {
    entries: Vec<LedgerEntry, N>,
    failures_pending: u8,
}

impl<const N: usize> MemoryLedger<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            failures_pending: 0,
        }
    }

    /// Make the next `count` writes fail with [`LedgerError::Unavailable`].
    pub fn fail_next(&mut self, count: u8) {
        self.failures_pending = count;
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Wallet view for one account, folding every entry addressed to it.
    pub fn wallet_for(&self, account: &str) -> WalletSnapshot {
        let mut wallet = WalletSnapshot::default();
        for entry in self.entries.iter().filter(|entry| entry.account == account) {
            wallet.credit(entry.kind, entry.amount);
        }
        wallet
    }

    fn record(
        &mut self,
        party: Party,
        account: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if self.failures_pending > 0 {
            self.failures_pending -= 1;
            return Err(LedgerError::Unavailable);
        }

        let mut id = String::new();
        id.push_str(account)
            .map_err(|_| LedgerError::AccountTooLong)?;
        self.entries
            .push(LedgerEntry {
                party,
                account: id,
                kind,
                amount,
            })
            .map_err(|_| LedgerError::Full)
    }
}

impl<const N: usize> Ledger for MemoryLedger<N> {
    type Error = LedgerError;

    fn credit_viewer_reward(
        &mut self,
        viewer_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.record(Party::Viewer, viewer_id, kind, amount)
    }

    fn credit_creator_reward(
        &mut self,
        creator_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.record(Party::Creator, creator_id, kind, amount)
    }
}
