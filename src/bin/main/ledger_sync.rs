use heapless::{String, Vec};
use log::{info, warn};
use swipefeed_core::ledger::{
    Amount, Ledger, LedgerEntry, LedgerError, MemoryLedger, Party, RewardKind,
};

use super::{LEDGER_RETRY_BACKOFF_MAX_MS, LEDGER_RETRY_BACKOFF_MIN_MS};

const PENDING_CREDITS: usize = 32;

/// Ledger front that queues credits the backend refused and replays them
/// with exponential back-off.
pub(super) struct RetryingLedger<const N: usize> {
    backend: MemoryLedger<N>,
    pending: Vec<LedgerEntry, PENDING_CREDITS>,
    backoff_ms: u64,
    next_attempt_ms: u64,
    dropped: u32,
}

impl<const N: usize> RetryingLedger<N> {
    pub(super) fn new(backend: MemoryLedger<N>) -> Self {
        Self {
            backend,
            pending: Vec::new(),
            backoff_ms: LEDGER_RETRY_BACKOFF_MIN_MS,
            next_attempt_ms: 0,
            dropped: 0,
        }
    }

    pub(super) fn backend(&self) -> &MemoryLedger<N> {
        &self.backend
    }

    pub(super) fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Credits the backend refused for good (full, malformed account).
    pub(super) fn dropped(&self) -> u32 {
        self.dropped
    }

    pub(super) fn flush_due(&mut self, now_ms: u64) {
        if self.pending.is_empty() || now_ms < self.next_attempt_ms {
            return;
        }

        let mut delivered = 0;
        let mut retained: Vec<LedgerEntry, PENDING_CREDITS> = Vec::new();
        let mut unavailable = false;
        for entry in self.pending.iter() {
            if unavailable {
                let _ = retained.push(entry.clone());
                continue;
            }

            match Self::deliver(&mut self.backend, entry) {
                Ok(()) => delivered += 1,
                Err(LedgerError::Unavailable) => {
                    unavailable = true;
                    let _ = retained.push(entry.clone());
                }
                Err(err) => {
                    self.dropped = self.dropped.saturating_add(1);
                    warn!(
                        "ledger-sync: dropping {:?} credit for {}: {:?}",
                        entry.kind, entry.account, err
                    );
                }
            }
        }
        self.pending = retained;

        if delivered > 0 {
            info!(
                "ledger-sync: replayed {} credit(s), {} still pending",
                delivered,
                self.pending.len()
            );
        }

        if !unavailable {
            self.backoff_ms = LEDGER_RETRY_BACKOFF_MIN_MS;
            self.next_attempt_ms = 0;
        } else {
            // Keep the queue and retry later if the backend is still unavailable.
            self.next_attempt_ms = now_ms.saturating_add(self.backoff_ms);
            self.backoff_ms = self
                .backoff_ms
                .saturating_mul(2)
                .min(LEDGER_RETRY_BACKOFF_MAX_MS);
            warn!(
                "ledger-sync: backend unavailable, retry in {} ms",
                self.next_attempt_ms - now_ms
            );
        }
    }

    fn deliver(backend: &mut MemoryLedger<N>, entry: &LedgerEntry) -> Result<(), LedgerError> {
        match entry.party {
            Party::Viewer => backend.credit_viewer_reward(&entry.account, entry.kind, entry.amount),
            Party::Creator => {
                backend.credit_creator_reward(&entry.account, entry.kind, entry.amount)
            }
        }
    }

    fn submit(
        &mut self,
        party: Party,
        account: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut id = String::new();
        id.push_str(account)
            .map_err(|_| LedgerError::AccountTooLong)?;
        let entry = LedgerEntry {
            party,
            account: id,
            kind,
            amount,
        };

        // Preserve ordering behind anything already queued.
        if self.pending.is_empty() {
            match Self::deliver(&mut self.backend, &entry) {
                Ok(()) => return Ok(()),
                Err(LedgerError::Unavailable) => {}
                Err(err) => return Err(err),
            }
        }

        self.pending.push(entry).map_err(|_| LedgerError::Full)
    }
}

impl<const N: usize> Ledger for RetryingLedger<N> {
    type Error = LedgerError;

    fn credit_viewer_reward(
        &mut self,
        viewer_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.submit(Party::Viewer, viewer_id, kind, amount)
    }

    fn credit_creator_reward(
        &mut self,
        creator_id: &str,
        kind: RewardKind,
        amount: Amount,
    ) -> Result<(), Self::Error> {
        self.submit(Party::Creator, creator_id, kind, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_backend_keeps_credits_queued_with_backoff() {
        let mut backend = MemoryLedger::<4>::new();
        backend.fail_next(3);
        let mut ledger = RetryingLedger::new(backend);

        assert_eq!(
            ledger.credit_viewer_reward("me", RewardKind::Watch, Amount(2_500)),
            Ok(())
        );
        assert_eq!(ledger.pending(), 1);

        ledger.flush_due(0);
        assert_eq!(ledger.pending(), 1);
        ledger.flush_due(400);
        assert_eq!(ledger.pending(), 1);
        ledger.flush_due(500);
        assert_eq!(ledger.pending(), 1);
        ledger.flush_due(1_499);
        assert_eq!(ledger.pending(), 1);
        ledger.flush_due(1_500);
        assert_eq!(ledger.pending(), 0);
        assert_eq!(ledger.backend().entries().len(), 1);
        assert_eq!(ledger.dropped(), 0);
    }

    #[test]
    fn permanent_failure_does_not_block_later_credits() {
        let mut backend = MemoryLedger::<2>::new();
        backend.fail_next(1);
        let mut ledger = RetryingLedger::new(backend);

        for account in ["a", "b", "c"] {
            assert_eq!(
                ledger.credit_creator_reward(account, RewardKind::CreatorAdBonus, Amount(1)),
                Ok(())
            );
        }
        assert_eq!(ledger.pending(), 3);

        ledger.flush_due(0);
        assert_eq!(ledger.pending(), 0);
        assert_eq!(ledger.dropped(), 1);
        assert_eq!(ledger.backend().entries().len(), 2);

        // A full backend is reported to the caller instead of queued.
        assert_eq!(
            ledger.credit_viewer_reward("me", RewardKind::Watch, Amount(1)),
            Err(LedgerError::Full)
        );
        assert_eq!(ledger.pending(), 0);
    }
}
