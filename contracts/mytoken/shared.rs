use core::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ledger::Ledger;
use crate::model::{Amount, Operation, Outcome, Result};

/// Cloneable handle to a [`Ledger`] for multi-threaded hosts.
///
/// Every call holds the lock for the whole transition, so operations are linearizable
/// and readers never observe a half-applied mutation.
#[derive(Debug, Clone)]
pub struct SharedLedger<A: Ord + Clone> {
    inner: Arc<Mutex<Ledger<A>>>,
}

impl<A: Ord + Clone + Debug> SharedLedger<A> {
    pub fn new(ledger: Ledger<A>) -> Self {
        Self { inner: Arc::new(Mutex::new(ledger)) }
    }

    pub fn apply(&self, op: Operation<A>) -> Result<Outcome<A>> {
        let mut ledger = self.inner.lock();
        tracing::trace!(?op, "applying ledger operation");
        match ledger.apply(op) {
            Ok(outcome) => {
                if let Outcome::Applied(event) = &outcome {
                    tracing::debug!(?event, total_supply = ledger.total_supply(), "ledger updated");
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::debug!(%err, "ledger operation rejected");
                Err(err)
            }
        }
    }

    pub fn total_supply(&self) -> Amount {
        self.inner.lock().total_supply()
    }

    pub fn balance_of(&self, account: &A) -> Amount {
        self.inner.lock().balance_of(account)
    }

    pub fn allowance(&self, owner_acc: &A, spender_acc: &A) -> Amount {
        self.inner.lock().allowance(owner_acc, spender_acc)
    }

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> Ledger<A> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Error, Metadata};
    use std::thread;

    #[test]
    fn concurrent_transfers_conserve_supply() {
        let shared = SharedLedger::new(Ledger::new(Metadata::new("MyToken", "MTK"), 1000, 0u8));
        let handles: Vec<_> = (1u8..=4)
            .map(|to_acc| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared
                            .apply(Operation::Transfer { caller: 0, to_acc, amount_val: 5 })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ledger = shared.snapshot();
        assert!(ledger.is_conserved());
        assert_eq!(ledger.balance_of(&0), 0);
        for acc in 1u8..=4 {
            assert_eq!(shared.balance_of(&acc), 250);
        }
    }

    #[test]
    fn rejected_operation_is_reported() {
        let shared = SharedLedger::new(Ledger::new(Metadata::new("MyToken", "MTK"), 0, 0u8));
        assert_eq!(
            shared.apply(Operation::Burn { caller: 1, amount_val: 50 }),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(shared.total_supply(), 0);
        assert_eq!(shared.allowance(&0, &1), 0);
    }
}
