use ink::prelude::collections::BTreeMap;

use crate::logic::{self, LedgerStore};
use crate::model::{Amount, LedgerEvent, Metadata, Operation, Outcome, Result};

/// In-memory fungible ledger owned by its host.
///
/// Zero balances and allowances are never stored, so two ledgers that went through
/// different histories but hold the same amounts compare equal.
///
/// State only changes through the checked operations; the raw storage writes stay
/// inside the crate:
///
/// ```compile_fail
/// use mytoken::{Ledger, Metadata};
/// use mytoken::logic::LedgerStore;
///
/// let mut ledger = Ledger::new(Metadata::new("MyToken", "MTK"), 1000, 0u8);
/// ledger.write_supply(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger<A: Ord + Clone> {
    metadata: Metadata,
    owner_acc: A,
    total_supply: Amount,
    balances: BTreeMap<A, Amount>,
    allowances: BTreeMap<(A, A), Amount>,
}

impl<A: Ord + Clone> LedgerStore for Ledger<A> {
    type Account = A;

    fn read_owner(&self) -> A {
        self.owner_acc.clone()
    }

    fn read_supply(&self) -> Amount {
        self.total_supply
    }

    fn read_balance(&self, acc: &A) -> Amount {
        self.balances.get(acc).copied().unwrap_or(0)
    }

    fn read_allowance(&self, owner_acc: &A, spender_acc: &A) -> Amount {
        self.allowances
            .get(&(owner_acc.clone(), spender_acc.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn write_supply(&mut self, amount_val: Amount) {
        self.total_supply = amount_val;
    }

    fn write_balance(&mut self, acc: &A, amount_val: Amount) {
        if amount_val == 0 {
            self.balances.remove(acc);
        } else {
            self.balances.insert(acc.clone(), amount_val);
        }
    }

    fn write_allowance(&mut self, owner_acc: &A, spender_acc: &A, amount_val: Amount) {
        let key = (owner_acc.clone(), spender_acc.clone());
        if amount_val == 0 {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount_val);
        }
    }
}

impl<A: Ord + Clone> Ledger<A> {
    /// Creates a ledger whose whole `initial_supply` belongs to `creator`, who also
    /// becomes the owner.
    pub fn new(metadata: Metadata, initial_supply: Amount, creator: A) -> Self {
        let mut ledger = Self {
            metadata,
            owner_acc: creator.clone(),
            total_supply: initial_supply,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        };
        ledger.write_balance(&creator, initial_supply);
        ledger
    }

    // -------- read API --------

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn owner(&self) -> &A {
        &self.owner_acc
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &A) -> Amount {
        self.read_balance(account)
    }

    pub fn allowance(&self, owner_acc: &A, spender_acc: &A) -> Amount {
        self.read_allowance(owner_acc, spender_acc)
    }

    /// Accounts with a non-zero balance, in identifier order.
    pub fn holders(&self) -> impl Iterator<Item = (&A, Amount)> + '_ {
        self.balances.iter().map(|(acc, bal)| (acc, *bal))
    }

    /// True when the total supply equals the sum of all balances.
    pub fn is_conserved(&self) -> bool {
        self.balances
            .values()
            .try_fold(0 as Amount, |sum, bal| sum.checked_add(*bal))
            .is_some_and(|sum| sum == self.total_supply)
    }

    // -------- write API --------

    pub fn transfer(&mut self, caller: A, to_acc: A, amount_val: Amount) -> Result<LedgerEvent<A>> {
        logic::transfer(self, caller, to_acc, amount_val)
    }

    pub fn approve(&mut self, caller: A, spender_acc: A, amount_val: Amount) -> Result<LedgerEvent<A>> {
        logic::approve(self, caller, spender_acc, amount_val)
    }

    pub fn increase_allowance(&mut self, caller: A, spender_acc: A, add_val: Amount) -> Result<LedgerEvent<A>> {
        logic::increase_allowance(self, caller, spender_acc, add_val)
    }

    pub fn decrease_allowance(&mut self, caller: A, spender_acc: A, sub_val: Amount) -> Result<LedgerEvent<A>> {
        logic::decrease_allowance(self, caller, spender_acc, sub_val)
    }

    pub fn transfer_from(
        &mut self,
        caller: A,
        from_acc: A,
        to_acc: A,
        amount_val: Amount,
    ) -> Result<LedgerEvent<A>> {
        logic::transfer_from(self, caller, from_acc, to_acc, amount_val)
    }

    pub fn mint(&mut self, caller: A, amount_val: Amount) -> Result<LedgerEvent<A>> {
        logic::mint(self, caller, amount_val)
    }

    pub fn burn(&mut self, caller: A, amount_val: Amount) -> Result<LedgerEvent<A>> {
        logic::burn(self, caller, amount_val)
    }

    pub fn apply(&mut self, op: Operation<A>) -> Result<Outcome<A>> {
        logic::apply(self, op)
    }
}
