//! Checked ledger transitions.
//!
//! Every function here reads what it needs, computes all new values with checked
//! arithmetic, and only then writes. An `Err` therefore never leaves a partial update
//! behind in the store.

use crate::model::{Amount, Error, LedgerEvent, Operation, Outcome, Result};

/// Raw state access for a ledger. Writing zero must be indistinguishable from absence.
pub(crate) trait LedgerStore {
    type Account: Clone + PartialEq;

    fn read_owner(&self) -> Self::Account;
    fn read_supply(&self) -> Amount;
    fn read_balance(&self, acc: &Self::Account) -> Amount;
    fn read_allowance(&self, owner_acc: &Self::Account, spender_acc: &Self::Account) -> Amount;

    fn write_supply(&mut self, amount_val: Amount);
    fn write_balance(&mut self, acc: &Self::Account, amount_val: Amount);
    fn write_allowance(
        &mut self,
        owner_acc: &Self::Account,
        spender_acc: &Self::Account,
        amount_val: Amount,
    );
}

type Event<S> = LedgerEvent<<S as LedgerStore>::Account>;

fn debit(bal: Amount, amount_val: Amount) -> Result<Amount> {
    bal.checked_sub(amount_val).ok_or(Error::InsufficientBalance)
}

fn credit(bal: Amount, amount_val: Amount) -> Result<Amount> {
    bal.checked_add(amount_val).ok_or(Error::InvalidAmount)
}

// -------- balance movement --------

/// Moves `amount_val` from `from_acc` to `to_acc` after all checks pass.
fn move_balance<S: LedgerStore>(
    store: &mut S,
    from_acc: &S::Account,
    to_acc: &S::Account,
    amount_val: Amount,
) -> Result<()> {
    let new_from = debit(store.read_balance(from_acc), amount_val)?;
    if from_acc == to_acc {
        return Ok(())
    }
    let new_to = credit(store.read_balance(to_acc), amount_val)?;
    store.write_balance(from_acc, new_from);
    store.write_balance(to_acc, new_to);
    Ok(())
}

// -------- write API --------

pub(crate) fn transfer<S: LedgerStore>(
    store: &mut S,
    caller: S::Account,
    to_acc: S::Account,
    amount_val: Amount,
) -> Result<Event<S>> {
    move_balance(store, &caller, &to_acc, amount_val)?;
    Ok(LedgerEvent::Transferred { from_acc: caller, to_acc, amount_val })
}

pub(crate) fn approve<S: LedgerStore>(
    store: &mut S,
    caller: S::Account,
    spender_acc: S::Account,
    amount_val: Amount,
) -> Result<Event<S>> {
    store.write_allowance(&caller, &spender_acc, amount_val);
    Ok(LedgerEvent::Approved { owner_acc: caller, spender_acc, amount_val })
}

pub(crate) fn increase_allowance<S: LedgerStore>(
    store: &mut S,
    caller: S::Account,
    spender_acc: S::Account,
    add_val: Amount,
) -> Result<Event<S>> {
    let current_val = store.read_allowance(&caller, &spender_acc);
    let new_val = current_val.checked_add(add_val).ok_or(Error::InvalidAmount)?;
    approve(store, caller, spender_acc, new_val)
}

/// Fails instead of saturating when `sub_val` exceeds the current allowance.
pub(crate) fn decrease_allowance<S: LedgerStore>(
    store: &mut S,
    caller: S::Account,
    spender_acc: S::Account,
    sub_val: Amount,
) -> Result<Event<S>> {
    let current_val = store.read_allowance(&caller, &spender_acc);
    let new_val = current_val.checked_sub(sub_val).ok_or(Error::InsufficientAllowance)?;
    approve(store, caller, spender_acc, new_val)
}

/// Balance is checked before allowance, so a call failing both reports
/// `InsufficientBalance`. Owners get no implicit allowance over their own funds.
pub(crate) fn transfer_from<S: LedgerStore>(
    store: &mut S,
    caller: S::Account,
    from_acc: S::Account,
    to_acc: S::Account,
    amount_val: Amount,
) -> Result<Event<S>> {
    let from_bal = store.read_balance(&from_acc);
    if from_bal < amount_val {
        return Err(Error::InsufficientBalance)
    }

    let current_allow = store.read_allowance(&from_acc, &caller);
    let new_allow = current_allow.checked_sub(amount_val).ok_or(Error::InsufficientAllowance)?;

    move_balance(store, &from_acc, &to_acc, amount_val)?;
    store.write_allowance(&from_acc, &caller, new_allow);
    Ok(LedgerEvent::Transferred { from_acc, to_acc, amount_val })
}

/// Owner-only issuance, always credited to the owner.
pub(crate) fn mint<S: LedgerStore>(store: &mut S, caller: S::Account, amount_val: Amount) -> Result<Event<S>> {
    let owner_acc = store.read_owner();
    if caller != owner_acc {
        return Err(Error::Unauthorized)
    }
    let new_supply = credit(store.read_supply(), amount_val)?;
    let new_bal = credit(store.read_balance(&owner_acc), amount_val)?;
    store.write_supply(new_supply);
    store.write_balance(&owner_acc, new_bal);
    Ok(LedgerEvent::Minted { to_acc: owner_acc, amount_val })
}

pub(crate) fn burn<S: LedgerStore>(store: &mut S, caller: S::Account, amount_val: Amount) -> Result<Event<S>> {
    let new_bal = debit(store.read_balance(&caller), amount_val)?;
    // unreachable while supply equals the sum of balances
    let new_supply = store.read_supply().checked_sub(amount_val).ok_or(Error::InvalidAmount)?;
    store.write_balance(&caller, new_bal);
    store.write_supply(new_supply);
    Ok(LedgerEvent::Burned { from_acc: caller, amount_val })
}

// -------- dispatch --------

pub(crate) fn apply<S: LedgerStore>(store: &mut S, op: Operation<S::Account>) -> Result<Outcome<S::Account>> {
    let event = match op {
        Operation::TotalSupply => return Ok(Outcome::Amount(store.read_supply())),
        Operation::BalanceOf { account } => return Ok(Outcome::Amount(store.read_balance(&account))),
        Operation::Allowance { owner_acc, spender_acc } => {
            return Ok(Outcome::Amount(store.read_allowance(&owner_acc, &spender_acc)))
        }
        Operation::Transfer { caller, to_acc, amount_val } => transfer(store, caller, to_acc, amount_val)?,
        Operation::Approve { caller, spender_acc, amount_val } => {
            approve(store, caller, spender_acc, amount_val)?
        }
        Operation::IncreaseAllowance { caller, spender_acc, add_val } => {
            increase_allowance(store, caller, spender_acc, add_val)?
        }
        Operation::DecreaseAllowance { caller, spender_acc, sub_val } => {
            decrease_allowance(store, caller, spender_acc, sub_val)?
        }
        Operation::TransferFrom { caller, from_acc, to_acc, amount_val } => {
            transfer_from(store, caller, from_acc, to_acc, amount_val)?
        }
        Operation::Mint { caller, amount_val } => mint(store, caller, amount_val)?,
        Operation::Burn { caller, amount_val } => burn(store, caller, amount_val)?,
    };
    Ok(Outcome::Applied(event))
}
