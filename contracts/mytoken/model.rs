use core::fmt;

use ink::prelude::string::String;

/// Token quantity. Same width as ink!'s default `Balance`.
pub type Amount = u128;

pub type Result<T> = core::result::Result<T, Error>;

/// Decimals reported by every ledger.
pub const DECIMALS: u8 = 18;

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Requested debit exceeds the available balance.
    InsufficientBalance,
    /// Requested delegated debit exceeds the remaining allowance.
    InsufficientAllowance,
    /// Caller lacks the privilege for this operation (minting).
    Unauthorized,
    /// Amount would overflow a balance, allowance or the total supply.
    InvalidAmount,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientBalance => f.write_str("insufficient balance"),
            Error::InsufficientAllowance => f.write_str("insufficient allowance"),
            Error::Unauthorized => f.write_str("caller is not the owner"),
            Error::InvalidAmount => f.write_str("amount is not representable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Metadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into(), decimals: DECIMALS }
    }
}

/// Record of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent<A> {
    Transferred { from_acc: A, to_acc: A, amount_val: Amount },
    Approved { owner_acc: A, spender_acc: A, amount_val: Amount },
    Minted { to_acc: A, amount_val: Amount },
    Burned { from_acc: A, amount_val: Amount },
}

/// Every query and mutation the ledger accepts, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<A> {
    TotalSupply,
    BalanceOf { account: A },
    Allowance { owner_acc: A, spender_acc: A },
    Transfer { caller: A, to_acc: A, amount_val: Amount },
    Approve { caller: A, spender_acc: A, amount_val: Amount },
    IncreaseAllowance { caller: A, spender_acc: A, add_val: Amount },
    DecreaseAllowance { caller: A, spender_acc: A, sub_val: Amount },
    TransferFrom { caller: A, from_acc: A, to_acc: A, amount_val: Amount },
    Mint { caller: A, amount_val: Amount },
    Burn { caller: A, amount_val: Amount },
}

/// Result of applying an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    Amount(Amount),
    Applied(LedgerEvent<A>),
}
