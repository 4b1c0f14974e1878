#![cfg_attr(not(feature = "std"), no_std)]

pub mod ledger;
mod logic;
pub mod model;
#[cfg(feature = "std")]
pub mod shared;

pub use ledger::Ledger;
pub use model::{Amount, Error, LedgerEvent, Metadata, Operation, Outcome, Result, DECIMALS};
#[cfg(feature = "std")]
pub use shared::SharedLedger;

#[ink::contract]
mod mytoken {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    use crate::logic::{self, LedgerStore};
    use crate::model::{LedgerEvent, Result, DECIMALS};

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Burned {
        #[ink(topic)]
        from_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(storage)]
    pub struct MyToken {
        // metadata
        name: String,
        symbol: String,
        owner_acc: AccountId,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    impl LedgerStore for MyToken {
        type Account = AccountId;

        fn read_owner(&self) -> AccountId {
            self.owner_acc
        }

        fn read_supply(&self) -> Balance {
            self.total_supply
        }

        fn read_balance(&self, acc: &AccountId) -> Balance {
            self.balances.get(acc).unwrap_or(0)
        }

        fn read_allowance(&self, owner_acc: &AccountId, spender_acc: &AccountId) -> Balance {
            self.allowances.get((*owner_acc, *spender_acc)).unwrap_or(0)
        }

        fn write_supply(&mut self, amount_val: Balance) {
            self.total_supply = amount_val;
        }

        fn write_balance(&mut self, acc: &AccountId, amount_val: Balance) {
            if amount_val == 0 {
                self.balances.remove(acc);
            } else {
                self.balances.insert(acc, &amount_val);
            }
        }

        fn write_allowance(&mut self, owner_acc: &AccountId, spender_acc: &AccountId, amount_val: Balance) {
            let key = (*owner_acc, *spender_acc);
            if amount_val == 0 {
                self.allowances.remove(key);
            } else {
                self.allowances.insert(key, &amount_val);
            }
        }
    }

    impl MyToken {
        /// Credits the whole `initial_supply` to the deployer, who becomes the owner.
        #[ink(constructor)]
        pub fn new(name: String, symbol: String, initial_supply: Balance) -> Self {
            let owner_acc = Self::env().caller();
            let mut token = Self {
                name,
                symbol,
                owner_acc,
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
            };
            token.write_supply(initial_supply);
            token.write_balance(&owner_acc, initial_supply);
            if initial_supply != 0 {
                Self::env().emit_event(Minted { to_acc: owner_acc, amount_val: initial_supply });
            }
            token
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            DECIMALS
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner_acc
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.read_balance(&owner_acc)
        }

        #[ink(message)]
        pub fn my_balance(&self) -> Balance {
            let caller_acc = self.env().caller();
            self.read_balance(&caller_acc)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.read_allowance(&owner_acc, &spender_acc)
        }

        // -------- write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::transfer(self, caller_acc, to_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        /// Overwrites the caller's allowance for `spender_acc`. Zero revokes it.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::approve(self, caller_acc, spender_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, add_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::increase_allowance(self, caller_acc, spender_acc, add_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, sub_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::decrease_allowance(self, caller_acc, spender_acc, sub_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::transfer_from(self, caller_acc, from_acc, to_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        /// Owner-only; new tokens always go to the owner.
        #[ink(message)]
        pub fn mint(&mut self, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::mint(self, caller_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Balance) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::burn(self, caller_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        // ---- internals ----

        fn emit(&self, event: LedgerEvent<AccountId>) {
            match event {
                LedgerEvent::Transferred { from_acc, to_acc, amount_val } => {
                    self.env().emit_event(Transferred { from_acc, to_acc, amount_val })
                }
                LedgerEvent::Approved { owner_acc, spender_acc, amount_val } => {
                    self.env().emit_event(Approved { owner_acc, spender_acc, amount_val })
                }
                LedgerEvent::Minted { to_acc, amount_val } => {
                    self.env().emit_event(Minted { to_acc, amount_val })
                }
                LedgerEvent::Burned { from_acc, amount_val } => {
                    self.env().emit_event(Burned { from_acc, amount_val })
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::model::Error;
        use ink::env::test;

        type Env = ink::env::DefaultEnvironment;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn deploy() -> MyToken {
            test::set_caller::<Env>(accounts().alice);
            MyToken::new("MyToken".into(), "MTK".into(), 1000)
        }

        fn call_as(acc: AccountId) {
            test::set_caller::<Env>(acc);
        }

        fn event_count() -> usize {
            test::recorded_events().count()
        }

        #[ink::test]
        fn deploys_with_correct_initial_supply() {
            let token = deploy();
            assert_eq!(token.total_supply(), 1000);
            assert_eq!(token.balance_of(accounts().alice), 1000);
            assert_eq!(token.owner(), accounts().alice);
            assert_eq!(token.name(), "MyToken");
            assert_eq!(token.symbol(), "MTK");
            assert_eq!(token.decimals(), 18);
            assert_eq!(event_count(), 1);
        }

        #[ink::test]
        fn transfers_tokens_between_accounts() {
            let mut token = deploy();
            assert_eq!(token.transfer(accounts().bob, 100), Ok(()));
            assert_eq!(token.balance_of(accounts().alice), 900);
            assert_eq!(token.balance_of(accounts().bob), 100);
            assert_eq!(token.total_supply(), 1000);

            call_as(accounts().bob);
            assert_eq!(token.my_balance(), 100);
            assert_eq!(event_count(), 2);
        }

        #[ink::test]
        fn approved_spender_transfers_tokens() {
            let mut token = deploy();
            let accounts = accounts();
            assert_eq!(token.approve(accounts.bob, 200), Ok(()));
            assert_eq!(token.allowance(accounts.alice, accounts.bob), 200);

            call_as(accounts.bob);
            assert_eq!(token.transfer_from(accounts.alice, accounts.charlie, 200), Ok(()));
            assert_eq!(token.balance_of(accounts.alice), 800);
            assert_eq!(token.balance_of(accounts.charlie), 200);
            assert_eq!(token.allowance(accounts.alice, accounts.bob), 0);

            assert_eq!(
                token.transfer_from(accounts.alice, accounts.charlie, 1),
                Err(Error::InsufficientAllowance)
            );
        }

        #[ink::test]
        fn adjusts_allowance_incrementally() {
            let mut token = deploy();
            let accounts = accounts();
            assert_eq!(token.increase_allowance(accounts.bob, 30), Ok(()));
            assert_eq!(token.increase_allowance(accounts.bob, 20), Ok(()));
            assert_eq!(token.decrease_allowance(accounts.bob, 60), Err(Error::InsufficientAllowance));
            assert_eq!(token.decrease_allowance(accounts.bob, 10), Ok(()));
            assert_eq!(token.allowance(accounts.alice, accounts.bob), 40);
        }

        #[ink::test]
        fn only_owner_mints() {
            let mut token = deploy();
            assert_eq!(token.mint(500), Ok(()));
            assert_eq!(token.total_supply(), 1500);
            assert_eq!(token.balance_of(accounts().alice), 1500);

            call_as(accounts().bob);
            assert_eq!(token.mint(500), Err(Error::Unauthorized));
            assert_eq!(token.total_supply(), 1500);
            assert_eq!(token.balance_of(accounts().bob), 0);
            assert_eq!(event_count(), 2);
        }

        #[ink::test]
        fn holders_burn_their_own_tokens() {
            let mut token = deploy();
            assert_eq!(token.burn(200), Ok(()));
            assert_eq!(token.total_supply(), 800);
            assert_eq!(token.balance_of(accounts().alice), 800);
        }

        #[ink::test]
        fn cannot_burn_more_than_balance() {
            let mut token = deploy();
            call_as(accounts().bob);
            assert_eq!(token.burn(50), Err(Error::InsufficientBalance));
            assert_eq!(token.total_supply(), 1000);
            assert_eq!(event_count(), 1);
        }

        #[ink::test]
        fn failed_transfer_leaves_state_untouched() {
            let mut token = deploy();
            call_as(accounts().bob);
            assert_eq!(token.transfer(accounts().alice, 1), Err(Error::InsufficientBalance));
            assert_eq!(token.balance_of(accounts().alice), 1000);
            assert_eq!(token.balance_of(accounts().bob), 0);
        }
    }

}
