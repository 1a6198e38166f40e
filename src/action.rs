//! Account and card actions: the boundary the console layer calls.
//!
//! The facade owns the in-memory account collection and the snapshot
//! store. It turns raw inputs into validated entities, invokes the
//! transaction engine, and re-saves the whole collection after every
//! mutating operation.

use thiserror::Error;

use crate::Amount;
use crate::engine::{self, Receipt, SendReceipt, TransactionError};
use crate::model::{Account, Card};
use crate::store::{Store, StoreError};
use crate::validate::{AccountForm, CardNumberLookup, CardTypeInput, Validate, ValidationErrors};

/// Failure of a facade operation. Nothing here is fatal: validation and
/// domain-rule failures allow a retry with corrected input, and not-found
/// failures leave every balance untouched.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Transaction(#[from] TransactionError),

    #[error("account {0} does not exist")]
    UnknownAccount(String),

    #[error("card {0} does not exist")]
    UnknownCard(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        ActionError::Validation(errors)
    }
}

/// The account/card action facade.
pub struct AccountAction {
    store: Store,
    accounts: Vec<Account>,
}

impl AccountAction {
    /// Load the persisted collection and wrap it with the store.
    pub fn load(store: Store) -> Result<Self, StoreError> {
        let accounts = store.find_all()?;
        Ok(Self { store, accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn no_accounts(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn account_exists(&self, login: &str) -> bool {
        self.accounts.iter().any(|a| a.login() == login)
    }

    pub fn find_account(&self, login: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.login() == login)
    }

    /// Plaintext equality on both fields.
    pub fn find_by_login_password(&self, login: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.credentials_match(login, password))
    }

    /// Validate the account form and append the new account. All five
    /// check groups run; every failure is reported at once.
    pub fn create_account(
        &mut self,
        name: String,
        age: i64,
        login: String,
        password: String,
    ) -> Result<Account, ActionError> {
        let taken = self.accounts.iter().map(|a| a.login().to_string()).collect();
        let form = AccountForm::new(name, age, login, password, taken);
        form.check()?;

        let account = form.into_account();
        self.accounts.push(account.clone());
        self.persist()?;
        Ok(account)
    }

    /// Validate the card type and append a card with its default balance.
    pub fn create_card(&mut self, login: &str, kind_tag: &str) -> Result<Card, ActionError> {
        let kind = CardTypeInput::new(kind_tag).resolve()?;
        let index = self.account_index(login)?;

        let card = self.accounts[index].create_card(kind, None).clone();
        self.persist()?;
        Ok(card)
    }

    /// Remove the card with `number` from `login`'s account. Reports
    /// whether a card was removed.
    pub fn destroy_card(&mut self, login: &str, number: &str) -> Result<bool, ActionError> {
        let index = self.account_index(login)?;

        let removed = self.accounts[index].destroy_card(number);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Remove the whole account. Reports whether an account was removed.
    pub fn destroy_account(&mut self, login: &str) -> Result<bool, ActionError> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.login() != login);

        let removed = self.accounts.len() < before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn put_money(
        &mut self,
        login: &str,
        number: &str,
        amount: Amount,
    ) -> Result<Receipt, ActionError> {
        let index = self.account_index(login)?;
        let card = self.accounts[index]
            .find_card_mut(number)
            .ok_or_else(|| ActionError::UnknownCard(number.to_string()))?;

        let receipt = engine::put(card, amount).map_err(TransactionError::from)?;
        self.persist()?;
        Ok(receipt)
    }

    pub fn withdraw_money(
        &mut self,
        login: &str,
        number: &str,
        amount: Amount,
    ) -> Result<Receipt, ActionError> {
        let index = self.account_index(login)?;
        let card = self.accounts[index]
            .find_card_mut(number)
            .ok_or_else(|| ActionError::UnknownCard(number.to_string()))?;

        let receipt = engine::withdraw(card, amount).map_err(TransactionError::from)?;
        self.persist()?;
        Ok(receipt)
    }

    /// Transfer between the sender's card and any card in the collection.
    /// The recipient resolves through card-number validation before any
    /// tax computation.
    pub fn send_money(
        &mut self,
        login: &str,
        sender_number: &str,
        recipient_number: &str,
        amount: Amount,
    ) -> Result<SendReceipt, ActionError> {
        {
            let known: Vec<&str> = self
                .accounts
                .iter()
                .flat_map(|a| a.cards())
                .map(|c| c.number())
                .collect();
            CardNumberLookup::new(recipient_number, &known).check()?;
        }

        let sender_account = self.account_index(login)?;
        let sender_card = self.accounts[sender_account]
            .cards()
            .iter()
            .position(|c| c.number() == sender_number)
            .ok_or_else(|| ActionError::UnknownCard(sender_number.to_string()))?;
        let (recipient_account, recipient_card) = self
            .card_position(recipient_number)
            .ok_or_else(|| ActionError::UnknownCard(recipient_number.to_string()))?;

        let receipt = if sender_account == recipient_account && sender_card == recipient_card {
            let card = self.accounts[sender_account]
                .find_card_mut(sender_number)
                .ok_or_else(|| ActionError::UnknownCard(sender_number.to_string()))?;
            engine::send_self(card, amount).map_err(TransactionError::from)?
        } else if sender_account == recipient_account {
            let cards = self.accounts[sender_account].cards_mut();
            let (sender, recipient) = pair_mut(cards, sender_card, recipient_card);
            engine::send(sender, recipient, amount).map_err(TransactionError::from)?
        } else {
            let (sender, recipient) =
                pair_mut(&mut self.accounts, sender_account, recipient_account);
            let sender = sender
                .find_card_mut(sender_number)
                .ok_or_else(|| ActionError::UnknownCard(sender_number.to_string()))?;
            let recipient = recipient
                .find_card_mut(recipient_number)
                .ok_or_else(|| ActionError::UnknownCard(recipient_number.to_string()))?;
            engine::send(sender, recipient, amount).map_err(TransactionError::from)?
        };

        self.persist()?;
        Ok(receipt)
    }

    /// Search every account's cards for an exact number match.
    pub fn find_card_by_number(&self, number: &str) -> Option<&Card> {
        self.accounts
            .iter()
            .flat_map(|a| a.cards())
            .find(|c| c.number() == number)
    }

    pub fn card_with_number_exists(&self, number: &str) -> bool {
        self.find_card_by_number(number).is_some()
    }

    fn account_index(&self, login: &str) -> Result<usize, ActionError> {
        self.accounts
            .iter()
            .position(|a| a.login() == login)
            .ok_or_else(|| ActionError::UnknownAccount(login.to_string()))
    }

    fn card_position(&self, number: &str) -> Option<(usize, usize)> {
        self.accounts.iter().enumerate().find_map(|(ai, account)| {
            account
                .cards()
                .iter()
                .position(|c| c.number() == number)
                .map(|ci| (ai, ci))
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.accounts)
    }
}

/// Disjoint mutable references to two distinct elements of a slice.
fn pair_mut<T>(slice: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    if first < second {
        let (left, right) = slice.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}
