//! Core domain types: card kinds with their tax schedules, cards, accounts.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Length of a generated card number, in ASCII digits.
pub const CARD_NUMBER_LENGTH: usize = 16;

/// A card variant with its fixed tax schedule.
///
/// Taxes are pure functions of the schedule and the requested amount; they
/// never read the current balance. Parameters a variant does not override
/// are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Usual,
    Capitalist,
    Virtual,
}

impl CardKind {
    /// The fixed registry of known variants.
    pub const ALL: [CardKind; 3] = [CardKind::Usual, CardKind::Capitalist, CardKind::Virtual];

    /// Resolve a variant tag, case-insensitively. `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<CardKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }

    pub fn tag(self) -> &'static str {
        match self {
            CardKind::Usual => "usual",
            CardKind::Capitalist => "capitalist",
            CardKind::Virtual => "virtual",
        }
    }

    /// Starting balance for a card of this kind when the caller picks none.
    pub fn default_balance(self) -> Amount {
        match self {
            CardKind::Usual => Amount::from_units(50),
            CardKind::Capitalist => Amount::from_units(100),
            CardKind::Virtual => Amount::from_units(150),
        }
    }

    fn withdraw_tax_percent(self) -> u32 {
        match self {
            CardKind::Usual => 5,
            CardKind::Capitalist => 0,
            CardKind::Virtual => 5,
        }
    }

    fn put_tax_percent(self) -> u32 {
        match self {
            CardKind::Usual => 2,
            CardKind::Capitalist | CardKind::Virtual => 0,
        }
    }

    fn put_tax_fixed(self) -> Amount {
        match self {
            CardKind::Virtual => Amount::from_units(2),
            CardKind::Usual | CardKind::Capitalist => Amount::ZERO,
        }
    }

    fn sender_tax_percent(self) -> u32 {
        match self {
            CardKind::Usual | CardKind::Capitalist | CardKind::Virtual => 0,
        }
    }

    fn sender_tax_fixed(self) -> Amount {
        match self {
            CardKind::Usual | CardKind::Virtual => Amount::from_units(20),
            CardKind::Capitalist => Amount::ZERO,
        }
    }

    /// Tax charged on a withdrawal of `amount`.
    pub fn withdraw_tax(self, amount: Amount) -> Amount {
        amount.percent(self.withdraw_tax_percent())
    }

    /// Tax charged on a deposit of `amount`.
    pub fn put_tax(self, amount: Amount) -> Amount {
        amount.percent(self.put_tax_percent()) + self.put_tax_fixed()
    }

    /// Tax charged to the sender on a transfer of `amount`.
    pub fn sender_tax(self, amount: Amount) -> Amount {
        amount.percent(self.sender_tax_percent()) + self.sender_tax_fixed()
    }
}

/// A payment card: a variant, a generated immutable number, and a balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    kind: CardKind,
    number: String,
    balance: Amount,
}

impl Card {
    /// Create a card with a freshly generated number. Without an explicit
    /// starting balance, the kind's default applies.
    pub fn new(kind: CardKind, balance: Option<Amount>) -> Self {
        Self {
            kind,
            number: generate_number(),
            balance: balance.unwrap_or_else(|| kind.default_balance()),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Balance is only ever reassigned by the transaction engine.
    pub(crate) fn update_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}

/// Generate a card number: 16 random ASCII digits. Uniqueness is
/// best-effort; the space is large enough that collisions are not checked.
fn generate_number() -> String {
    (0..CARD_NUMBER_LENGTH)
        .map(|_| char::from(b'0' + rand::random_range(0..10u8)))
        .collect()
}

/// A user account owning an ordered collection of cards.
///
/// Equality is by login: the login is unique across the persisted
/// collection, so it is the repository identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    name: String,
    age: i64,
    login: String,
    password: String,
    cards: Vec<Card>,
}

impl Account {
    pub fn new(name: String, age: i64, login: String, password: String) -> Self {
        Self {
            name,
            age,
            login,
            password,
            cards: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Plaintext equality on both fields.
    pub fn credentials_match(&self, login: &str, password: &str) -> bool {
        self.login == login && self.password == password
    }

    /// Cards in creation order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Append a new card of `kind` and return it.
    pub fn create_card(&mut self, kind: CardKind, balance: Option<Amount>) -> &Card {
        self.cards.push(Card::new(kind, balance));
        self.cards.last().expect("card was just pushed")
    }

    /// Remove the card with `number`. Returns whether a card was removed.
    pub fn destroy_card(&mut self, number: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.number() != number);
        self.cards.len() < before
    }

    pub fn find_card(&self, number: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.number() == number)
    }

    pub(crate) fn find_card_mut(&mut self, number: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.number() == number)
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.login == other.login
    }
}
