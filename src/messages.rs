//! User-facing message catalog.
//!
//! The core returns receipts and typed errors; the text they render to
//! lives here and nowhere else.

use crate::engine::{Receipt, SendReceipt};
use crate::model::CARD_NUMBER_LENGTH;

// Account validation

pub const NAME_INVALID: &str = "Your name must not be empty and must start with an uppercase letter";
pub const LOGIN_MISSING: &str = "Login must be present";
pub const LOGIN_TAKEN: &str = "Such account already exists, choose another login";
pub const PASSWORD_MISSING: &str = "Password must be present";

pub fn age_out_of_range(min: i64, max: i64) -> String {
    format!("Your age must be between {min} and {max}")
}

pub fn login_too_short(min: usize) -> String {
    format!("Login must be at least {min} characters long")
}

pub fn login_too_long(max: usize) -> String {
    format!("Login must be at most {max} characters long")
}

pub fn password_too_short(min: usize) -> String {
    format!("Password must be at least {min} characters long")
}

pub fn password_too_long(max: usize) -> String {
    format!("Password must be at most {max} characters long")
}

// Card validation

pub const WRONG_CARD_TYPE: &str = "Wrong card type, choose usual, capitalist or virtual";

pub fn wrong_card_number_length() -> String {
    format!("Card number must be {CARD_NUMBER_LENGTH} digits long")
}

pub fn no_card_with_number(number: &str) -> String {
    format!("There is no card with number {number}")
}

// Operation results

pub fn put_success(receipt: &Receipt) -> String {
    format!(
        "Money {} was put on {}. Balance: {}. Tax: {}",
        receipt.amount, receipt.number, receipt.balance, receipt.tax
    )
}

pub fn withdraw_success(receipt: &Receipt) -> String {
    format!(
        "Money {} was withdrawn from {}. Balance: {}. Tax: {}",
        receipt.amount, receipt.number, receipt.balance, receipt.tax
    )
}

pub fn send_success(receipt: &SendReceipt) -> String {
    format!(
        "Money {} was sent from {} to {}. Sender balance: {}. Recipient balance: {}. Tax: {}",
        receipt.amount,
        receipt.sender_number,
        receipt.recipient_number,
        receipt.sender_balance,
        receipt.recipient_balance,
        receipt.tax
    )
}

// Console

pub const WELCOME: &str = "Welcome to teller!";
pub const ENTRY_MENU: &str = "If you want to create an account press `create`\n\
                              If you want to load an account press `load`\n\
                              If you want to exit press `exit`";
pub const WRONG_COMMAND: &str = "Wrong command. Try again";
pub const USER_NAME: &str = "Enter your name";
pub const USER_AGE: &str = "Enter your age";
pub const USER_LOGIN: &str = "Enter your login";
pub const USER_PASSWORD: &str = "Enter your password";
pub const USER_NOT_EXISTS: &str = "There is no account with given credentials";
pub const FIRST_ACCOUNT: &str = "There are no accounts yet, do you want to be the first? [y/n]";
pub const NO_CARDS: &str = "There are no active cards!";
pub const CARD_TYPE_PROMPT: &str =
    "What type of card do you want to create? (usual/capitalist/virtual)";
pub const CHOOSE_CARD_PUTTING: &str = "Choose the card for putting money:";
pub const CHOOSE_CARD_WITHDRAWING: &str = "Choose the card for withdrawing money:";
pub const CHOOSE_CARD_SENDING: &str = "Choose the card for sending money:";
pub const CHOOSE_CARD_DESTROYING: &str = "Choose the card to destroy:";
pub const WRONG_NUMBER: &str = "Wrong card number. Try again";
pub const INPUT_AMOUNT: &str = "Input the amount of money";
pub const RECIPIENT_NUMBER: &str = "Enter the recipient card number";
pub const DESTROY_ACCOUNT_CONFIRM: &str = "Are you sure you want to destroy the account? [y/n]";

pub fn main_menu(name: &str) -> String {
    format!(
        "Welcome, {name}\n\
         If you want to show cards press SC\n\
         If you want to create a card press CC\n\
         If you want to destroy a card press DC\n\
         If you want to put money press PM\n\
         If you want to withdraw money press WM\n\
         If you want to send money press SM\n\
         If you want to destroy the account press `DA`\n\
         If you want to exit press `exit`"
    )
}

pub fn card_choice(index: usize, number: &str, tag: &str) -> String {
    format!("- {number}, {tag}, press {index}")
}

pub fn card_created(number: &str) -> String {
    format!("Card {number} was created")
}

pub fn destroy_card_confirm(number: &str) -> String {
    format!("Are you sure you want to delete card {number}? [y/n]")
}
