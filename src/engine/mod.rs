//! Money-movement operations over cards.
//!
//! Each operation is a linear pipeline: validate the amount, compute the
//! tax from the card's schedule, check sufficiency, mutate the balance,
//! produce a receipt. A failing step returns before any mutation, so a
//! card is never left half-updated.

use tracing::info;

use crate::Amount;
use crate::model::Card;

mod error;
pub use error::{PutError, SendError, TransactionError, WithdrawError};

mod receipt;
pub use receipt::{Receipt, SendReceipt};

/// Deposit `amount` onto `card`. The put tax is kept out of the credited
/// amount; a tax at or above the amount itself rejects the operation.
pub fn put(card: &mut Card, amount: Amount) -> Result<Receipt, PutError> {
    let result = apply_put(card, amount);
    log_result("put", card.number(), amount, &result);
    result
}

/// Withdraw `amount` from `card`. The card must cover the amount plus the
/// withdraw tax; covering it exactly is allowed.
pub fn withdraw(card: &mut Card, amount: Amount) -> Result<Receipt, WithdrawError> {
    let result = apply_withdraw(card, amount);
    log_result("withdraw", card.number(), amount, &result);
    result
}

/// Transfer `amount` from `sender` to `recipient`. The sender pays the tax
/// on its own schedule; the recipient pays nothing. Both balances move
/// together or not at all.
pub fn send(
    sender: &mut Card,
    recipient: &mut Card,
    amount: Amount,
) -> Result<SendReceipt, SendError> {
    let result = apply_send(sender, recipient, amount);
    log_result("send", sender.number(), amount, &result);
    result
}

/// Transfer onto the sending card itself. The same checks apply; debiting
/// amount plus tax and crediting the amount back nets out to the tax.
pub fn send_self(card: &mut Card, amount: Amount) -> Result<SendReceipt, SendError> {
    let result = apply_send_self(card, amount);
    log_result("send", card.number(), amount, &result);
    result
}

fn apply_put(card: &mut Card, amount: Amount) -> Result<Receipt, PutError> {
    if !amount.is_positive() {
        return Err(PutError::NotPositive(amount));
    }

    let tax = card.kind().put_tax(amount);
    if tax >= amount {
        return Err(PutError::TaxExceedsAmount { amount, tax });
    }

    card.update_balance(card.balance() + amount - tax);

    Ok(Receipt {
        amount,
        tax,
        number: card.number().to_string(),
        balance: card.balance(),
    })
}

fn apply_withdraw(card: &mut Card, amount: Amount) -> Result<Receipt, WithdrawError> {
    if !amount.is_positive() {
        return Err(WithdrawError::NotPositive(amount));
    }

    let tax = card.kind().withdraw_tax(amount);
    let required = amount + tax;
    if card.balance() < required {
        return Err(WithdrawError::InsufficientFunds {
            balance: card.balance(),
            required,
        });
    }

    card.update_balance(card.balance() - required);

    Ok(Receipt {
        amount,
        tax,
        number: card.number().to_string(),
        balance: card.balance(),
    })
}

fn apply_send(
    sender: &mut Card,
    recipient: &mut Card,
    amount: Amount,
) -> Result<SendReceipt, SendError> {
    if !amount.is_positive() {
        return Err(SendError::NotPositive(amount));
    }

    let tax = sender.kind().sender_tax(amount);
    let required = amount + tax;
    if sender.balance() < required {
        return Err(SendError::InsufficientFunds {
            balance: sender.balance(),
            required,
        });
    }

    // Checks are done; both mutations happen together. The tax is
    // retained, not transferred.
    sender.update_balance(sender.balance() - required);
    recipient.update_balance(recipient.balance() + amount);

    Ok(SendReceipt {
        amount,
        tax,
        sender_number: sender.number().to_string(),
        sender_balance: sender.balance(),
        recipient_number: recipient.number().to_string(),
        recipient_balance: recipient.balance(),
    })
}

fn apply_send_self(card: &mut Card, amount: Amount) -> Result<SendReceipt, SendError> {
    if !amount.is_positive() {
        return Err(SendError::NotPositive(amount));
    }

    let tax = card.kind().sender_tax(amount);
    let required = amount + tax;
    if card.balance() < required {
        return Err(SendError::InsufficientFunds {
            balance: card.balance(),
            required,
        });
    }

    card.update_balance(card.balance() - tax);

    Ok(SendReceipt {
        amount,
        tax,
        sender_number: card.number().to_string(),
        sender_balance: card.balance(),
        recipient_number: card.number().to_string(),
        recipient_balance: card.balance(),
    })
}

/// Small helper to log operation results.
fn log_result<T, E: std::fmt::Display>(
    operation: &str,
    number: &str,
    amount: Amount,
    result: &Result<T, E>,
) {
    match result {
        Ok(_) => {
            info!(
                card = %number,
                amount = %amount,
                "{operation} applied"
            );
        }
        Err(e) => {
            info!(
                card = %number,
                amount = %amount,
                reason = %e,
                "{operation} skipped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardKind;

    // test utils

    fn card(kind: CardKind, balance: i64) -> Card {
        Card::new(kind, Some(Amount::from_units(balance)))
    }

    fn units(value: i64) -> Amount {
        Amount::from_units(value)
    }

    // Put

    #[test]
    fn put_credits_amount_minus_tax() {
        // virtual cards charge a fixed 2 on deposits
        let mut card = card(CardKind::Virtual, 150);
        let receipt = put(&mut card, units(50)).unwrap();

        assert_eq!(card.balance(), units(198));
        assert_eq!(receipt.tax, units(2));
        assert_eq!(receipt.balance, units(198));
        assert_eq!(receipt.number, card.number());
    }

    #[test]
    fn put_on_zero_tax_card_credits_full_amount() {
        let mut card = card(CardKind::Capitalist, 50);
        let receipt = put(&mut card, units(50)).unwrap();

        assert_eq!(card.balance(), units(100));
        assert_eq!(receipt.tax, Amount::ZERO);
    }

    #[test]
    fn put_rejects_zero_and_negative_amounts() {
        let mut card = card(CardKind::Capitalist, 50);

        for amount in [Amount::ZERO, units(-2)] {
            let result = put(&mut card, amount);
            assert!(matches!(result, Err(PutError::NotPositive(_))));
            assert_eq!(card.balance(), units(50));
        }
    }

    #[test]
    fn put_rejects_tax_above_amount() {
        // fixed fee 2 against an amount of 1
        let mut card = card(CardKind::Virtual, 150);

        let result = put(&mut card, units(1));
        assert!(matches!(result, Err(PutError::TaxExceedsAmount { .. })));
        assert_eq!(card.balance(), units(150));
    }

    #[test]
    fn put_rejects_tax_equal_to_amount() {
        let mut card = card(CardKind::Virtual, 150);

        let result = put(&mut card, units(2));
        assert!(matches!(result, Err(PutError::TaxExceedsAmount { .. })));
        assert_eq!(card.balance(), units(150));
    }

    #[test]
    fn put_succeeds_when_tax_is_below_amount() {
        let mut card = card(CardKind::Virtual, 150);
        let receipt = put(&mut card, units(5)).unwrap();

        assert_eq!(receipt.tax, units(2));
        assert_eq!(card.balance(), units(153));
    }

    // Withdraw

    #[test]
    fn withdraw_debits_amount_plus_tax() {
        // 5% withdraw tax on virtual cards
        let mut card = card(CardKind::Virtual, 150);
        let receipt = withdraw(&mut card, units(100)).unwrap();

        assert_eq!(receipt.tax, units(5));
        assert_eq!(card.balance(), units(45));
    }

    #[test]
    fn withdraw_exact_required_funds_succeeds() {
        let mut card = card(CardKind::Virtual, 105);
        let receipt = withdraw(&mut card, units(100)).unwrap();

        assert_eq!(receipt.tax, units(5));
        assert_eq!(card.balance(), Amount::ZERO);
    }

    #[test]
    fn withdraw_insufficient_funds_fails_without_mutation() {
        let mut card = card(CardKind::Virtual, 104);

        let result = withdraw(&mut card, units(100));
        assert!(matches!(
            result,
            Err(WithdrawError::InsufficientFunds { .. })
        ));
        assert_eq!(card.balance(), units(104));
    }

    #[test]
    fn withdraw_rejects_zero_and_negative_amounts() {
        let mut card = card(CardKind::Capitalist, 100);

        for amount in [Amount::ZERO, units(-1)] {
            let result = withdraw(&mut card, amount);
            assert!(matches!(result, Err(WithdrawError::NotPositive(_))));
            assert_eq!(card.balance(), units(100));
        }
    }

    // Send

    #[test]
    fn send_moves_amount_and_retains_tax() {
        // usual cards charge a fixed 20 to the sender
        let mut sender = card(CardKind::Usual, 100);
        let mut recipient = card(CardKind::Capitalist, 10);

        let receipt = send(&mut sender, &mut recipient, units(50)).unwrap();

        assert_eq!(receipt.tax, units(20));
        assert_eq!(sender.balance(), units(30));
        assert_eq!(recipient.balance(), units(60));
    }

    #[test]
    fn send_uses_only_the_sender_schedule() {
        let mut sender = card(CardKind::Capitalist, 100);
        let mut recipient = card(CardKind::Virtual, 0);

        let receipt = send(&mut sender, &mut recipient, units(40)).unwrap();

        assert_eq!(receipt.tax, Amount::ZERO);
        assert_eq!(sender.balance(), units(60));
        assert_eq!(recipient.balance(), units(40));
    }

    #[test]
    fn send_exact_required_funds_succeeds() {
        let mut sender = card(CardKind::Usual, 70);
        let mut recipient = card(CardKind::Capitalist, 0);

        send(&mut sender, &mut recipient, units(50)).unwrap();

        assert_eq!(sender.balance(), Amount::ZERO);
        assert_eq!(recipient.balance(), units(50));
    }

    #[test]
    fn send_insufficient_funds_mutates_neither_card() {
        let mut sender = card(CardKind::Usual, 69);
        let mut recipient = card(CardKind::Capitalist, 5);

        let result = send(&mut sender, &mut recipient, units(50));
        assert!(matches!(result, Err(SendError::InsufficientFunds { .. })));
        assert_eq!(sender.balance(), units(69));
        assert_eq!(recipient.balance(), units(5));
    }

    #[test]
    fn send_rejects_zero_and_negative_amounts() {
        let mut sender = card(CardKind::Capitalist, 100);
        let mut recipient = card(CardKind::Capitalist, 100);

        for amount in [Amount::ZERO, units(-5)] {
            let result = send(&mut sender, &mut recipient, amount);
            assert!(matches!(result, Err(SendError::NotPositive(_))));
            assert_eq!(sender.balance(), units(100));
            assert_eq!(recipient.balance(), units(100));
        }
    }

    #[test]
    fn send_to_self_nets_out_to_the_tax() {
        let mut card = card(CardKind::Usual, 100);

        let receipt = send_self(&mut card, units(50)).unwrap();

        assert_eq!(receipt.tax, units(20));
        assert_eq!(card.balance(), units(80));
        assert_eq!(receipt.sender_number, receipt.recipient_number);
    }

    #[test]
    fn send_to_self_still_requires_amount_plus_tax() {
        let mut card = card(CardKind::Usual, 69);

        let result = send_self(&mut card, units(50));
        assert!(matches!(result, Err(SendError::InsufficientFunds { .. })));
        assert_eq!(card.balance(), units(69));
    }
}
