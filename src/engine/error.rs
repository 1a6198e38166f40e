//! Error types for money-movement operations.

use thiserror::Error;

use crate::Amount;

/// Top-level error unifying the three operation kinds.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("{0}")]
    Put(#[from] PutError),

    #[error("{0}")]
    Withdraw(#[from] WithdrawError),

    #[error("{0}")]
    Send(#[from] SendError),
}

/// Error during a deposit.
#[derive(Debug, Error)]
pub enum PutError {
    #[error("amount must be positive, got {0}")]
    NotPositive(Amount),

    #[error("tax {tax} is higher than the amount {amount}")]
    TaxExceedsAmount { amount: Amount, tax: Amount },
}

/// Error during a withdrawal.
#[derive(Debug, Error)]
pub enum WithdrawError {
    #[error("amount must be positive, got {0}")]
    NotPositive(Amount),

    #[error("not enough money on card: balance {balance}, required {required}")]
    InsufficientFunds { balance: Amount, required: Amount },
}

/// Error during a transfer, charged to the sender.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("amount must be positive, got {0}")]
    NotPositive(Amount),

    #[error("not enough money on sender card: balance {balance}, required {required}")]
    InsufficientFunds { balance: Amount, required: Amount },
}
