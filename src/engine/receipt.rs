use crate::Amount;

/// Outcome of a put or withdraw: the moved amount, the tax charged, and a
/// snapshot of the affected card after mutation. Receipts are values for
/// rendering a result message; they are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub amount: Amount,
    pub tax: Amount,
    pub number: String,
    pub balance: Amount,
}

/// Outcome of a transfer: the sender pays the tax, the recipient receives
/// the bare amount.
#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    pub amount: Amount,
    pub tax: Amount,
    pub sender_number: String,
    pub sender_balance: Amount,
    pub recipient_number: String,
    pub recipient_balance: Amount,
}
