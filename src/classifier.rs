use std::sync::LazyLock;

use regex::Regex;

use crate::transaction::Transaction;

/// "PAY", six ASCII digits, two uppercase letters, anywhere in a narrative.
pub const PAYMENT_REFERENCE_PATTERN: &str = r"PAY[0-9]{6}[A-Z]{2}";

static PAYMENT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PAYMENT_REFERENCE_PATTERN).expect("payment reference pattern is a valid regex")
});

/// A transaction is a payment when any of its narratives carries a payment reference code.
pub fn is_payment(transaction: &Transaction) -> bool {
    transaction
        .narratives
        .iter()
        .any(|narrative| PAYMENT_REFERENCE.is_match(narrative))
}
