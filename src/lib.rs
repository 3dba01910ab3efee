//! Per-currency payment totals for a single day of a bank statement export.
//!
//! A statement is decoded from CSV, rows are kept when they are dated on the target day and
//! carry a payment reference (`PAY` + 6 digits + 2 uppercase letters) in one of their
//! narratives, and the kept rows are folded into `debit - credit` totals per currency.

pub mod balances;
pub mod classifier;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod transaction;

pub use balances::{Balance, Balances};
pub use error::Error;
pub use parser::parse_target_date;
pub use pipeline::{aggregate, summarize};
pub use transaction::Transaction;
