use std::io::Read;

use chrono::NaiveDate;
use log::info;

use crate::{
    balances::{Balance, Balances},
    classifier::is_payment,
    error::Error,
    parser::decode,
    transaction::Transaction,
};

/// Keeps the payments dated on `date`, preserving row order.
pub fn select(transactions: Vec<Transaction>, date: NaiveDate) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|transaction| transaction.is_dated(date) && is_payment(transaction))
        .collect()
}

/// Decode a statement, keep the payments made on `date` and total them per currency.
///
/// The input is consumed and dropped before returning, whether decoding succeeds or not.
pub fn aggregate<R>(input: R, date: NaiveDate) -> Result<Balances, Error>
where
    R: Read,
{
    let transactions = decode(input)?;
    let decoded = transactions.len();

    let payments = select(transactions, date);
    let balances: Balances = payments.iter().collect();
    info!(
        "{} of {} transactions retained for {}, {} currencies",
        payments.len(),
        decoded,
        date,
        balances.len()
    );

    Ok(balances)
}

/// Same as [`aggregate`], as a plain collection of balances in unspecified order.
pub fn summarize<R>(input: R, date: NaiveDate) -> Result<Vec<Balance>, Error>
where
    R: Read,
{
    aggregate(input, date).map(Balances::into_balances)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::pipeline::select;
    use crate::transaction::{Transaction, ZERO_DATE};

    fn transaction(id: &str, date: NaiveDate, narrative: &str) -> Transaction {
        Transaction {
            date,
            narratives: ["", "", narrative, "", ""].map(str::to_string),
            transaction_type: id.to_string(),
            credit: dec!(0),
            debit: dec!(1),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn select_requires_date_and_payment() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let transactions = vec![
            transaction("a", day, "PAY123456AB"),
            transaction("b", other_day, "PAY123456AB"),
            transaction("c", day, "no reference"),
            transaction("d", day, "ref PAY654321CD"),
        ];

        let ids: Vec<_> = select(transactions, day)
            .into_iter()
            .map(|t| t.transaction_type)
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn zero_date_rows_match_zero_target_date() {
        let transactions = vec![transaction("a", ZERO_DATE, "PAY123456AB")];
        assert_eq!(select(transactions.clone(), ZERO_DATE).len(), 1);
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(select(transactions, day).is_empty());
    }
}
