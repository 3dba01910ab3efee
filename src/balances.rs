use itertools::Itertools;
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::transaction::Transaction;

/// Net (debit - credit) total of the retained transactions in one currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Balance {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Balance {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            total: Decimal::ZERO,
        }
    }
}

/// Per-request aggregation of transactions into currency balances.
#[derive(Debug, Default)]
pub struct Balances {
    // Keyed by currency code; iteration order is irrelevant
    balances: HashMap<String, Balance>,
}

impl Balances {
    /// Fold one transaction into the balance of its currency.
    /// Totals that leave the range of `Decimal` stick at `Decimal::MAX` / `Decimal::MIN`.
    pub fn apply(&mut self, transaction: &Transaction) {
        let balance = self
            .balances
            .entry(transaction.currency.clone())
            .or_insert_with(|| Balance::new(&transaction.currency));
        let net = transaction.net();
        balance.total = balance.total.checked_add(net).unwrap_or_else(|| {
            warn!("{} total out of range, clamping", balance.currency);
            balance.total.saturating_add(net)
        });
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn get(&self, currency: &str) -> Option<&Balance> {
        self.balances.get(currency)
    }

    /// The balances in unspecified order
    pub fn into_balances(self) -> Vec<Balance> {
        self.balances.into_values().collect()
    }

    fn sorted(&self) -> impl Iterator<Item = &Balance> {
        self.balances
            .values()
            .sorted_by(|a, b| a.currency.cmp(&b.currency))
    }

    /// Serialize the balances to CSV.
    /// Note: sorts by currency so the output is stable between runs.
    pub fn serialize_csv(
        &self,
        output: impl std::io::Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = csv::Writer::from_writer(output);
        for balance in self.sorted() {
            writer.serialize(balance)?
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize the balances as a JSON array of `{currency, total}`, sorted by currency.
    pub fn serialize_json(
        &self,
        output: impl std::io::Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        serde_json::to_writer(output, &self.sorted().collect::<Vec<_>>())?;
        Ok(())
    }
}

impl<'a> FromIterator<&'a Transaction> for Balances {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut balances = Balances::default();
        for transaction in iter {
            balances.apply(transaction);
        }
        balances
    }
}
