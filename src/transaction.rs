use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const NARRATIVE_COUNT: usize = 5;

/// Free-text fields "Narrative 1".."Narrative 5", in column order.
pub type Narratives = [String; NARRATIVE_COUNT];

/// Date substituted for missing or unparsable row dates (01/01/0001).
pub const ZERO_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// One decoded statement row. Fields are only read after decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub narratives: Narratives,
    pub transaction_type: String,
    pub credit: Decimal,
    pub debit: Decimal,
    pub currency: String,
}

impl Transaction {
    /// Calendar-day equality with the target date.
    pub fn is_dated(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Net contribution of this row to its currency balance, clamped to the range of `Decimal`.
    pub fn net(&self) -> Decimal {
        self.debit.saturating_sub(self.credit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{Transaction, ZERO_DATE};

    fn transaction(date: NaiveDate) -> Transaction {
        Transaction {
            date,
            narratives: Default::default(),
            transaction_type: "TFR".to_string(),
            credit: dec!(20.25),
            debit: dec!(100.50),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn zero_date_is_first_day_of_year_one() {
        assert_eq!(ZERO_DATE, NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
    }

    #[test]
    fn dated_on_same_day_only() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let t = transaction(day);
        assert!(t.is_dated(day));
        assert!(!t.is_dated(day.succ_opt().unwrap()));
        assert!(!t.is_dated(day.pred_opt().unwrap()));
    }

    #[test]
    fn net_is_debit_minus_credit() {
        let t = transaction(ZERO_DATE);
        assert_eq!(t.net(), dec!(80.25));
    }

    #[test]
    fn net_saturates_instead_of_overflowing() {
        let mut t = transaction(ZERO_DATE);
        t.debit = Decimal::MAX;
        t.credit = Decimal::MIN;
        assert_eq!(t.net(), Decimal::MAX);

        t.debit = Decimal::MIN;
        t.credit = Decimal::MAX;
        assert_eq!(t.net(), Decimal::MIN);
    }
}
