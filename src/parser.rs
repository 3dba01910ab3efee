use std::{borrow::Cow, collections::HashMap, io::Read, str::FromStr};

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use rust_decimal::{prelude::FromPrimitive, Decimal};

use crate::{
    error::Error,
    transaction::{Narratives, Transaction, ZERO_DATE},
};

/// Day/month/four-digit-year, e.g. `01/05/2024`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const DATE: &str = "Date";
const TYPE: &str = "Type";
const CREDIT: &str = "Credit";
const DEBIT: &str = "Debit";
const CURRENCY: &str = "Currency";
const NARRATIVES: [&str; 5] = [
    "Narrative 1",
    "Narrative 2",
    "Narrative 3",
    "Narrative 4",
    "Narrative 5",
];

/// Column name to position, resolved once from the header row.
/// Lookups of absent columns yield an empty cell.
#[derive(Debug)]
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &csv::ByteRecord) -> Self {
        Columns(
            headers
                .iter()
                .enumerate()
                .map(|(position, name)| (String::from_utf8_lossy(name).into_owned(), position))
                .collect(),
        )
    }

    /// Cell text; bytes that are not UTF-8 become U+FFFD instead of failing the row.
    fn cell<'r>(&self, record: &'r csv::ByteRecord, name: &str) -> Cow<'r, str> {
        self.0
            .get(name)
            .and_then(|&position| record.get(position))
            .map(String::from_utf8_lossy)
            .unwrap_or_default()
    }

    fn decode(&self, record: &csv::ByteRecord) -> Transaction {
        let narratives: Narratives =
            std::array::from_fn(|i| self.cell(record, NARRATIVES[i]).into_owned());

        Transaction {
            date: parse_date_or_default(&self.cell(record, DATE)),
            narratives,
            transaction_type: self.cell(record, TYPE).into_owned(),
            credit: parse_amount_or_default(&self.cell(record, CREDIT)),
            debit: parse_amount_or_default(&self.cell(record, DEBIT)),
            currency: self.cell(record, CURRENCY).into_owned(),
        }
    }
}

/// Reads the header row and returns a lazy iterator decoding the remaining rows in order.
///
/// Field-level problems (bad dates, bad amounts, absent columns, invalid UTF-8) never fail a
/// row, they fall back to defaults. Only tokenizer failures (e.g. a row with a different field
/// count than the header) surface as `Error::Decode`.
pub fn parse<R>(
    mut rdr: csv::Reader<R>,
) -> Result<impl Iterator<Item = Result<Transaction, Error>>, Error>
where
    R: Read,
{
    let headers = rdr.byte_headers()?;
    if headers.is_empty() {
        return Err(Error::Decode("missing header row".to_string()));
    }
    let columns = Columns::from_headers(headers);

    Ok(rdr
        .into_byte_records()
        .map(move |record| -> Result<Transaction, Error> { Ok(columns.decode(&record?)) }))
}

/// Decodes a whole statement. The first row that cannot be tokenized aborts decoding and
/// everything decoded so far is discarded.
pub fn decode<R>(input: R) -> Result<Vec<Transaction>, Error>
where
    R: Read,
{
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let transactions = parse(rdr).and_then(|rows| rows.collect::<Result<Vec<_>, _>>());
    match &transactions {
        Ok(transactions) => info!(
            "end of statement reached, {} rows decoded",
            transactions.len()
        ),
        Err(e) => error!("error reading statement: {}", e),
    }
    transactions
}

/// Exactly `DD/MM/YYYY`: zero-padded day and month, four-digit year.
fn parse_exact_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
}

/// Parses a row date, substituting the zero date when it is not exactly `DD/MM/YYYY`.
pub fn parse_date_or_default(value: &str) -> NaiveDate {
    parse_exact_date(value.trim()).unwrap_or_else(|| {
        if !value.is_empty() {
            debug!("unparsable date `{}`, using zero date", value);
        }
        ZERO_DATE
    })
}

/// Parses a monetary amount, ignoring thousands separators. Unparsable input yields zero.
///
/// Finite values beyond the range of `Decimal` are clamped to `Decimal::MAX` / `Decimal::MIN`.
pub fn parse_amount_or_default(value: &str) -> Decimal {
    let cleaned = value.trim().replace(',', "");
    if let Ok(amount) = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned))
    {
        return amount;
    }

    match cleaned.parse::<f64>() {
        Ok(float) if !float.is_nan() => Decimal::from_f64(float).unwrap_or_else(|| {
            if float.abs() < 1.0 {
                return Decimal::ZERO;
            }
            warn!("amount `{}` out of range, clamping", value);
            if float.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }),
        _ => {
            if !cleaned.is_empty() {
                debug!("unparsable amount `{}`, using 0", value);
            }
            Decimal::ZERO
        }
    }
}

/// Strict parser for the caller-supplied target date: the input must be exactly `DD/MM/YYYY`.
pub fn parse_target_date(value: &str) -> Result<NaiveDate, Error> {
    parse_exact_date(value).ok_or_else(|| Error::DateFormat(value.to_string()))
}
