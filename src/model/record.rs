// src/model/record.rs

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Date format used by the store and the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Units of one product sold on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub quantity: u32,
}

impl SaleRecord {
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self { date, quantity }
    }
}

/// Why a raw entry was left out of a history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingDate,
    InvalidDate(String),
    MissingQuantity,
    NonNumericQuantity,
    NegativeQuantity,
    /// Quantities are whole units; the sale on this date is dropped.
    FractionalQuantity(NaiveDate),
    QuantityTooLarge,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "entry is not an object"),
            SkipReason::MissingDate => write!(f, "missing or non-string date"),
            SkipReason::InvalidDate(raw) => write!(f, "'{}' is not a YYYY-MM-DD date", raw),
            SkipReason::MissingQuantity => write!(f, "missing quantity"),
            SkipReason::NonNumericQuantity => write!(f, "quantity is not a number"),
            SkipReason::NegativeQuantity => write!(f, "quantity is negative"),
            SkipReason::FractionalQuantity(date) => {
                write!(f, "quantity on {} is not a whole number", date)
            }
            SkipReason::QuantityTooLarge => write!(f, "quantity is out of range"),
        }
    }
}

/// Outcome of reading one entry from an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Valid(SaleRecord),
    Skipped(SkipReason),
}

/// Parses a strict `YYYY-MM-DD` date. Shorter forms such as `2024-1-5` are
/// rejected even though chrono would accept them.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Reads one `{ "date": ..., "quantity": ... }` entry without ever failing.
pub fn parse_raw_record(value: &Value) -> ParsedRecord {
    let Some(entry) = value.as_object() else {
        return ParsedRecord::Skipped(SkipReason::NotAnObject);
    };

    let raw_date = match entry.get("date") {
        Some(Value::String(raw)) => raw,
        _ => return ParsedRecord::Skipped(SkipReason::MissingDate),
    };
    let Some(date) = parse_sale_date(raw_date) else {
        return ParsedRecord::Skipped(SkipReason::InvalidDate(raw_date.clone()));
    };

    let quantity = match entry.get("quantity") {
        None | Some(Value::Null) => Err(SkipReason::MissingQuantity),
        Some(Value::Number(number)) => quantity_from_number(number, date),
        Some(_) => Err(SkipReason::NonNumericQuantity),
    };

    match quantity {
        Ok(quantity) => ParsedRecord::Valid(SaleRecord::new(date, quantity)),
        Err(reason) => ParsedRecord::Skipped(reason),
    }
}

fn quantity_from_number(number: &Number, date: NaiveDate) -> Result<u32, SkipReason> {
    if let Some(value) = number.as_u64() {
        return u32::try_from(value).map_err(|_| SkipReason::QuantityTooLarge);
    }
    if number.is_i64() {
        return Err(SkipReason::NegativeQuantity);
    }

    // Floats: older stores may hold `5.0`.
    let value = number.as_f64().ok_or(SkipReason::NonNumericQuantity)?;
    if value < 0.0 {
        Err(SkipReason::NegativeQuantity)
    } else if value.fract() != 0.0 {
        Err(SkipReason::FractionalQuantity(date))
    } else if value > f64::from(u32::MAX) {
        Err(SkipReason::QuantityTooLarge)
    } else {
        Ok(value as u32)
    }
}
