use chrono::NaiveDate;

use crate::models::{Entry, FinancialEntry};

pub const DATE: &str = "Date";
pub const DESCRIPTION: &str = "Description";
pub const AMOUNT: &str = "Amount";

/// Look up a canonical field, preferring the capitalized header and falling
/// back to its lower-cased spelling. Missing or empty in both yields "".
pub fn field<'a>(raw: &'a FinancialEntry, canonical: &str) -> &'a str {
    if let Some(v) = raw.get(canonical).filter(|v| !v.is_empty()) {
        return v;
    }
    raw.get(&canonical.to_lowercase())
        .map(String::as_str)
        .unwrap_or("")
}

/// Plain decimal parse. No currency or separator cleanup; failures become 0.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    // Date-time values: keep the calendar day.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .filter(|_| raw.as_bytes().get(10).is_some_and(|b| *b == b'T' || *b == b' '))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub fn normalize(raw: &FinancialEntry) -> Entry {
    let date_raw = field(raw, DATE).to_string();
    let date = parse_date(&date_raw);
    Entry {
        date_raw,
        date,
        description: field(raw, DESCRIPTION).to_string(),
        amount: parse_amount(field(raw, AMOUNT)),
    }
}

pub fn normalize_all(rows: &[FinancialEntry]) -> Vec<Entry> {
    rows.iter().map(normalize).collect()
}
