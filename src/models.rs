use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::similarity::Algorithm;

/// One raw record as handed over by the importer: header name -> cell value.
pub type FinancialEntry = HashMap<String, String>;

/// A record after field-casing normalization. Built once when a feed enters the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(rename = "date")]
    pub date_raw: String,
    #[serde(skip)]
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: f64,
}

/// A parsed delimited file: the header row plus one map per data row.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub headers: Vec<String>,
    pub rows: Vec<FinancialEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingParameters {
    pub date_tolerance_days: u32,
    /// 0 means exact amounts only.
    pub amount_tolerance_percent: u32,
    pub algorithm: Algorithm,
}

impl Default for MatchingParameters {
    fn default() -> Self {
        Self {
            date_tolerance_days: 3,
            amount_tolerance_percent: 1,
            algorithm: Algorithm::WordOverlap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    #[value(name = "review")]
    NeedsReview,
    Unmatched,
}

impl MatchStatus {
    /// Tier for a fuzzy score: >= 80 matched, >= 50 review, anything lower unmatched.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 80.0 {
            Self::Matched
        } else if confidence >= 50.0 {
            Self::NeedsReview
        } else {
            Self::Unmatched
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Matched => "Matched",
            Self::NeedsReview => "Needs Review",
            Self::Unmatched => "Unmatched",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the result set. `bank` and `ledger` index into the owning
/// [`Reconciliation`]'s entry vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub bank: Option<usize>,
    pub ledger: Option<usize>,
    pub confidence: f64,
    pub discrepancy: Option<String>,
    pub status: MatchStatus,
}

/// The output of one matching run: both input sides plus the ordered results.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub bank: Vec<Entry>,
    pub ledger: Vec<Entry>,
    pub results: Vec<MatchResult>,
}

impl Reconciliation {
    pub fn bank_entry(&self, result: &MatchResult) -> Option<&Entry> {
        result.bank.and_then(|i| self.bank.get(i))
    }

    pub fn ledger_entry(&self, result: &MatchResult) -> Option<&Entry> {
        result.ledger.and_then(|i| self.ledger.get(i))
    }
}
