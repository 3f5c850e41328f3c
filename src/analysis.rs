use serde::Serialize;

use crate::fmt::dollars;
use crate::models::{MatchStatus, Reconciliation};

/// Substring rules tried in order against the lower-cased ledger description.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["amazon", "aws"], "Cloud Services"),
    (&["office", "supply"], "Office Supplies"),
    (&["travel", "hotel", "flight"], "Travel"),
    (&["salary", "payroll"], "Payroll"),
    (&["tax", "irs"], "Taxes"),
];

pub const FALLBACK_CATEGORY: &str = "Other";

pub fn categorize(description: &str) -> &'static str {
    let desc = description.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| desc.contains(n)))
        .map(|(_, name)| *name)
        .unwrap_or(FALLBACK_CATEGORY)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub icon: &'static str,
    pub color: &'static str,
    pub title: String,
    pub detail: String,
}

/// Result counts by confidence alone, independent of status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceBands {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub total_transactions: usize,
    pub matched_transactions: usize,
    pub review_transactions: usize,
    pub unmatched_transactions: usize,
    pub total_bank_amount: f64,
    pub total_ledger_amount: f64,
    /// Summed ledger amount per category, in first-seen order.
    pub categories: Vec<CategoryTotal>,
    pub insights: Vec<Insight>,
    pub confidence_bands: ConfidenceBands,
}

impl Analysis {
    pub fn balance_discrepancy(&self) -> f64 {
        (self.total_bank_amount - self.total_ledger_amount).abs()
    }

    /// Percentage of all results; 0 for an empty run.
    pub fn share(&self, count: usize) -> f64 {
        if self.total_transactions == 0 {
            0.0
        } else {
            count as f64 / self.total_transactions as f64 * 100.0
        }
    }
}

pub fn analyze(recon: &Reconciliation) -> Analysis {
    let mut matched = 0usize;
    let mut review = 0usize;
    let mut unmatched = 0usize;
    let mut bands = ConfidenceBands::default();
    let mut total_bank = 0.0;
    let mut total_ledger = 0.0;
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut largest: Option<(f64, &str)> = None;

    for result in &recon.results {
        match result.status {
            MatchStatus::Matched => matched += 1,
            MatchStatus::NeedsReview => review += 1,
            MatchStatus::Unmatched => unmatched += 1,
        }
        if result.confidence >= 80.0 {
            bands.high += 1;
        } else if result.confidence >= 50.0 {
            bands.medium += 1;
        } else {
            bands.low += 1;
        }

        if let Some(bank) = recon.bank_entry(result) {
            total_bank += bank.amount;
        }
        let Some(ledger) = recon.ledger_entry(result) else {
            continue;
        };
        total_ledger += ledger.amount;

        let name = categorize(&ledger.description);
        match categories.iter_mut().find(|c| c.name == name) {
            Some(c) => c.total += ledger.amount,
            None => categories.push(CategoryTotal {
                name: name.to_string(),
                total: ledger.amount,
            }),
        }

        if largest.map_or(true, |(amount, _)| ledger.amount > amount) {
            largest = Some((ledger.amount, ledger.description.as_str()));
        }
    }

    let mut insights = Vec::new();
    if unmatched > 0 {
        insights.push(Insight {
            icon: "exclamation-triangle",
            color: "yellow",
            title: format!("{unmatched} unmatched transactions"),
            detail: "Requires manual review".to_string(),
        });
    }
    let discrepancy = (total_bank - total_ledger).abs();
    if discrepancy > 1.0 {
        insights.push(Insight {
            icon: "balance-scale",
            color: "red",
            title: format!("Balance discrepancy: {}", dollars(discrepancy)),
            detail: "Bank and ledger totals don't match".to_string(),
        });
    }
    if let Some((amount, description)) = largest {
        insights.push(Insight {
            icon: "money-bill-wave",
            color: "blue",
            title: format!("Largest payment: {}", dollars(amount)),
            detail: description.to_string(),
        });
    }

    Analysis {
        total_transactions: recon.results.len(),
        matched_transactions: matched,
        review_transactions: review,
        unmatched_transactions: unmatched,
        total_bank_amount: total_bank,
        total_ledger_amount: total_ledger,
        categories,
        insights,
        confidence_bands: bands,
    }
}
