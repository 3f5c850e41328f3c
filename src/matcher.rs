use std::collections::BTreeSet;

use tracing::debug;

use crate::confidence::ConfidenceSource;
use crate::models::{Entry, MatchResult, MatchStatus, MatchingParameters, Reconciliation};

/// Amounts closer than this count as equal in the exact pass.
pub const EXACT_AMOUNT_EPSILON: f64 = 0.01;
/// Minimum fuzzy score for a pairing to be emitted at all.
pub const MIN_PAIR_SCORE: f64 = 50.0;
pub const UNMATCHED_NOTE: &str = "Unmatched";

/// Indices already committed to a pairing, one set per side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    bank: BTreeSet<usize>,
    ledger: BTreeSet<usize>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_bank(&mut self, index: usize) {
        self.bank.insert(index);
    }

    pub fn claim_ledger(&mut self, index: usize) {
        self.ledger.insert(index);
    }

    pub fn bank_claimed(&self, index: usize) -> bool {
        self.bank.contains(&index)
    }

    pub fn ledger_claimed(&self, index: usize) -> bool {
        self.ledger.contains(&index)
    }

    pub fn unclaimed_ledger(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        (0..len).filter(move |i| !self.ledger.contains(i))
    }
}

/// Pairs bank entries with ledger entries, recording every commitment in `claims`.
///
/// Returns the results for bank-side rows only; leftover ledger rows are
/// emitted by [`reconcile_with`].
pub trait PairingStrategy {
    fn pair(
        &self,
        bank: &[Entry],
        ledger: &[Entry],
        params: &MatchingParameters,
        confidence: &mut dyn ConfidenceSource,
        claims: &mut Claims,
    ) -> Vec<MatchResult>;
}

/// First-fit exact pass followed by a best-score fuzzy pass. Never revisits a
/// commitment, so it can miss the globally best assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPairing;

impl PairingStrategy for GreedyPairing {
    fn pair(
        &self,
        bank: &[Entry],
        ledger: &[Entry],
        params: &MatchingParameters,
        confidence: &mut dyn ConfidenceSource,
        claims: &mut Claims,
    ) -> Vec<MatchResult> {
        let bank_keys: Vec<String> = bank.iter().map(|e| e.description.to_lowercase()).collect();
        let ledger_keys: Vec<String> = ledger.iter().map(|e| e.description.to_lowercase()).collect();

        let mut results = exact_pass(bank, ledger, &bank_keys, &ledger_keys, confidence, claims);
        let exact = results.len();
        results.extend(fuzzy_pass(bank, ledger, &bank_keys, &ledger_keys, params, confidence, claims));
        debug!(exact, fuzzy = results.len() - exact, "bank side paired");
        results
    }
}

/// Run the default greedy strategy.
pub fn reconcile(
    bank: Vec<Entry>,
    ledger: Vec<Entry>,
    params: &MatchingParameters,
    confidence: &mut dyn ConfidenceSource,
) -> Reconciliation {
    reconcile_with(&GreedyPairing, bank, ledger, params, confidence)
}

pub fn reconcile_with(
    strategy: &dyn PairingStrategy,
    bank: Vec<Entry>,
    ledger: Vec<Entry>,
    params: &MatchingParameters,
    confidence: &mut dyn ConfidenceSource,
) -> Reconciliation {
    let mut claims = Claims::new();
    let mut results = strategy.pair(&bank, &ledger, params, confidence, &mut claims);
    let before = results.len();
    results.extend(residual_pass(ledger.len(), confidence, &claims));
    debug!(residual = results.len() - before, "ledger residuals emitted");

    Reconciliation {
        bank,
        ledger,
        results,
    }
}

fn exact_pass(
    bank: &[Entry],
    ledger: &[Entry],
    bank_keys: &[String],
    ledger_keys: &[String],
    confidence: &mut dyn ConfidenceSource,
    claims: &mut Claims,
) -> Vec<MatchResult> {
    let mut results = Vec::new();
    for (bi, b) in bank.iter().enumerate() {
        let found = (0..ledger.len()).find(|&li| {
            !claims.ledger_claimed(li)
                && (b.amount - ledger[li].amount).abs() < EXACT_AMOUNT_EPSILON
                && bank_keys[bi] == ledger_keys[li]
        });
        if let Some(li) = found {
            results.push(MatchResult {
                bank: Some(bi),
                ledger: Some(li),
                confidence: confidence.exact_match(),
                discrepancy: None,
                status: MatchStatus::Matched,
            });
            claims.claim_bank(bi);
            claims.claim_ledger(li);
        }
    }
    results
}

struct Candidate {
    ledger: usize,
    score: f64,
    amount_diff: f64,
}

fn fuzzy_pass(
    bank: &[Entry],
    ledger: &[Entry],
    bank_keys: &[String],
    ledger_keys: &[String],
    params: &MatchingParameters,
    confidence: &mut dyn ConfidenceSource,
    claims: &mut Claims,
) -> Vec<MatchResult> {
    let mut results = Vec::new();
    for (bi, b) in bank.iter().enumerate() {
        if claims.bank_claimed(bi) {
            continue;
        }

        let mut best: Option<Candidate> = None;
        for li in claims.unclaimed_ledger(ledger.len()) {
            let Some(score) = score_pair(b, &ledger[li], &bank_keys[bi], &ledger_keys[li], params) else {
                continue;
            };
            if best.as_ref().map_or(true, |c| score > c.score) {
                best = Some(Candidate {
                    ledger: li,
                    score,
                    amount_diff: (b.amount - ledger[li].amount).abs(),
                });
            }
        }

        match best {
            Some(c) if c.score >= MIN_PAIR_SCORE => {
                results.push(MatchResult {
                    bank: Some(bi),
                    ledger: Some(c.ledger),
                    confidence: c.score,
                    discrepancy: (c.amount_diff > 0.0).then(|| format!("${:.2} diff", c.amount_diff)),
                    status: MatchStatus::from_confidence(c.score),
                });
                claims.claim_bank(bi);
                claims.claim_ledger(c.ledger);
            }
            _ => results.push(unmatched(Some(bi), None, confidence)),
        }
    }
    results
}

/// Fuzzy score for one candidate, or `None` when the amount is outside tolerance.
///
/// Raw score is 70 (dates within tolerance) or 50, plus similarity * 30, then
/// scaled down by how much of the amount tolerance the difference uses.
pub fn score_pair(
    bank: &Entry,
    ledger: &Entry,
    bank_key: &str,
    ledger_key: &str,
    params: &MatchingParameters,
) -> Option<f64> {
    let amount_diff = (bank.amount - ledger.amount).abs();
    // Signed: a negative bank amount has a negative threshold, so no candidate is admissible.
    let threshold = bank.amount * (params.amount_tolerance_percent as f64 / 100.0);
    if amount_diff > threshold {
        return None;
    }

    let similarity = params.algorithm.similarity(bank_key, ledger_key);
    let date_match = match (bank.date, ledger.date) {
        (Some(a), Some(b)) => (a - b).num_days().unsigned_abs() <= u64::from(params.date_tolerance_days),
        _ => false,
    };

    let raw = if date_match { 70.0 } else { 50.0 } + similarity * 30.0;
    let divisor = if threshold == 0.0 { 1.0 } else { threshold };
    Some((raw * (1.0 - amount_diff / divisor)).clamp(0.0, 100.0))
}

fn residual_pass(
    ledger_len: usize,
    confidence: &mut dyn ConfidenceSource,
    claims: &Claims,
) -> Vec<MatchResult> {
    claims
        .unclaimed_ledger(ledger_len)
        .map(|li| unmatched(None, Some(li), confidence))
        .collect()
}

fn unmatched(
    bank: Option<usize>,
    ledger: Option<usize>,
    confidence: &mut dyn ConfidenceSource,
) -> MatchResult {
    MatchResult {
        bank,
        ledger,
        confidence: confidence.unmatched(),
        discrepancy: Some(UNMATCHED_NOTE.to_string()),
        status: MatchStatus::Unmatched,
    }
}
