use serde::Serialize;

use crate::analysis::Analysis;
use crate::error::{MatchbookError, Result};
use crate::fmt::percent;
use crate::models::{Entry, MatchResult, MatchStatus, Reconciliation};

pub const DETAIL_HEADER: [&str; 9] = [
    "Bank Date",
    "Bank Description",
    "Bank Amount",
    "Ledger Date",
    "Ledger Description",
    "Ledger Amount",
    "Match Status",
    "Confidence",
    "Discrepancy",
];

fn write_rows(out: &mut String, rows: &[Vec<String>]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| MatchbookError::Other(format!("Failed to flush report: {e}")))?;
    out.push_str(&String::from_utf8_lossy(&bytes));
    Ok(())
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Always-quoted text cell, embedded quotes doubled.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Date, description and amount cells for one side; blanks when the side is absent.
fn side_cells(entry: Option<&Entry>) -> [String; 3] {
    match entry {
        Some(e) => [
            quoted(&or_na(&e.date_raw)),
            quoted(&or_na(&e.description)),
            format!("{:.2}", e.amount),
        ],
        None => [quoted(""), quoted(""), String::new()],
    }
}

/// One detail row. Text cells are quoted, numbers and status are bare.
fn detail_line(recon: &Reconciliation, result: &MatchResult) -> String {
    let mut cells: Vec<String> = Vec::with_capacity(DETAIL_HEADER.len());
    cells.extend(side_cells(recon.bank_entry(result)));
    cells.extend(side_cells(recon.ledger_entry(result)));
    cells.push(result.status.label().to_string());
    cells.push(percent(result.confidence));
    cells.push(quoted(result.discrepancy.as_deref().unwrap_or("None")));
    cells.join(",")
}

/// Render the CSV reconciliation report: summary, transaction details, categories.
pub fn render_csv(recon: &Reconciliation, analysis: &Analysis) -> Result<String> {
    let mut out = String::from("Reconciliation Report\n\n");

    out.push_str("Summary\n");
    let summary = [
        ("Total Transactions", analysis.total_transactions.to_string()),
        ("Matched Transactions", analysis.matched_transactions.to_string()),
        ("Transactions Needing Review", analysis.review_transactions.to_string()),
        ("Unmatched Transactions", analysis.unmatched_transactions.to_string()),
        ("Total Bank Amount", format!("{:.2}", analysis.total_bank_amount)),
        ("Total Ledger Amount", format!("{:.2}", analysis.total_ledger_amount)),
        ("Balance Discrepancy", format!("{:.2}", analysis.balance_discrepancy())),
    ];
    let rows: Vec<Vec<String>> = summary
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value])
        .collect();
    write_rows(&mut out, &rows)?;
    out.push('\n');

    out.push_str("Transaction Details\n");
    write_rows(&mut out, &[DETAIL_HEADER.iter().map(|h| h.to_string()).collect::<Vec<String>>()])?;
    for result in &recon.results {
        out.push_str(&detail_line(recon, result));
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Categories\n");
    out.push_str("Category,Amount\n");
    for category in &analysis.categories {
        out.push_str(&format!("{},{:.2}\n", quoted(&category.name), category.total));
    }

    Ok(out)
}

#[derive(Serialize)]
struct JsonRow<'a> {
    bank: Option<&'a Entry>,
    ledger: Option<&'a Entry>,
    confidence: f64,
    discrepancy: Option<&'a str>,
    status: MatchStatus,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    analysis: &'a Analysis,
    results: Vec<JsonRow<'a>>,
}

/// Results with their entries inlined, plus the analysis, as pretty JSON.
pub fn render_json(recon: &Reconciliation, analysis: &Analysis) -> Result<String> {
    let results = recon
        .results
        .iter()
        .map(|r| JsonRow {
            bank: recon.bank_entry(r),
            ledger: recon.ledger_entry(r),
            confidence: r.confidence,
            discrepancy: r.discrepancy.as_deref(),
            status: r.status,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&JsonReport { analysis, results })?)
}
