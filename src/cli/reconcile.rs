use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};
use tracing::info;

use crate::analysis::{analyze, Analysis, Insight};
use crate::cli::ReconcileArgs;
use crate::confidence;
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::importer::{parse_delimiter, read_entries};
use crate::matcher;
use crate::models::{Entry, MatchStatus, MatchingParameters, Reconciliation};
use crate::report::{render_csv, render_json};
use crate::settings::load_settings;

pub fn run(args: ReconcileArgs) -> Result<()> {
    let settings = load_settings();
    let params = MatchingParameters {
        date_tolerance_days: args.date_tolerance.unwrap_or(settings.date_tolerance_days),
        amount_tolerance_percent: args.amount_tolerance.unwrap_or(settings.amount_tolerance_percent),
        algorithm: args.algorithm.unwrap_or(settings.algorithm),
    };
    let delimiter = parse_delimiter(args.delimiter.as_deref().unwrap_or(&settings.delimiter))?;

    let bank = read_entries(Path::new(&args.bank), delimiter)?;
    let ledger = read_entries(Path::new(&args.ledger), delimiter)?;

    let mut source = confidence::from_options(args.seed, args.random);
    let recon = matcher::reconcile(bank, ledger, &params, source.as_mut());
    let analysis = analyze(&recon);
    info!(
        results = analysis.total_transactions,
        matched = analysis.matched_transactions,
        review = analysis.review_transactions,
        unmatched = analysis.unmatched_transactions,
        "reconciliation complete"
    );

    if args.json && args.output.is_none() {
        println!("{}", render_json(&recon, &analysis)?);
        return Ok(());
    }

    println!("{}", format_summary(&analysis));
    let limit = args.limit.unwrap_or(settings.detail_limit);
    println!("{}", format_details(&recon, args.status, limit));

    if let Some(output) = args.output {
        let body = if args.json {
            render_json(&recon, &analysis)?
        } else {
            render_csv(&recon, &analysis)?
        };
        let path = PathBuf::from(&output);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, body)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn colored_status(status: MatchStatus) -> String {
    match status {
        MatchStatus::Matched => status.label().green().to_string(),
        MatchStatus::NeedsReview => status.label().yellow().to_string(),
        MatchStatus::Unmatched => status.label().red().to_string(),
    }
}

fn colored_insight(insight: &Insight) -> String {
    let title = match insight.color {
        "yellow" => insight.title.yellow().bold(),
        "red" => insight.title.red().bold(),
        "blue" => insight.title.blue().bold(),
        _ => insight.title.bold(),
    };
    format!("{title}\n  {}", insight.detail)
}

fn entry_cell(entry: Option<&Entry>) -> String {
    match entry {
        Some(e) => format!("{}  {}\n{}", e.date_raw, e.description, money(e.amount)),
        None => "\u{2014}".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pure formatting functions
// ---------------------------------------------------------------------------

pub fn format_summary(analysis: &Analysis) -> String {
    let mut out = String::new();

    let mut table = Table::new();
    table.set_header(vec!["", "Count", "Share"]);
    let rows = [
        (MatchStatus::Matched, analysis.matched_transactions),
        (MatchStatus::NeedsReview, analysis.review_transactions),
        (MatchStatus::Unmatched, analysis.unmatched_transactions),
    ];
    for (status, count) in rows {
        table.add_row(vec![
            Cell::new(colored_status(status)),
            Cell::new(count),
            Cell::new(percent(analysis.share(count))),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(analysis.total_transactions),
        Cell::new(""),
    ]);
    out.push_str(&format!("{table}\n"));

    let bands = analysis.confidence_bands;
    out.push_str(&format!(
        "Confidence: {} high, {} medium, {} low\n",
        bands.high, bands.medium, bands.low
    ));
    out.push_str(&format!(
        "Bank total:   {}\nLedger total: {}\nDiscrepancy:  {}\n",
        money(analysis.total_bank_amount),
        money(analysis.total_ledger_amount),
        money(analysis.balance_discrepancy())
    ));

    if !analysis.categories.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Amount"]);
        for c in &analysis.categories {
            table.add_row(vec![Cell::new(&c.name), Cell::new(money(c.total))]);
        }
        out.push_str(&format!("\n{table}\n"));
    }

    if !analysis.insights.is_empty() {
        out.push('\n');
        for insight in &analysis.insights {
            out.push_str(&colored_insight(insight));
            out.push('\n');
        }
    }
    out
}

pub fn format_details(recon: &Reconciliation, status: Option<MatchStatus>, limit: usize) -> String {
    let selected: Vec<_> = recon
        .results
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .collect();
    if selected.is_empty() {
        return "No transactions to show.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Bank", "Ledger", "Status", "Confidence", "Discrepancy"]);
    for r in selected.iter().take(limit) {
        table.add_row(vec![
            Cell::new(entry_cell(recon.bank_entry(r))),
            Cell::new(entry_cell(recon.ledger_entry(r))),
            Cell::new(colored_status(r.status)),
            Cell::new(percent(r.confidence)),
            Cell::new(r.discrepancy.as_deref().unwrap_or("")),
        ]);
    }

    let mut out = table.to_string();
    if selected.len() > limit {
        out.push_str(&format!("\nShowing {limit} of {} transactions", selected.len()));
    }
    out
}
