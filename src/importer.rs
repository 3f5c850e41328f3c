use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MatchbookError, Result};
use crate::models::{Entry, Feed, FinancialEntry};
use crate::normalize::normalize_all;

/// Parse delimited text whose first row names the columns.
///
/// Short rows are padded with empty values, extra cells are dropped and rows
/// with nothing but whitespace are skipped. Empty or header-only input yields
/// an empty feed.
pub fn parse_feed<R: Read>(reader: R, delimiter: u8) -> Result<Feed> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = rdr.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(Feed::default()),
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let row: FinancialEntry = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").trim().to_string()))
            .collect();
        rows.push(row);
    }
    Ok(Feed { headers, rows })
}

pub fn read_feed(path: &Path, delimiter: u8) -> Result<Feed> {
    let file = std::fs::File::open(path).map_err(|source| MatchbookError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    let feed = parse_feed(std::io::BufReader::new(file), delimiter)?;
    debug!(path = %path.display(), columns = feed.headers.len(), rows = feed.rows.len(), "feed parsed");
    Ok(feed)
}

/// Read a feed and normalize every row into an [`Entry`].
pub fn read_entries(path: &Path, delimiter: u8) -> Result<Vec<Entry>> {
    let feed = read_feed(path, delimiter)?;
    let entries = normalize_all(&feed.rows);
    info!(path = %path.display(), entries = entries.len(), "loaded entries");
    Ok(entries)
}

/// Accepts a single ASCII character, or the words `tab` / `\t`.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(MatchbookError::InvalidArgument(format!(
            "delimiter must be a single ASCII character, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Feed {
        parse_feed(content.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_parse_basic_feed() {
        let feed = parse("Date,Description,Amount\n2025-01-15,Amazon AWS,120.00\n2025-01-16,Office Depot,45.50\n");
        assert_eq!(feed.headers, vec!["Date", "Description", "Amount"]);
        assert_eq!(feed.rows.len(), 2);
        assert_eq!(feed.rows[0]["Description"], "Amazon AWS");
        assert_eq!(feed.rows[1]["Amount"], "45.50");
    }

    #[test]
    fn test_empty_and_header_only() {
        assert!(parse("").rows.is_empty());
        let feed = parse("Date,Description,Amount\n");
        assert!(feed.rows.is_empty());
        assert_eq!(feed.headers.len(), 3);
    }

    #[test]
    fn test_blank_lines_skipped_and_values_trimmed() {
        let feed = parse(" date , description , amount \n\n  2025-01-15 ,  Rent , 1000 \n   \n");
        assert_eq!(feed.headers, vec!["date", "description", "amount"]);
        assert_eq!(feed.rows.len(), 1);
        assert_eq!(feed.rows[0]["description"], "Rent");
        assert_eq!(feed.rows[0]["amount"], "1000");
    }

    #[test]
    fn test_short_rows_padded() {
        let feed = parse("Date,Description,Amount\n2025-01-15,Coffee\n");
        assert_eq!(feed.rows[0]["Amount"], "");
    }

    #[test]
    fn test_quoted_values_keep_delimiter() {
        let feed = parse("Date,Description,Amount\n2025-01-15,\"Smith, Jones LLP\",300\n");
        assert_eq!(feed.rows[0]["Description"], "Smith, Jones LLP");
        assert_eq!(feed.rows[0]["Amount"], "300");
    }

    #[test]
    fn test_custom_delimiter() {
        let feed = parse_feed("Date;Description;Amount\n2025-01-15;Rent;1000\n".as_bytes(), b';').unwrap();
        assert_eq!(feed.rows[0]["Amount"], "1000");
    }

    #[test]
    fn test_read_entries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, "date,description,amount\n2025-01-15,AWS,120.00\n").unwrap();
        let entries = read_entries(&path, b',').unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "AWS");
        assert_eq!(entries[0].amount, 120.0);
        assert!(entries[0].date.is_some());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_entries(&dir.path().join("nope.csv"), b',').unwrap_err();
        assert!(matches!(err, MatchbookError::Unreadable { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter("::").is_err());
    }
}
