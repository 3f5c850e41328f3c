use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::importer::{parse_delimiter, read_feed};
use crate::models::Feed;
use crate::settings::load_settings;

pub fn run(file: &str, rows: Option<usize>, delimiter: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let delimiter = parse_delimiter(delimiter.unwrap_or(&settings.delimiter))?;
    let feed = read_feed(Path::new(file), delimiter)?;
    println!("{}", format_preview(&feed, rows.unwrap_or(settings.preview_rows)));
    Ok(())
}

pub fn format_preview(feed: &Feed, rows: usize) -> String {
    if feed.rows.is_empty() {
        return "No data available".to_string();
    }
    let mut table = Table::new();
    table.set_header(feed.headers.iter().map(Cell::new).collect::<Vec<_>>());
    for row in feed.rows.iter().take(rows) {
        table.add_row(
            feed.headers
                .iter()
                .map(|h| Cell::new(row.get(h).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>(),
        );
    }
    format!("{table}\n{} of {} rows", rows.min(feed.rows.len()), feed.rows.len())
}
