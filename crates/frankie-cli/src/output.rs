//! Plain-text and JSON rendering of command results.

use anyhow::Result;
use serde::Serialize;

/// Column gap used by tables
const COLUMN_GAP: usize = 2;

/// Print any serializable value as indented JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render ordered key/value pairs, skipping keys without a value
pub fn render_key_values(pairs: &[(&str, Option<String>)]) -> String {
    let key_width = pairs
        .iter()
        .filter(|(_, v)| v.is_some())
        .map(|(k, _)| k.chars().count() + 1)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, value) in pairs {
        if let Some(value) = value {
            let label = format!("{}:", key);
            out.push_str(&format!("{:<width$}  {}\n", label, value, width = key_width));
        }
    }
    out
}

pub fn print_key_values(pairs: &[(&str, Option<String>)]) {
    print!("{}", render_key_values(pairs));
}

/// Render a table with a header row and space-padded columns
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width + COLUMN_GAP))
            .collect();
        format!("{}\n", line.concat().trim_end())
    };

    let mut out = render_row(headers.to_vec());
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Shorten an ISO timestamp to its date part
pub fn format_date(date: &str) -> String {
    if date.len() >= 10 {
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Display "Yes"/"No" for a flag
pub fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}
