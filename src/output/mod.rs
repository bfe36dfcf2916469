//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod pretty;
pub mod table;

/// Render `rows` in `format`; `pretty` supplies the human-oriented layout.
pub fn render<T: Tabled + Serialize>(
    rows: &[T],
    format: OutputFormat,
    pretty: fn(&[T]) -> String,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty => pretty(rows),
        OutputFormat::Table => table::format_table(rows),
        OutputFormat::Json => json::format_json(rows)?,
    })
}

/// Format and print `rows` to stdout
pub fn print<T: Tabled + Serialize>(
    rows: &[T],
    format: OutputFormat,
    pretty: fn(&[T]) -> String,
) -> Result<()> {
    println!("{}", render(rows, format, pretty)?);
    Ok(())
}
