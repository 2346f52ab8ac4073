//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod progress;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        let output = self.format(format)?;
        println!("{}", output);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty | OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Report a completed mutation.
///
/// JSON output gets the `{data, meta}` envelope on stdout; other formats get
/// a check line on stderr.
pub fn print_success<T: Serialize>(format: OutputFormat, message: &str, data: &T) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(data)?),
        _ => eprintln!("{} {}", "✓".green(), message),
    }
    Ok(())
}
