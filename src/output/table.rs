//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table, or "No results found." when empty
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format free-form key/value pairs as a two-column table.
///
/// Used for backend payloads whose fields are not known ahead of time.
pub fn format_details<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    if pairs.is_empty() {
        return "No details.".to_string();
    }

    let mut builder = Builder::default();
    for (key, value) in pairs {
        builder.push_record([key.as_ref(), value.as_ref()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct InstanceRow {
        #[tabled(rename = "INSTANCE ID")]
        id: String,
        #[tabled(rename = "REGION")]
        region: String,
    }

    fn row(id: &str, region: &str) -> InstanceRow {
        InstanceRow {
            id: id.to_string(),
            region: region.to_string(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<InstanceRow> = vec![];
        assert_eq!(format_table(&rows), "No results found.");
    }

    #[test]
    fn test_format_table_rows_and_headers() {
        let result = format_table(&[row("i-1", "us-east-1"), row("i-2", "eu-west-1")]);

        assert!(result.contains("INSTANCE ID"));
        assert!(result.contains("REGION"));
        assert!(result.contains("i-1"));
        assert!(result.contains("eu-west-1"));
        // Rounded style corners
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }

    #[test]
    fn test_format_details() {
        let result = format_details(&[("samples_created", "60"), ("instance_id", "i-1")]);

        assert!(result.contains("samples_created"));
        assert!(result.contains("60"));
        assert!(result.contains("╭"));
        assert_eq!(format_details::<&str, &str>(&[]), "No details.");
    }
}
