//! CSV export for scanned records.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::{Record, header_of, render_value};
use crate::{ExportError, ExportResult};

/// What an export attempt ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to write; no file was touched.
    Empty,
    /// Header plus `rows` data rows written to `path`.
    Written { rows: usize, path: PathBuf },
    /// Writing failed. The failure is logged, not propagated.
    Failed { reason: String },
}

impl ExportOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ExportOutcome::Empty => "empty",
            ExportOutcome::Written { .. } => "written",
            ExportOutcome::Failed { .. } => "failed",
        }
    }
}

/// CSV exporter for scanned records.
///
/// Columns are the keys of the first record, in that record's order. Fields
/// missing from the header are dropped and header fields a record lacks
/// render as empty cells.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CsvExporter.
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export records to a CSV file.
    ///
    /// An empty slice prints a notice and leaves `output` untouched. Write
    /// errors are logged and reported through [`ExportOutcome::Failed`]
    /// instead of being returned.
    pub fn export(&self, records: &[Record], output: &Path) -> ExportOutcome {
        if records.is_empty() {
            println!("No data found in the DynamoDB table.");
            return ExportOutcome::Empty;
        }

        match self.write_file(records, output) {
            Ok(rows) => {
                println!("Data successfully exported to '{}'", output.display());
                ExportOutcome::Written { rows, path: output.to_path_buf() }
            }
            Err(e) => {
                tracing::error!(path = %output.display(), "Error writing CSV file: {e}");
                eprintln!("Error writing CSV file: {e}");
                ExportOutcome::Failed { reason: e.to_string() }
            }
        }
    }

    /// Create or truncate `output` and write records to it.
    ///
    /// # Errors
    /// Returns an error if file operations or CSV writing fails.
    pub fn write_file(&self, records: &[Record], output: &Path) -> ExportResult<usize> {
        // Ensure parent directory exists
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ExportError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| ExportError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(records, file)
    }

    /// Export records to any writer implementing Write.
    ///
    /// Writes nothing at all for an empty slice. Returns the number of data rows written.
    ///
    /// # Errors
    /// Returns an error if CSV writing fails.
    pub fn export_to_writer<W: Write>(&self, records: &[Record], writer: W) -> ExportResult<usize> {
        let Some(header) = header_of(records) else {
            return Ok(0);
        };

        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(&header)
            .map_err(|e| ExportError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            let row = self.record_to_row(&header, record);
            csv_writer
                .write_record(&row)
                .map_err(|e| ExportError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ExportError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(records.len())
    }

    /// Map a record onto the header columns.
    fn record_to_row(&self, header: &[String], record: &Record) -> Vec<String> {
        header
            .iter()
            .map(|column| record.get(column).map(render_value).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn people() -> Vec<Record> {
        vec![
            record(json!({"id": "1", "name": "John Doe", "email": "john@example.com"})),
            record(json!({"id": "2", "name": "Jane Smith", "email": "jane@example.com"})),
        ]
    }

    #[test]
    fn test_export_to_writer() {
        let exporter = CsvExporter::new();

        let mut buffer = Vec::new();
        let rows = exporter.export_to_writer(&people(), &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let csv_str = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,name,email",
                "1,John Doe,john@example.com",
                "2,Jane Smith,jane@example.com",
            ]
        );
    }

    #[test]
    fn test_header_follows_first_record() {
        let exporter = CsvExporter::new();
        let records = vec![
            record(json!({"b": 1, "a": 2})),
            // extra field dropped, missing field empty
            record(json!({"a": 3, "c": "dropped"})),
        ];

        let mut buffer = Vec::new();
        exporter.export_to_writer(&records, &mut buffer).unwrap();

        let csv_str = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(lines, vec!["b,a", "1,2", ",3"]);
    }

    #[test]
    fn test_quoting() {
        let exporter = CsvExporter::new();
        let records = vec![record(json!({
            "comma": "a,b",
            "quote": "say \"hi\"",
            "newline": "line1\nline2",
            "tags": ["x", "y"],
        }))];

        let mut buffer = Vec::new();
        exporter.export_to_writer(&records, &mut buffer).unwrap();

        let csv_str = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv_str,
            "comma,quote,newline,tags\n\"a,b\",\"say \"\"hi\"\"\",\"line1\nline2\",\"[\"\"x\"\",\"\"y\"\"]\"\n"
        );
    }

    #[test]
    fn test_export_to_writer_empty_writes_nothing() {
        let exporter = CsvExporter::new();
        let mut buffer = Vec::new();
        assert_eq!(exporter.export_to_writer(&[], &mut buffer).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_export_to_file() {
        let exporter = CsvExporter::new();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("nested").join("out.csv");

        let outcome = exporter.export(&people(), &output_path);

        assert_eq!(outcome, ExportOutcome::Written { rows: 2, path: output_path.clone() });
        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert!(contents.starts_with("id,name,email\n"));
        assert!(contents.contains("Jane Smith"));
    }

    #[test]
    fn test_export_empty_creates_no_file() {
        let exporter = CsvExporter::new();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.csv");

        let outcome = exporter.export(&[], &output_path);

        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(!output_path.exists());
    }

    #[test]
    fn test_export_empty_keeps_existing_file() {
        let exporter = CsvExporter::new();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.csv");
        std::fs::write(&output_path, "previous").unwrap();

        exporter.export(&[], &output_path);

        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "previous");
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let exporter = CsvExporter::new();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.csv");
        std::fs::write(&output_path, "stale,content\nmore,lines\nand,more\n").unwrap();

        exporter.export(&people()[..1], &output_path);

        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents, "id,name,email\n1,John Doe,john@example.com\n");
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let exporter = CsvExporter::new();
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let outcome = exporter.export(&people(), dir.path());

        assert!(matches!(outcome, ExportOutcome::Failed { ref reason } if reason.contains("failed to create file")));
        assert_eq!(outcome.label(), "failed");
    }
}
