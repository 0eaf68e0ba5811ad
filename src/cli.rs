//! Command-line surface and parameter resolution.

use std::path::PathBuf;

use clap::Parser;

use crate::{ExportError, ExportResult};

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";
pub const MISSING_TABLE_NAME: &str = "Error: You must provide the table name with --tableName";

#[derive(Parser, Debug)]
#[command(name = "dynamo-export")]
#[command(about = "Export every item of a DynamoDB table to a CSV file", long_about = None)]
pub struct Cli {
    /// AWS region hosting the table
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Name of the table to export (required)
    #[arg(long = "tableName", value_name = "TABLE")]
    pub table_name: Option<String>,

    /// Destination CSV file
    #[arg(long = "outputFile", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Write machine-readable JSON run report to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Enable verbose logging (or set DYNAMO_EXPORT_LOG)
    #[arg(long)]
    pub verbose: bool,
}

/// Validated parameters handed to the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParams {
    pub region: String,
    pub table_name: String,
    pub output_file: PathBuf,
}

impl Cli {
    /// Resolve the parsed flags into [`ExportParams`].
    ///
    /// A missing or empty `--tableName` is a configuration error.
    pub fn params(&self) -> ExportResult<ExportParams> {
        let table_name = self
            .table_name
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ExportError::Config(MISSING_TABLE_NAME.to_string()))?;

        Ok(ExportParams {
            region: self.region.clone(),
            table_name: table_name.to_string(),
            output_file: self.output_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("dynamo-export").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "--region",
            "us-west-2",
            "--tableName",
            "MyTable",
            "--outputFile",
            "data.csv",
        ]);
        let params = cli.params().unwrap();
        assert_eq!(
            params,
            ExportParams {
                region: "us-west-2".to_string(),
                table_name: "MyTable".to_string(),
                output_file: PathBuf::from("data.csv"),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let params = parse(&["--tableName", "MyTable"]).params().unwrap();
        assert_eq!(params.region, "eu-west-1");
        assert_eq!(params.table_name, "MyTable");
        assert_eq!(params.output_file, PathBuf::from("output.csv"));
    }

    #[test]
    fn test_equals_syntax() {
        let params = parse(&["--tableName=Orders", "--region=ap-south-1"]).params().unwrap();
        assert_eq!(params.table_name, "Orders");
        assert_eq!(params.region, "ap-south-1");
    }

    #[test]
    fn test_missing_table_name() {
        let err = parse(&["--region", "us-west-2"]).params().unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
        assert_eq!(err.to_string(), "Error: You must provide the table name with --tableName");
    }

    #[test]
    fn test_empty_table_name() {
        let err = parse(&["--tableName", ""]).params().unwrap_err();
        assert_eq!(err.to_string(), MISSING_TABLE_NAME);
    }

    #[test]
    fn test_optional_flags() {
        let cli = parse(&["--tableName", "T", "--json", "report.json", "--verbose"]);
        assert_eq!(cli.json, Some(PathBuf::from("report.json")));
        assert!(cli.verbose);
    }
}
