use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::ExportParams;
use crate::fetch::fetch_all_counted;
use crate::storage::{CsvExporter, ExportOutcome};
use crate::store::{DynamoStore, TableStore};
use crate::{ExportError, ExportResult, now_string};

/// Machine-readable summary of one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub table_name: String,
    pub region: String,
    pub output_file: PathBuf,
    pub timestamp: String,
    pub item_count: usize,
    pub page_count: usize,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_written: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> ExportResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| ExportError::Message(e.to_string()))?;
        }
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| ExportError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| ExportError::Message(e.to_string()))
}

/// Export the table named in `params` from DynamoDB.
pub async fn run(params: ExportParams, json_out: Option<PathBuf>) -> ExportResult<ExportReport> {
    println!(
        "Fetching data from DynamoDB table: {} in region: {}...",
        params.table_name, params.region
    );
    let store = DynamoStore::connect(&params.region).await;
    run_with_store(store, &params, json_out.as_deref()).await
}

/// Fetch everything from `store`, write the CSV and optionally the JSON report.
///
/// Scan failures are returned; CSV write failures only show up in the report.
pub async fn run_with_store<S: TableStore>(
    store: S,
    params: &ExportParams,
    json_out: Option<&Path>,
) -> ExportResult<ExportReport> {
    let fetched = fetch_all_counted(store, &params.table_name).await?;

    println!("Found {} items. Exporting to CSV...", fetched.records.len());
    let outcome = CsvExporter::new().export(&fetched.records, &params.output_file);

    let (rows_written, error) = match &outcome {
        ExportOutcome::Written { rows, .. } => (Some(*rows), None),
        ExportOutcome::Failed { reason } => (None, Some(reason.clone())),
        ExportOutcome::Empty => (None, None),
    };

    let report = ExportReport {
        table_name: params.table_name.clone(),
        region: params.region.clone(),
        output_file: params.output_file.clone(),
        timestamp: now_string(),
        item_count: fetched.records.len(),
        page_count: fetched.pages,
        outcome: outcome.label().to_string(),
        rows_written,
        error,
    };

    if let Some(json_path) = json_out {
        write_json(json_path, &report)?;
    }

    tracing::info!(
        table = %report.table_name,
        items = report.item_count,
        outcome = %report.outcome,
        "export finished"
    );
    Ok(report)
}
