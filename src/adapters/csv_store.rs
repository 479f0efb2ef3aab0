use crate::domain::model::WatchTask;
use crate::domain::ports::WatchTaskStore;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::PathBuf;

const EXPECTED_COLUMNS: usize = 3;

/// Watch tasks stored as `destination,location_code,threshold_price` rows.
#[derive(Debug, Clone)]
pub struct CsvTaskStore {
    path: PathBuf,
}

impl CsvTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WatchTaskStore for CsvTaskStore {
    async fn load(&self) -> Result<Vec<WatchTask>> {
        tracing::debug!("Reading watch tasks from {}", self.path.display());

        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| WatchError::LoadError {
                path: self.path.display().to_string(),
                source,
            })?;

        let tasks = parse_tasks(data.as_slice())?;
        tracing::info!(
            "📋 Loaded {} watch task(s) from {}",
            tasks.len(),
            self.path.display()
        );
        Ok(tasks)
    }
}

/// Parse every usable row. A header is not declared: the first row is
/// dropped when it does not parse as a task, like any other bad row.
pub fn parse_tasks<R: Read>(reader: R) -> Result<Vec<WatchTask>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;

        match parse_row(row, &record) {
            Ok(task) => tasks.push(task),
            Err(e) if index == 0 => {
                tracing::debug!("Treating first row as header ({})", e);
            }
            Err(e) => {
                tracing::warn!("⚠️ {}", e);
            }
        }
    }

    Ok(tasks)
}

fn parse_row(row: usize, record: &StringRecord) -> Result<WatchTask> {
    if record.len() < EXPECTED_COLUMNS {
        return Err(WatchError::ParseError {
            row,
            message: format!(
                "expected {} columns, found {}",
                EXPECTED_COLUMNS,
                record.len()
            ),
        });
    }

    let destination_label = &record[0];
    let location_code = &record[1];
    // 名稱與代碼原樣保留，只有價格欄位去除空白
    let raw_threshold = record[2].trim();

    if destination_label.is_empty() || location_code.is_empty() {
        return Err(WatchError::ParseError {
            row,
            message: "destination and location code must not be empty".to_string(),
        });
    }

    let threshold_price: f64 = raw_threshold.parse().map_err(|_| WatchError::ParseError {
        row,
        message: format!("threshold '{}' is not a number", raw_threshold),
    })?;

    if !threshold_price.is_finite() || threshold_price < 0.0 {
        return Err(WatchError::ParseError {
            row,
            message: format!("threshold '{}' must be a non-negative price", raw_threshold),
        });
    }

    Ok(WatchTask::new(
        destination_label,
        location_code,
        threshold_price,
    ))
}
