//! Delimited-file implementation of the partner repository.

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::domain::entities::{Column, ColumnSet, PartnerRecord, PartnerTable};
use crate::domain::repositories::PartnerRepository;
use crate::error::AppError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Partner repository backed by a CSV (or other single-byte delimited) file.
///
/// The file is read on the first [`PartnerRepository::load`] call and the
/// parsed table is kept for the lifetime of the repository. A failed read is
/// not cached.
pub struct CsvPartnerRepository {
    path: PathBuf,
    delimiter: u8,
    table: OnceCell<Arc<PartnerTable>>,
}

impl CsvPartnerRepository {
    /// Creates a repository reading a comma-delimited file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            table: OnceCell::new(),
        }
    }

    /// Overrides the field delimiter (e.g. `b';'` for spreadsheet exports).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self) -> Result<Arc<PartnerTable>, AppError> {
        let source = self.path.display().to_string();

        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(path = %source, error = %e, "Failed to read partner data file");
            AppError::data_unavailable(
                format!("Partner data file '{source}' could not be read"),
                json!({ "path": source, "reason": e.to_string() }),
            )
        })?;

        let table = parse_table(&data, self.delimiter, &source)?;

        for warning in table.column_warnings() {
            tracing::warn!(path = %source, column = warning.header, "{}", warning.message);
        }
        tracing::info!(path = %source, rows = table.len(), "Partner table loaded");

        Ok(Arc::new(table))
    }
}

#[async_trait]
impl PartnerRepository for CsvPartnerRepository {
    async fn load(&self) -> Result<Arc<PartnerTable>, AppError> {
        self.table
            .get_or_try_init(|| self.read_table())
            .await
            .map(Arc::clone)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// Position of each known column in the header row.
struct HeaderLayout {
    positions: HashMap<Column, usize>,
}

impl HeaderLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                positions.entry(column).or_insert(index);
            }
        }
        Self { positions }
    }

    fn columns(&self) -> ColumnSet {
        self.positions.keys().copied().collect()
    }

    fn text(&self, record: &StringRecord, column: Column) -> Option<String> {
        let index = *self.positions.get(&column)?;
        record
            .get(index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn number(&self, record: &StringRecord, column: Column) -> Option<f64> {
        self.text(record, column)?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn record(&self, record: &StringRecord) -> PartnerRecord {
        PartnerRecord {
            name: self.text(record, Column::Name),
            city: self.text(record, Column::City),
            region: self.text(record, Column::Region),
            contact: self.text(record, Column::Contact),
            services: self.text(record, Column::Services),
            latitude: self.number(record, Column::Latitude),
            longitude: self.number(record, Column::Longitude),
        }
    }
}

/// Parses delimited bytes into a partner table.
///
/// Rows the reader rejects (e.g. invalid UTF-8) are skipped and logged.
/// Unparseable coordinates become `None`.
///
/// # Errors
///
/// Returns [`AppError::DataUnavailable`] if the input has no header row or
/// none of the known columns.
pub fn parse_table(data: &[u8], delimiter: u8, source: &str) -> Result<PartnerTable, AppError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers().map_err(|e| {
        AppError::data_unavailable(
            format!("Partner data file '{source}' has an unreadable header"),
            json!({ "path": source, "reason": e.to_string() }),
        )
    })?;

    let layout = HeaderLayout::from_headers(headers);
    if layout.positions.is_empty() {
        let found: Vec<&str> = headers.iter().collect();
        return Err(AppError::data_unavailable(
            format!("Partner data file '{source}' has none of the expected columns"),
            json!({
                "path": source,
                "found": found,
                "expected": Column::ALL.map(Column::header),
            }),
        ));
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        match row {
            Ok(row) => records.push(layout.record(&row)),
            Err(e) => {
                // +2: one for the header, one for 1-based line numbers.
                tracing::warn!(path = %source, line = index + 2, error = %e, "Skipping malformed row");
            }
        }
    }

    Ok(PartnerTable::new(records, layout.columns(), source))
}
