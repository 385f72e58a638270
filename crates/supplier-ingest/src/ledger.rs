//! Ledger loading and write-back.
//!
//! The ledger is read as a whole table so that every column passes through
//! unchanged. Only the code column is rewritten on output; it is appended
//! when the source has none.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use supplier_model::LedgerRow;
use tracing::{debug, info};

use crate::columns::{delimiter_for_path, find_column, normalize_header};
use crate::error::{IngestError, Result};
use crate::registry::delimiter_byte;

pub const DEFAULT_SUPPLIER_COLUMN: &str = "pembekal";
pub const DEFAULT_CODE_COLUMN: &str = "kod_pembekal";

/// Ledger column names and separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerOptions {
    pub supplier_column: String,
    pub code_column: String,
    /// Field separator; inferred from the file extension when unset.
    pub delimiter: Option<char>,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            supplier_column: DEFAULT_SUPPLIER_COLUMN.to_string(),
            code_column: DEFAULT_CODE_COLUMN.to_string(),
            delimiter: None,
        }
    }
}

impl LedgerOptions {
    fn delimiter_for(&self, path: &Path) -> Result<u8> {
        match self.delimiter {
            Some(delimiter) => delimiter_byte(delimiter),
            None => Ok(delimiter_for_path(path)),
        }
    }
}

/// A ledger table and the positions of the columns the resolver uses.
///
/// Rows are never shorter than `headers`; rows with extra fields keep them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTable {
    /// Header cells as read, plus the code column when it was appended.
    pub headers: Vec<String>,
    pub rows: Vec<LedgerRow>,
    pub supplier_column: usize,
    pub code_column: usize,
}

impl LedgerTable {
    /// Builds a two-column ledger from bare supplier names.
    pub fn from_names<I, S>(names: I, options: &LedgerOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = names
            .into_iter()
            .map(|name| {
                let name: String = name.into();
                let supplier_name = (!name.is_empty()).then(|| name.clone());
                LedgerRow::new(supplier_name, vec![name, String::new()])
            })
            .collect();
        Self {
            headers: vec![options.supplier_column.clone(), options.code_column.clone()],
            rows,
            supplier_column: 0,
            code_column: 1,
        }
    }

    /// Same table carrying `rows` (typically the resolved ones).
    #[must_use]
    pub fn with_rows(&self, rows: Vec<LedgerRow>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
            supplier_column: self.supplier_column,
            code_column: self.code_column,
        }
    }

    pub fn supplier_header(&self) -> &str {
        &self.headers[self.supplier_column]
    }

    pub fn code_header(&self) -> &str {
        &self.headers[self.code_column]
    }

    /// Output cells of one row, with the resolved code in the code column.
    pub fn output_cells(&self, row: &LedgerRow) -> Vec<String> {
        let mut cells = row.cells.clone();
        if cells.len() < self.headers.len() {
            cells.resize(self.headers.len(), String::new());
        }
        cells[self.code_column] = row.resolved_code.clone();
        cells
    }
}

pub fn read_ledger(path: &Path, options: &LedgerOptions) -> Result<LedgerTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter_for(path)?)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    let mut headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    // Lookup only; the header text is written back as read.
    let lookup: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    if lookup.iter().all(String::is_empty) {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    }

    let supplier_column = find_column(&lookup, &options.supplier_column).ok_or_else(|| {
        IngestError::missing_column(&options.supplier_column, path, &lookup)
    })?;
    let source_width = headers.len();
    let (code_column, appended) = match find_column(&lookup, &options.code_column) {
        Some(idx) => (idx, false),
        None => {
            headers.push(options.code_column.clone());
            (source_width, true)
        }
    };
    debug!(
        supplier_column = %headers[supplier_column],
        code_column = %headers[code_column],
        appended,
        "ledger columns located"
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.len() < source_width {
            cells.resize(source_width, String::new());
        }
        if appended {
            // Extra fields of a ragged row stay after the new code column.
            cells.insert(code_column, String::new());
        }
        let supplier_name = Some(cells[supplier_column].clone()).filter(|name| !name.is_empty());
        rows.push(LedgerRow::new(supplier_name, cells));
    }

    info!(path = %path.display(), rows = rows.len(), "ledger loaded");
    Ok(LedgerTable {
        headers,
        rows,
        supplier_column,
        code_column,
    })
}

pub fn write_ledger(path: &Path, table: &LedgerTable, options: &LedgerOptions) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter_for(path)?)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    let write_err = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };
    writer.write_record(&table.headers).map_err(write_err)?;
    for row in &table.rows {
        writer.write_record(table.output_cells(row)).map_err(write_err)?;
    }
    writer.flush().map_err(|e| IngestError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(path = %path.display(), rows = table.rows.len(), "ledger written");
    Ok(())
}

/// Default output path: `<stem>_resolved.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ledger".to_string());
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_resolved.{}", ext.to_string_lossy()),
        None => format!("{stem}_resolved.csv"),
    };
    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_cells_place_code_in_code_column() {
        let table = LedgerTable {
            headers: vec!["No".into(), "pembekal".into(), "kod_pembekal".into()],
            rows: Vec::new(),
            supplier_column: 1,
            code_column: 2,
        };
        let mut row = LedgerRow::new(
            Some("ABC".to_string()),
            vec!["1".to_string(), "ABC".to_string()],
        );
        row.resolved_code = "UP001".to_string();
        assert_eq!(table.output_cells(&row), vec!["1", "ABC", "UP001"]);
    }

    #[test]
    fn from_names_builds_two_columns() {
        let table = LedgerTable::from_names(["ABC", ""], &LedgerOptions::default());
        assert_eq!(table.headers, vec!["pembekal", "kod_pembekal"]);
        assert_eq!(table.rows[0].supplier_name(), Some("ABC"));
        assert_eq!(table.rows[1].supplier_name(), None);
        assert_eq!(table.supplier_header(), "pembekal");
        assert_eq!(table.code_header(), "kod_pembekal");
    }

    #[test]
    fn default_output_path_keeps_extension() {
        assert_eq!(
            default_output_path(Path::new("/data/aset.csv")),
            PathBuf::from("/data/aset_resolved.csv")
        );
        assert_eq!(
            default_output_path(Path::new("aset")),
            PathBuf::from("aset_resolved.csv")
        );
    }
}
