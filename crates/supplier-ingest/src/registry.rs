//! Registry loading.
//!
//! Two layouts are supported:
//!
//! - [`RegistryFormat::Lines`]: one header line, then `id<sep>name` per line,
//!   split on the first separator only so names may contain it.
//! - [`RegistryFormat::Table`]: a delimited table whose id and name columns are
//!   detected from the header row.
//!
//! Lines or rows that do not yield both an id and a name are dropped and
//! counted; the resolver only ever sees complete entries.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use supplier_model::RegistryEntry;
use tracing::{debug, info, warn};

use crate::columns::{detect_registry_columns, normalize_header};
use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryFormat {
    #[default]
    Lines,
    Table,
}

/// How to read a registry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    pub format: RegistryFormat,
    /// Field separator; a tab unless configured otherwise.
    pub delimiter: char,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            format: RegistryFormat::Lines,
            delimiter: '\t',
        }
    }
}

/// Entries read from a registry file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryLoad {
    pub entries: Vec<RegistryEntry>,
    /// Lines or rows skipped for lacking an id or a name.
    pub dropped: usize,
}

pub fn read_registry(path: &Path, options: &RegistryOptions) -> Result<RegistryLoad> {
    let load = match options.format {
        RegistryFormat::Lines => {
            let text = fs::read_to_string(path).map_err(|e| IngestError::read(path, e))?;
            parse_registry_lines(&text, options.delimiter)
        }
        RegistryFormat::Table => read_registry_table(path, options.delimiter)?,
    };
    if load.dropped > 0 {
        warn!(
            path = %path.display(),
            dropped = load.dropped,
            "registry lines without both id and name were skipped"
        );
    }
    info!(
        path = %path.display(),
        entries = load.entries.len(),
        "registry loaded"
    );
    Ok(load)
}

/// Parses the line layout. The first line is a header and is always skipped.
pub fn parse_registry_lines(text: &str, delimiter: char) -> RegistryLoad {
    let mut load = RegistryLoad::default();
    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(delimiter) {
            Some((id, name)) => load.entries.push(RegistryEntry::new(id, name)),
            None => load.dropped += 1,
        }
    }
    load
}

fn read_registry_table(path: &Path, delimiter: char) -> Result<RegistryLoad> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter_byte(delimiter)?)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    }
    let Some(columns) = detect_registry_columns(&headers) else {
        return Err(IngestError::missing_column("supplier id/name", path, &headers));
    };
    debug!(
        id_column = %headers[columns.id],
        name_column = %headers[columns.name],
        "registry columns detected"
    );

    let mut load = RegistryLoad::default();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let id = record.get(columns.id).map(str::trim).unwrap_or_default();
        let name = record.get(columns.name).map(str::trim).unwrap_or_default();
        if id.is_empty() || name.is_empty() {
            load.dropped += 1;
            continue;
        }
        load.entries.push(RegistryEntry::new(id, name));
    }
    Ok(load)
}

/// Byte form of a table delimiter; the csv reader only splits on ASCII bytes.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidDelimiter { delimiter })
}
