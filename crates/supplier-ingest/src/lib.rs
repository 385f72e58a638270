//! Registry and ledger I/O around the supplier resolver.

#![deny(unsafe_code)]

pub mod columns;
pub mod error;
pub mod ledger;
pub mod registry;

pub use columns::{
    RegistryColumns, delimiter_for_path, detect_registry_columns, find_column, normalize_header,
    normalize_text,
};
pub use error::{IngestError, Result};
pub use ledger::{
    DEFAULT_CODE_COLUMN, DEFAULT_SUPPLIER_COLUMN, LedgerOptions, LedgerTable, default_output_path,
    read_ledger, write_ledger,
};
pub use registry::{
    RegistryFormat, RegistryLoad, RegistryOptions, parse_registry_lines, read_registry,
};
