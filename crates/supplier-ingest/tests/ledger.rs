use std::fs;
use std::path::PathBuf;

use supplier_ingest::{IngestError, LedgerOptions, read_ledger, write_ledger};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn appends_code_column_when_missing() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "aset.csv",
        "No Aset,Pembekal,Harga\nA-1,ABC SDN BHD,100\nA-2,,50\n",
    );
    let table = read_ledger(&path, &LedgerOptions::default()).expect("read ledger");
    assert_eq!(table.headers, vec!["No Aset", "Pembekal", "Harga", "kod_pembekal"]);
    assert_eq!(table.supplier_column, 1);
    assert_eq!(table.code_column, 3);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].supplier_name(), Some("ABC SDN BHD"));
    assert_eq!(table.rows[1].supplier_name(), None);
    assert_eq!(table.rows[0].cells, vec!["A-1", "ABC SDN BHD", "100", ""]);
}

#[test]
fn write_back_preserves_columns_and_fills_codes() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(
        &dir,
        "aset.csv",
        "No Aset,pembekal,kod_pembekal,Lokasi\nA-1,\"ACER SALES & SERVICES, SDN BHD\",OLD,Kuching\nA-2,Unknown Corp,,Miri\n",
    );
    let options = LedgerOptions::default();
    let table = read_ledger(&input, &options).expect("read ledger");
    assert_eq!(table.code_column, 2);

    let mut rows = table.rows.clone();
    rows[0].resolved_code = "UP00010".to_string();
    let resolved = table.with_rows(rows);

    let output = dir.path().join("aset_resolved.csv");
    write_ledger(&output, &resolved, &options).expect("write ledger");
    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(
        written,
        "No Aset,pembekal,kod_pembekal,Lokasi\n\
         A-1,\"ACER SALES & SERVICES, SDN BHD\",UP00010,Kuching\n\
         A-2,Unknown Corp,,Miri\n"
    );
}

#[test]
fn tab_separated_ledger_by_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "aset.tsv", "pembekal\tkod_pembekal\nDG SOLUTION\t\n");
    let table = read_ledger(&path, &LedgerOptions::default()).expect("read ledger");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].supplier_name(), Some("DG SOLUTION"));
}

#[test]
fn custom_column_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "ledger.csv", "Vendor,Vendor Code\nACME,\n");
    let options = LedgerOptions {
        supplier_column: "vendor".to_string(),
        code_column: "vendor_code".to_string(),
        delimiter: None,
    };
    let table = read_ledger(&path, &options).expect("read ledger");
    assert_eq!(table.supplier_header(), "Vendor");
    assert_eq!(table.code_header(), "Vendor Code");
}

#[test]
fn missing_supplier_column_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "aset.csv", "No Aset,Lokasi\nA-1,Kuching\n");
    let err = read_ledger(&path, &LedgerOptions::default()).expect_err("missing column");
    match err {
        IngestError::MissingColumn { column, available, .. } => {
            assert_eq!(column, "pembekal");
            assert_eq!(available, "No Aset, Lokasi");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_ledger_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "aset.csv", "");
    let err = read_ledger(&path, &LedgerOptions::default()).expect_err("empty file");
    assert!(matches!(err, IngestError::Empty { .. }));
}

#[test]
fn write_back_keeps_blank_and_ragged_rows() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(
        &dir,
        "aset.csv",
        "No,pembekal,Lokasi\nA-1,ABC,Kuching\n,,\nA-3,XYZ,Miri,Rak 4\nA-4,DEF\n",
    );
    let options = LedgerOptions::default();
    let table = read_ledger(&input, &options).expect("read ledger");
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[1].supplier_name(), None);
    assert_eq!(table.rows[2].cells, vec!["A-3", "XYZ", "Miri", "", "Rak 4"]);

    let mut rows = table.rows.clone();
    rows[0].resolved_code = "UP001".to_string();
    rows[2].resolved_code = "UP002".to_string();
    let output = dir.path().join("aset_resolved.csv");
    write_ledger(&output, &table.with_rows(rows), &options).expect("write ledger");

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "No,pembekal,Lokasi,kod_pembekal\n\
         A-1,ABC,Kuching,UP001\n\
         ,,,\n\
         A-3,XYZ,Miri,UP002,Rak 4\n\
         A-4,DEF,,\n"
    );
}

#[test]
fn write_back_keeps_header_text_as_read() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "aset.csv", "No  Aset , pembekal\nA-1,ABC\n");
    let options = LedgerOptions::default();
    let table = read_ledger(&input, &options).expect("read ledger");
    assert_eq!(table.supplier_column, 1);

    let output = dir.path().join("aset_resolved.csv");
    write_ledger(&output, &table, &options).expect("write ledger");

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "No  Aset , pembekal,kod_pembekal\nA-1,ABC,\n"
    );
}

#[test]
fn non_ascii_delimiter_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "aset.txt", "No¦pembekal\nA-1¦ABC\n");
    let options = LedgerOptions {
        delimiter: Some('¦'),
        ..LedgerOptions::default()
    };
    let err = read_ledger(&path, &options).expect_err("non-ascii delimiter");
    assert!(matches!(err, IngestError::InvalidDelimiter { delimiter: '¦' }));
}
