//! Header normalization and column detection.
//!
//! Registry tables come from different exports, so the id and name columns
//! are located by fuzzy comparison against known header labels (Jaro-Winkler
//! on normalized text), then by substring heuristics. Ledger columns are
//! located by name, ignoring case and separators.

use std::path::Path;

use rapidfuzz::distance::jaro_winkler;
use tracing::warn;

/// Minimum Jaro-Winkler similarity for a header to count as a label match.
const MIN_HEADER_SIMILARITY: f64 = 0.88;

/// Header labels seen on registry id columns.
pub const REGISTRY_ID_LABELS: &[&str] = &[
    "id pembekal",
    "kod pembekal",
    "supplier id",
    "supplier code",
    "vendor id",
    "id",
    "code",
];

/// Header labels seen on registry name columns.
pub const REGISTRY_NAME_LABELS: &[&str] = &[
    "nama pembekal",
    "supplier name",
    "vendor name",
    "nama",
    "name",
];

const ID_FRAGMENTS: &[&str] = &["id", "code", "kod"];
const NAME_FRAGMENTS: &[&str] = &["name", "nama"];

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims whitespace and a leading byte-order mark from a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Position of `wanted` in `headers`: exact first, then ignoring case and separators.
pub fn find_column(headers: &[String], wanted: &str) -> Option<usize> {
    if let Some(idx) = headers.iter().position(|h| h == wanted) {
        return Some(idx);
    }
    let wanted = normalize_text(wanted);
    headers.iter().position(|h| normalize_text(h) == wanted)
}

/// Id and name column positions of a registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryColumns {
    pub id: usize,
    pub name: usize,
}

/// Locates the id and name columns of a registry header row.
///
/// The id column is chosen first; the name column is then chosen among the
/// remaining headers. Returns `None` when either role cannot be filled.
pub fn detect_registry_columns(headers: &[String]) -> Option<RegistryColumns> {
    let id = best_label_match(headers, REGISTRY_ID_LABELS, None).or_else(|| {
        fragment_match(headers, ID_FRAGMENTS, None)
            .inspect(|&idx| warn_guessed("id", &headers[idx]))
    })?;
    let name = best_label_match(headers, REGISTRY_NAME_LABELS, Some(id)).or_else(|| {
        fragment_match(headers, NAME_FRAGMENTS, Some(id))
            .inspect(|&idx| warn_guessed("name", &headers[idx]))
    })?;
    Some(RegistryColumns { id, name })
}

fn best_label_match(headers: &[String], labels: &[&str], exclude: Option<usize>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, header) in headers.iter().enumerate() {
        if Some(idx) == exclude {
            continue;
        }
        let normalized = normalize_text(header);
        if normalized.is_empty() {
            continue;
        }
        let similarity = labels
            .iter()
            .map(|label| jaro_winkler::similarity(normalized.chars(), label.chars()))
            .fold(0.0_f64, f64::max);
        if similarity >= MIN_HEADER_SIMILARITY && best.is_none_or(|(_, score)| similarity > score) {
            best = Some((idx, similarity));
        }
    }
    best.map(|(idx, _)| idx)
}

fn warn_guessed(role: &str, header: &str) {
    warn!(role, header, "registry column guessed from a header fragment");
}

fn fragment_match(headers: &[String], fragments: &[&str], exclude: Option<usize>) -> Option<usize> {
    headers.iter().enumerate().find_map(|(idx, header)| {
        if Some(idx) == exclude {
            return None;
        }
        let normalized = normalize_text(header);
        let hit = normalized
            .split_whitespace()
            .any(|word| fragments.iter().any(|fragment| word.contains(fragment)));
        hit.then_some(idx)
    })
}

/// Delimiter implied by a file extension: tab for `.tsv`/`.tab`/`.txt`, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    let is_tab_separated = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ["tsv", "tab", "txt"]
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false);
    if is_tab_separated { b'\t' } else { b',' }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn detects_malay_registry_headers() {
        let cols = detect_registry_columns(&headers(&["ID Pembekal", "Nama Pembekal"]));
        assert_eq!(cols, Some(RegistryColumns { id: 0, name: 1 }));
    }

    #[test]
    fn detects_reordered_english_headers() {
        let cols = detect_registry_columns(&headers(&["Supplier_Name", "Region", "Supplier-Code"]));
        assert_eq!(cols, Some(RegistryColumns { id: 2, name: 0 }));
    }

    #[test]
    fn falls_back_to_fragments() {
        let cols = detect_registry_columns(&headers(&["Row", "VendorKod", "Registered Nama Syarikat"]));
        assert_eq!(cols, Some(RegistryColumns { id: 1, name: 2 }));
    }

    #[test]
    fn fails_without_name_column() {
        assert_eq!(detect_registry_columns(&headers(&["ID", "Region"])), None);
    }

    #[test]
    fn find_column_ignores_case() {
        let cols = headers(&["No Aset", "Pembekal", "Kod_Pembekal"]);
        assert_eq!(find_column(&cols, "pembekal"), Some(1));
        assert_eq!(find_column(&cols, "kod pembekal"), Some(2));
        assert_eq!(find_column(&cols, "lokasi"), None);
    }

    #[test]
    fn header_normalization_strips_bom() {
        assert_eq!(normalize_header("\u{feff}ID  Pembekal "), "ID Pembekal");
    }

    #[test]
    fn delimiter_follows_extension() {
        assert_eq!(delimiter_for_path(Path::new("suppliers.TXT")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("ledger.tsv")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("ledger.csv")), b',');
        assert_eq!(delimiter_for_path(Path::new("ledger")), b',');
    }
}
