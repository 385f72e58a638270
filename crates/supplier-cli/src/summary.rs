use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use supplier_match::{BatchSummary, MatchStage};

use crate::report::RunReport;

pub fn print_report(report: &RunReport, details: bool) {
    println!("Ledger: {}", report.source);
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    println!(
        "Registry: {} entries, {} keys ({} shared), {} skipped",
        report.registry.entries,
        report.registry.keys,
        report.registry.shared_keys,
        report.registry.dropped
    );
    println!(
        "Matching: {} scorer, threshold {}",
        report.config.scorer, report.config.threshold
    );
    println!("{}", summary_table(&report.summary));
    if details {
        println!("{}", rows_table(report));
    } else if report.summary.unresolved() > 0 {
        println!("{}", unresolved_table(report));
    }
}

/// Per-stage counts with a resolved total.
pub fn summary_table(summary: &BatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let counts = [
        ("exact", summary.exact, Color::Green),
        ("approximate", summary.approximate, Color::Yellow),
        ("rejected", summary.rejected, Color::Red),
        ("unmatched", summary.unmatched, Color::Red),
        ("blank", summary.blank, Color::DarkGrey),
    ];
    for (label, count, color) in counts {
        let count_cell = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count).fg(color)
        };
        table.add_row(vec![Cell::new(label), count_cell]);
    }
    table.add_row(vec![
        Cell::new("RESOLVED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} / {}", summary.resolved(), summary.total))
            .add_attribute(Attribute::Bold),
    ]);
    table
}

/// One row per ledger row: supplier, code, stage, score, best candidate.
pub fn rows_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&report.supplier_header),
        header_cell(&report.code_header),
        header_cell("Stage"),
        header_cell("Score"),
        header_cell("Candidate"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in &report.rows {
        table.add_row(row_cells(
            row.supplier.as_deref(),
            &row.resolution.code,
            &row.resolution.stage,
            row.resolution.candidate.as_deref(),
        ));
    }
    table
}

fn unresolved_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&report.supplier_header),
        header_cell("Stage"),
        header_cell("Best score"),
        header_cell("Candidate"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in report.unresolved() {
        let mut cells = row_cells(
            row.supplier.as_deref(),
            "",
            &row.resolution.stage,
            row.resolution.candidate.as_deref(),
        );
        cells.remove(1);
        table.add_row(cells);
    }
    table
}

/// Plain `supplier | code` listing, one line per row after a header line.
///
/// Missing names and codes print as `-`.
pub fn verification_lines(report: &RunReport) -> String {
    let header = format!("{} | {}\n", report.supplier_header, report.code_header);
    let lines = report.rows.iter().map(|row| {
        let supplier = row.supplier.as_deref().unwrap_or("-");
        let code = if row.resolution.code.is_empty() {
            "-"
        } else {
            row.resolution.code.as_str()
        };
        format!("{supplier} | {code}\n")
    });
    std::iter::once(header).chain(lines).collect()
}

fn row_cells(
    supplier: Option<&str>,
    code: &str,
    stage: &MatchStage,
    candidate: Option<&str>,
) -> Vec<Cell> {
    let supplier_cell = match supplier {
        Some(name) => Cell::new(name),
        None => dim_cell("-"),
    };
    let code_cell = if code.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(code).add_attribute(Attribute::Bold)
    };
    let score_cell = match stage.score() {
        Some(score) => Cell::new(format!("{score:.0}")),
        None => dim_cell("-"),
    };
    vec![
        supplier_cell,
        code_cell,
        stage_cell(stage),
        score_cell,
        candidate.map_or_else(|| dim_cell("-"), dim_cell),
    ]
}

fn stage_cell(stage: &MatchStage) -> Cell {
    let color = match stage {
        MatchStage::Exact => Color::Green,
        MatchStage::Approximate { .. } => Color::Yellow,
        MatchStage::Rejected { .. } | MatchStage::Unmatched => Color::Red,
        MatchStage::Blank => Color::DarkGrey,
    };
    Cell::new(stage.label()).fg(color)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
