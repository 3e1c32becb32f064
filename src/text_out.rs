use std::fmt::Write as _;

use crate::model::{DetectedTable, ExtractedData};

const MAX_CELL_CHARS: usize = 50;

fn truncate_cell(text: &str) -> String {
    text.chars().take(MAX_CELL_CHARS).collect()
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line
}

fn grid_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &width) in cells.iter().zip(widths) {
        let _ = write!(line, " {cell:<width$} |");
    }
    line
}

/// Renders a table as a fixed-width ASCII grid with the first row as header.
pub fn render_table_grid(table: &DetectedTable) -> String {
    let grid = table
        .text_grid()
        .into_iter()
        .map(|row| row.iter().map(|cell| truncate_cell(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let widths = (0..table.column_count)
        .map(|col| {
            grid.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let mut lines = vec![border(&widths, '-')];
    for (index, row) in grid.iter().enumerate() {
        lines.push(grid_row(row, &widths));
        if index == 0 {
            lines.push(border(&widths, '='));
        }
    }
    if grid.len() > 1 {
        lines.push(border(&widths, '-'));
    }
    lines.join("\n")
}

/// Plain-text report: key-value pairs, then tables, then the full transcript.
pub fn to_plain_text(data: &ExtractedData) -> String {
    let mut out = String::new();

    if !data.key_value_pairs.is_empty() {
        out.push_str("=== KEY-VALUE PAIRS ===\n");
        for pair in &data.key_value_pairs {
            let _ = writeln!(
                out,
                "{}: {} (Page {}, Confidence: {:.1}%)",
                pair.key, pair.value, pair.page_number, pair.confidence
            );
        }
        out.push('\n');
    }

    if !data.tables.is_empty() {
        out.push_str("=== TABLES ===\n");
        for (index, table) in data.tables.iter().enumerate() {
            let _ = writeln!(
                out,
                "Table {} (Page {}, {} rows x {} columns)",
                index + 1,
                table.page_number,
                table.row_count,
                table.column_count
            );
            out.push_str(&render_table_grid(table));
            out.push_str("\n\n");
        }
    }

    out.push_str("=== FULL TEXT ===\n");
    out.push_str(&data.all_text);
    if !data.all_text.ends_with('\n') {
        out.push('\n');
    }
    out
}
