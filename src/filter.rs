use crate::model::{DetectedTable, ExtractedData, TableRow};

/// Drops table cells and key-value pairs recognized below `min_confidence`.
///
/// Tables keep their shell (`row_count`, `column_count`, every row) even
/// when all of their cells are filtered away. The transcript is untouched.
#[must_use]
pub fn filter_by_confidence(data: &ExtractedData, min_confidence: f32) -> ExtractedData {
    let tables = data
        .tables
        .iter()
        .map(|table| DetectedTable {
            rows: table
                .rows
                .iter()
                .map(|row| TableRow {
                    row_index: row.row_index,
                    cells: row
                        .cells
                        .iter()
                        .filter(|cell| cell.confidence >= min_confidence)
                        .cloned()
                        .collect(),
                })
                .collect(),
            ..table.clone()
        })
        .collect();

    let key_value_pairs = data
        .key_value_pairs
        .iter()
        .filter(|pair| pair.confidence >= min_confidence)
        .cloned()
        .collect();

    ExtractedData {
        tables,
        key_value_pairs,
        all_text: data.all_text.clone(),
        page_texts: data.page_texts.clone(),
    }
}
