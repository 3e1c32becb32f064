use serde::Serialize;

use crate::error::ExtractError;
use crate::model::{BoundingBox, DetectedTable, ExtractedData, KeyValuePair};
use crate::options::CopyMode;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableExport<'a> {
    id: &'a str,
    page_number: u32,
    row_count: usize,
    column_count: usize,
    bbox: BoundingBox,
    data: Vec<Vec<String>>,
}

impl<'a> From<&'a DetectedTable> for TableExport<'a> {
    fn from(table: &'a DetectedTable) -> Self {
        Self {
            id: &table.id,
            page_number: table.page_number,
            row_count: table.row_count,
            column_count: table.column_count,
            bbox: table.bbox,
            data: table.text_grid(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageTextExport<'a> {
    page: u32,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentExport<'a> {
    tables: Vec<TableExport<'a>>,
    key_value_pairs: &'a [KeyValuePair],
    all_text: &'a str,
    page_texts: Vec<PageTextExport<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClipboardExport<'a> {
    tables: &'a [DetectedTable],
    key_value_pairs: &'a [KeyValuePair],
    all_text: &'a str,
}

/// Pretty-printed JSON export with each table flattened to its text grid.
pub fn to_json(data: &ExtractedData) -> Result<String, ExtractError> {
    let export = DocumentExport {
        tables: data.tables.iter().map(TableExport::from).collect(),
        key_value_pairs: &data.key_value_pairs,
        all_text: &data.all_text,
        page_texts: data
            .page_texts
            .iter()
            .map(|(page, text)| PageTextExport { page: *page, text })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Text to place on the clipboard; the caller owns the clipboard itself.
pub fn clipboard_payload(data: &ExtractedData, mode: CopyMode) -> Result<String, ExtractError> {
    match mode {
        CopyMode::Text => Ok(data.all_text.clone()),
        CopyMode::Json => Ok(serde_json::to_string_pretty(&ClipboardExport {
            tables: &data.tables,
            key_value_pairs: &data.key_value_pairs,
            all_text: &data.all_text,
        })?),
    }
}
