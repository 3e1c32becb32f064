mod csv_out;
mod error;
mod filter;
mod input;
mod json_out;
mod key_value;
mod model;
mod options;
mod recognition;
mod rows;
mod table_detect;
mod table_parse;
mod text_out;
mod warning;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::table_detect::detect_tables;
use crate::warning::WarningCode;

pub use csv_out::{CsvExport, csv_exports, key_values_to_csv, table_to_csv, write_csv_exports};
pub use error::ExtractError;
pub use filter::filter_by_confidence;
pub use input::{load_pages_from_path, load_pages_from_str, select_pages, validate_pages};
pub use json_out::{clipboard_payload, to_json};
pub use key_value::{detect_key_value_pairs, parse_key_value};
pub use model::{
    BoundingBox, DetectedTable, ExtractedData, KeyValuePair, Line, PageResult, TableCell,
    TableRow, Word,
};
pub use options::{CopyMode, ExportFormat, ExtractOptions, PageSelection};
pub use recognition::{PageRecognizer, RecognitionProgress, recognize_document};
pub use rows::{RowGroup, group_line_refs, group_lines_by_vertical_position};
pub use table_detect::find_table_regions;
pub use table_parse::{construct_table_from_region, detect_column_positions};
pub use text_out::{render_table_grid, to_plain_text};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub page_count: usize,
    pub table_count: usize,
    pub key_value_count: usize,
    pub warnings: Vec<ExtractWarning>,
}

fn collect_page_texts(pages: &[&PageResult]) -> (String, BTreeMap<u32, String>) {
    let all_text = pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let page_texts = pages
        .iter()
        .map(|page| (page.page_number, page.text.clone()))
        .collect();
    (all_text, page_texts)
}

fn extract_from_pages(
    pages: &[PageResult],
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> ExtractedData {
    let mut ordered = pages.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|page| page.page_number);

    for page in ordered.iter().filter(|page| page.lines.is_empty()) {
        warnings.push(
            ExtractWarning::new(WarningCode::EmptyPage, "page has no recognized lines")
                .with_page(page.page_number),
        );
    }

    let tables = detect_tables(ordered.iter().copied(), options, warnings);
    let key_value_pairs = detect_key_value_pairs(ordered.iter().copied());
    let (all_text, page_texts) = collect_page_texts(&ordered);

    debug!(
        pages = ordered.len(),
        tables = tables.len(),
        key_value_pairs = key_value_pairs.len(),
        "structural extraction finished"
    );

    ExtractedData {
        tables,
        key_value_pairs,
        all_text,
        page_texts,
    }
}

/// Derives tables, key-value pairs and the transcript from recognized pages.
///
/// Pure and infallible: empty or malformed input yields empty collections.
/// Page selection and confidence filtering are not applied here; see
/// [`extract_with_report`].
#[must_use]
pub fn extract_structured_data(pages: &[PageResult], options: &ExtractOptions) -> ExtractedData {
    extract_from_pages(pages, options, &mut Vec::new())
}

/// Full pipeline: option validation, page selection, extraction and the
/// optional confidence filter, plus a report of non-fatal findings.
pub fn extract_with_report(
    pages: Vec<PageResult>,
    options: &ExtractOptions,
) -> Result<(ExtractedData, ExtractionReport), ExtractError> {
    options.validate()?;
    let pages = select_pages(pages, options.pages.as_ref())?;
    if pages.is_empty() {
        warn!("extraction called without any pages");
    }

    let mut warnings = Vec::new();
    let mut data = extract_from_pages(&pages, options, &mut warnings);
    if let Some(min_confidence) = options.min_confidence {
        data = filter_by_confidence(&data, min_confidence);
    }

    if data.artifact_count() == 0 {
        warnings.push(ExtractWarning::new(
            WarningCode::NoStructuredData,
            "no tables or key-value pairs were detected",
        ));
    }

    let report = ExtractionReport {
        page_count: pages.len(),
        table_count: data.tables.len(),
        key_value_count: data.key_value_pairs.len(),
        warnings,
    };
    Ok((data, report))
}

/// Writes `data` to `dir` in the requested format and returns the created files.
pub fn write_export(
    dir: &Path,
    data: &ExtractedData,
    name: &str,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExtractError> {
    let contents = match format {
        ExportFormat::Csv => return write_csv_exports(dir, data, name),
        ExportFormat::Json => to_json(data)?,
        ExportFormat::Text => to_plain_text(data),
    };
    let extension = if format == ExportFormat::Json {
        "json"
    } else {
        "txt"
    };

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}_extracted.{extension}"));
    std::fs::write(&path, contents)?;
    Ok(vec![path])
}
