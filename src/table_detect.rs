use tracing::debug;

use crate::model::{DetectedTable, Line, PageResult};
use crate::options::ExtractOptions;
use crate::rows::{RowGroup, group_lines_by_vertical_position};
use crate::table_parse::construct_table_from_region;
use crate::warning::{ExtractWarning, WarningCode};

fn looks_multi_column(group: &RowGroup<'_>, min_words_single_line: usize) -> bool {
    match group.as_slice() {
        [] => false,
        [single] => single.words.len() >= min_words_single_line,
        _ => true,
    }
}

#[derive(Default)]
struct RegionScan<'a> {
    regions: Vec<Vec<&'a Line>>,
    candidate: Vec<&'a Line>,
    candidate_rows: usize,
}

impl<'a> RegionScan<'a> {
    fn close(mut self, min_rows: usize) -> Self {
        if self.candidate_rows >= min_rows {
            self.regions.push(std::mem::take(&mut self.candidate));
        } else {
            self.candidate.clear();
        }
        self.candidate_rows = 0;
        self
    }
}

/// Splits a page's row groups into runs that look tabular.
///
/// Consecutive multi-column rows accumulate into a candidate; any other row
/// closes it. Only candidates spanning at least `min_table_rows` row groups
/// are kept, the rest are treated as incidental alignment.
pub fn find_table_regions<'a>(
    groups: &[RowGroup<'a>],
    options: &ExtractOptions,
) -> Vec<Vec<&'a Line>> {
    groups
        .iter()
        .fold(RegionScan::default(), |mut scan, group| {
            if looks_multi_column(group, options.min_words_single_line) {
                scan.candidate.extend(group.iter().copied());
                scan.candidate_rows += 1;
                scan
            } else {
                scan.close(options.min_table_rows)
            }
        })
        .close(options.min_table_rows)
        .regions
}

/// Detects tables on one page, numbering them from `first_index`.
pub(crate) fn detect_tables_in_page(
    page: &PageResult,
    first_index: usize,
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<DetectedTable> {
    let groups = group_lines_by_vertical_position(&page.lines, options.row_tolerance);
    let regions = find_table_regions(&groups, options);
    debug!(
        page = page.page_number,
        rows = groups.len(),
        regions = regions.len(),
        "scanned page for table regions"
    );

    let mut tables = Vec::new();
    for region in regions {
        let table_id = format!("table-{}", first_index + tables.len());
        match construct_table_from_region(&region, page.page_number, table_id, options) {
            Some(table) => tables.push(table),
            None => {
                let reason = if region.len() < 2 {
                    "tabular-looking region has fewer than two lines"
                } else {
                    "tabular-looking region did not resolve into enough columns"
                };
                debug!(
                    page = page.page_number,
                    lines = region.len(),
                    reason,
                    "rejected table region"
                );
                warnings.push(
                    ExtractWarning::new(WarningCode::RegionRejected, reason)
                        .with_page(page.page_number),
                );
            }
        }
    }

    tables
}

/// Runs table detection over every page, ids increasing across pages.
pub(crate) fn detect_tables<'a>(
    pages: impl IntoIterator<Item = &'a PageResult>,
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<DetectedTable> {
    let mut tables = Vec::new();
    for page in pages {
        let found = detect_tables_in_page(page, tables.len(), options, warnings);
        tables.extend(found);
    }

    for table in &tables {
        let confidence = table.mean_confidence();
        if confidence < options.low_confidence_threshold {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::LowConfidence,
                    "table cells were recognized with low confidence",
                )
                .with_page(table.page_number)
                .with_table_id(table.id.clone())
                .with_confidence(confidence),
            );
        }
    }

    tables
}
