use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!(
                "unknown export format '{other}', expected csv, json or text"
            )),
        }
    }
}

/// What goes on the clipboard: the bare transcript or the structured dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Text,
    Json,
}

impl FromStr for CopyMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown copy mode '{other}', expected text or json")),
        }
    }
}

/// A set of 1-based page numbers parsed from input like `1-3,5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn parse_page_number(raw: &str) -> Result<u32, ExtractError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(ExtractError::InvalidPageSelection(
            "page numbers start at 1".to_string(),
        )),
        Ok(page) => Ok(page),
        Err(_) => Err(ExtractError::InvalidPageSelection(format!(
            "'{}' is not a page number",
            raw.trim()
        ))),
    }
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            let Some((first, last)) = token.split_once('-') else {
                pages.insert(parse_page_number(token)?);
                continue;
            };
            let (first, last) = (parse_page_number(first)?, parse_page_number(last)?);
            if last < first {
                return Err(ExtractError::InvalidPageSelection(format!(
                    "range '{token}' runs backwards"
                )));
            }
            pages.extend(first..=last);
        }

        if pages.is_empty() {
            return Err(ExtractError::InvalidPageSelection(
                "no pages given".to_string(),
            ));
        }
        Ok(Self { pages })
    }
}

/// Tunables for one extraction run.
///
/// The geometric thresholds are in pixels at the recognition engine's
/// working resolution and were tuned on typical 300 dpi scans; rescale them
/// when feeding results from a different resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    /// Lines whose top edges differ by less than this share a row.
    pub row_tolerance: f32,
    /// Maximum distance between consecutive word starts within one column.
    pub column_gap: f32,
    /// Words may start this far left of a column boundary and still belong to it.
    pub column_left_bias: f32,
    pub min_table_rows: usize,
    pub min_columns: usize,
    /// A lone line needs at least this many words to look columnar.
    pub min_words_single_line: usize,
    pub low_confidence_threshold: f32,
    pub min_confidence: Option<f32>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            row_tolerance: 15.0,
            column_gap: 30.0,
            column_left_bias: 20.0,
            min_table_rows: 3,
            min_columns: 2,
            min_words_single_line: 3,
            low_confidence_threshold: 60.0,
            min_confidence: None,
        }
    }
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if !(self.row_tolerance > 0.0) {
            return Err(ExtractError::InvalidOption(
                "row_tolerance must be positive".to_string(),
            ));
        }
        if !(self.column_gap > 0.0) {
            return Err(ExtractError::InvalidOption(
                "column_gap must be positive".to_string(),
            ));
        }
        if !(self.column_left_bias >= 0.0) {
            return Err(ExtractError::InvalidOption(
                "column_left_bias cannot be negative".to_string(),
            ));
        }
        if self.min_columns < 2 {
            return Err(ExtractError::InvalidOption(
                "min_columns must be at least 2".to_string(),
            ));
        }
        if self.min_table_rows == 0 {
            return Err(ExtractError::InvalidOption(
                "min_table_rows must be at least 1".to_string(),
            ));
        }
        if let Some(min_confidence) = self.min_confidence
            && !(0.0..=100.0).contains(&min_confidence)
        {
            return Err(ExtractError::InvalidOption(format!(
                "min_confidence must be within 0..=100, got {min_confidence}"
            )));
        }
        Ok(())
    }
}
