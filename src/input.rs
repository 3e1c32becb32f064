use std::collections::HashSet;
use std::path::Path;

use crate::error::ExtractError;
use crate::model::PageResult;
use crate::options::PageSelection;

/// Checks page numbering and returns the pages ordered by page number.
pub fn validate_pages(mut pages: Vec<PageResult>) -> Result<Vec<PageResult>, ExtractError> {
    let mut seen = HashSet::new();
    for page in &pages {
        if page.page_number == 0 {
            return Err(ExtractError::InvalidPageNumber(page.page_number));
        }
        if !seen.insert(page.page_number) {
            return Err(ExtractError::DuplicatePage(page.page_number));
        }
    }

    pages.sort_by_key(|page| page.page_number);
    Ok(pages)
}

/// Parses a JSON array of page results as produced by the recognition engine.
pub fn load_pages_from_str(json: &str) -> Result<Vec<PageResult>, ExtractError> {
    let pages: Vec<PageResult> = serde_json::from_str(json)?;
    validate_pages(pages)
}

pub fn load_pages_from_path(path: &Path) -> Result<Vec<PageResult>, ExtractError> {
    let json = std::fs::read_to_string(path)?;
    load_pages_from_str(&json)
}

pub fn select_pages(
    pages: Vec<PageResult>,
    selection: Option<&PageSelection>,
) -> Result<Vec<PageResult>, ExtractError> {
    let Some(selection) = selection else {
        return Ok(pages);
    };

    let selected = pages
        .into_iter()
        .filter(|page| selection.contains(page.page_number))
        .collect::<Vec<_>>();
    if selected.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }
    Ok(selected)
}
