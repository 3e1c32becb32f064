//! Seam to the OCR engine that produces [`PageResult`]s.
//!
//! Recognition itself lives outside this crate. The driver here only fixes
//! the ordering contract: pages are recognized one at a time in increasing
//! page order, and progress is reported once per finished page.

use tracing::debug;

use crate::error::ExtractError;
use crate::model::PageResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionProgress {
    pub page_number: u32,
    pub total_pages: u32,
}

pub trait PageRecognizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn page_count(&self) -> u32;

    /// Recognizes one 1-based page.
    fn recognize_page(&mut self, page_number: u32) -> Result<PageResult, Self::Error>;
}

/// Recognizes every page in order, stopping at the first failure.
pub fn recognize_document<R, F>(
    recognizer: &mut R,
    mut on_progress: F,
) -> Result<Vec<PageResult>, ExtractError>
where
    R: PageRecognizer,
    F: FnMut(RecognitionProgress),
{
    let total_pages = recognizer.page_count();
    let mut pages = Vec::with_capacity(total_pages as usize);

    for page_number in 1..=total_pages {
        let mut page =
            recognizer
                .recognize_page(page_number)
                .map_err(|error| ExtractError::Recognition {
                    page: page_number,
                    source: Box::new(error),
                })?;
        page.page_number = page_number;
        debug!(
            page = page_number,
            lines = page.lines.len(),
            "page recognized"
        );
        pages.push(page);
        on_progress(RecognitionProgress {
            page_number,
            total_pages,
        });
    }

    Ok(pages)
}
