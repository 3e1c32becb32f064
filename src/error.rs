use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid page selection: {0}")]
    InvalidPageSelection(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid page number {0}: pages are 1-based")]
    InvalidPageNumber(u32),

    #[error("page {0} appears more than once in the recognition results")]
    DuplicatePage(u32),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("recognition failed on page {page}: {source}")]
    Recognition {
        page: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
