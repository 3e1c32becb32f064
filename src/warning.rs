use std::fmt;

/// Non-fatal findings of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    /// The page carried no recognized lines.
    EmptyPage,
    /// A run of aligned rows resolved into fewer than the minimum columns.
    RegionRejected,
    LowConfidence,
    NoStructuredData,
}

impl WarningCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPage => "empty-page",
            Self::RegionRejected => "region-rejected",
            Self::LowConfidence => "low-confidence",
            Self::NoStructuredData => "no-structured-data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub page: Option<u32>,
    pub table_id: Option<String>,
    pub confidence: Option<f32>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            page: None,
            table_id: None,
            confidence: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = Some(table_id.into());
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code.as_str())?;
        if let Some(page) = self.page {
            write!(f, " page {page}")?;
        }
        if let Some(table_id) = &self.table_id {
            write!(f, " {table_id}")?;
        }
        if let Some(confidence) = self.confidence {
            write!(f, " ({confidence:.1}%)")?;
        }
        write!(f, ": {}", self.message)
    }
}
