use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failures raised by a page-access capability. All of them are recoverable
/// at item or category granularity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("Navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No document loaded")]
    NoDocument,
}

impl PageError {
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        PageError::ElementNotFound {
            selector: selector.into(),
        }
    }

    pub fn navigation(url: &Url, reason: impl ToString) -> Self {
        PageError::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    #[error("Unparseable value for {field}: {value:?}")]
    UnparseableValue { field: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionCause {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Page(#[from] PageError),
}

/// Names the first field (in record declaration order) that could not be
/// extracted from a detail view.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Extraction of '{field}' failed: {cause}")]
pub struct ExtractionError {
    pub field: &'static str,
    pub cause: ExtractionCause,
}

impl ExtractionError {
    pub fn new(field: &'static str, cause: impl Into<ExtractionCause>) -> Self {
        Self {
            field,
            cause: cause.into(),
        }
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(
            self.cause,
            ExtractionCause::Field(FieldError::MissingField { .. })
        )
    }
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Root page could not be loaded: {0}")]
    RootLoadFailure(String),

    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XLSX error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

pub type ScraperResult<T> = Result<T, ScraperError>;
