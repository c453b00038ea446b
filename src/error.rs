use crate::browser::BrowserError;

/// Errors surfaced by the scraping pipeline
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Record '{0}' has no application number to search for")]
    MissingApplicationNumber(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
