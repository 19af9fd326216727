use thiserror::Error;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to read roster {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid {field} selector `{selector}`: {reason}")]
    Selector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Per-participant failures. The participant is skipped and the run continues.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch profile {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status code {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to parse HTML from {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl ScrapeError {
    pub fn url(&self) -> &str {
        match self {
            ScrapeError::Fetch { url, .. }
            | ScrapeError::Status { url, .. }
            | ScrapeError::Parse { url, .. } => url,
        }
    }
}
