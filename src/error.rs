use thiserror::Error;

use crate::types::StarEvent;

#[derive(Error, Debug)]
pub enum StarsError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid repository: {0}")]
    InvalidRepo(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedData(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    EnvError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Too many pages to fetch: {pages} pages (limit {max})")]
    TooManyPages { pages: u32, max: u32 },

    #[error("Error fetching stargazers page {page}: {source}")]
    PageFetch {
        page: u32,
        #[source]
        source: Box<StarsError>,
    },

    #[error("no repository specified")]
    NoRepository,
}

impl StarsError {
    /// True for failures talking to the remote: network, auth, rate limit and status errors.
    pub fn is_transport(&self) -> bool {
        match self {
            StarsError::ApiError(_)
            | StarsError::RateLimitExceeded(_)
            | StarsError::NetworkError(_)
            | StarsError::AuthError(_)
            | StarsError::NotFound(_) => true,
            StarsError::PageFetch { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// Page number of the failed request, if this error came out of a paginated fetch.
    pub fn page(&self) -> Option<u32> {
        match self {
            StarsError::PageFetch { page, .. } => Some(*page),
            _ => None,
        }
    }
}

/// A paginated fetch that did not complete. `partial` holds whatever pages
/// arrived before the failing ones, in completion order.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct FetchFailure {
    pub partial: Vec<StarEvent>,
    #[source]
    pub error: StarsError,
}

impl From<StarsError> for FetchFailure {
    fn from(error: StarsError) -> Self {
        FetchFailure { partial: Vec::new(), error }
    }
}

pub type Result<T> = std::result::Result<T, StarsError>;
