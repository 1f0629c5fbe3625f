use gh_stars::error::{FetchFailure, Result, StarsError};
use std::error::Error;

#[test]
fn test_error_display() {
    let error = StarsError::RateLimitExceeded("Rate limit hit".to_string());
    assert_eq!(format!("{}", error), "Rate limit exceeded: Rate limit hit");

    let error = StarsError::NotFound("Repo not found".to_string());
    assert_eq!(format!("{}", error), "Resource not found: Repo not found");

    let error = StarsError::ApiError("API failed".to_string());
    assert_eq!(format!("{}", error), "GitHub API error: API failed");

    let error = StarsError::TooManyPages { pages: 412, max: 400 };
    assert_eq!(format!("{}", error), "Too many pages to fetch: 412 pages (limit 400)");
}

#[test]
fn test_page_fetch_wraps_source() {
    let error = StarsError::PageFetch {
        page: 7,
        source: Box::new(StarsError::AuthError("Forbidden".to_string())),
    };

    assert_eq!(
        error.to_string(),
        "Error fetching stargazers page 7: Authentication error: Forbidden"
    );
    assert_eq!(error.page(), Some(7));
    assert!(error.is_transport());
    assert!(error.source().is_some());
}

#[test]
fn test_error_source() {
    let error = StarsError::RateLimitExceeded("Rate limit hit".to_string());
    assert!(error.source().is_none());
    assert_eq!(error.page(), None);
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: StarsError = io_error.into();
    assert!(matches!(error, StarsError::IoError(_)));

    let json_error = serde_json::from_str::<u32>("\"x\"").unwrap_err();
    let error: StarsError = json_error.into();
    assert!(matches!(error, StarsError::MalformedData(_)));
    assert!(!error.is_transport());
}

#[test]
fn test_fetch_failure_from_error() {
    let failure: FetchFailure = StarsError::TooManyPages { pages: 400, max: 400 }.into();
    assert!(failure.partial.is_empty());
    assert_eq!(failure.to_string(), "Too many pages to fetch: 400 pages (limit 400)");
    assert!(failure.source().is_some());
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");

    fn returns_error() -> Result<String> {
        Err(StarsError::NoRepository)
    }

    let result = returns_error();
    assert!(result.is_err());
}
