use std::env;
use std::str::FromStr;

use url::Url;

use crate::error::{Result, StarsError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Runtime settings shared by the fetcher and the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Initial time window in days, also the floor for narrowing
    pub window_days: u32,
    /// Stargazers requested per page
    pub page_size: u32,
    /// Page count at which a fetch is refused outright
    pub max_pages: u32,
    /// Use ceiling division when planning pages, so the last partial page is fetched
    pub round_up_pages: bool,
    pub api_url: Url,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: 30,
            page_size: 100,
            max_pages: 400,
            round_up_pages: false,
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            token: None,
        }
    }
}

impl Config {
    /// Defaults overridden by `GH_STARS_*` variables, plus a token from
    /// `GH_TOKEN` or `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(days) = parse_var::<u32>(&lookup, "GH_STARS_WINDOW_DAYS")? {
            if days == 0 {
                return Err(StarsError::EnvError("GH_STARS_WINDOW_DAYS must be greater than 0".to_string()));
            }
            config.window_days = days;
        }
        if let Some(size) = parse_var::<u32>(&lookup, "GH_STARS_PAGE_SIZE")? {
            if size == 0 {
                return Err(StarsError::EnvError("GH_STARS_PAGE_SIZE must be greater than 0".to_string()));
            }
            config.page_size = size;
        }
        if let Some(max) = parse_var::<u32>(&lookup, "GH_STARS_MAX_PAGES")? {
            config.max_pages = max;
        }
        if let Some(round_up) = parse_var::<bool>(&lookup, "GH_STARS_ROUND_UP_PAGES")? {
            config.round_up_pages = round_up;
        }
        if let Some(raw) = lookup("GH_STARS_API_URL") {
            config.api_url = Url::parse(&raw)
                .map_err(|e| StarsError::EnvError(format!("GH_STARS_API_URL: {}", e)))?;
        }

        config.token = lookup("GH_TOKEN")
            .or_else(|| lookup("GITHUB_TOKEN"))
            .filter(|t| !t.trim().is_empty());

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| StarsError::EnvError(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(None),
    }
}
