use std::future::Future;
use std::time::{Duration, SystemTime};

use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, StarsError};
use crate::repo::RepoId;
use crate::types::{RepoSummary, StarEvent};

/// Media type that makes the stargazers endpoint include `starred_at`.
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";
const MAX_RETRIES: u32 = 3;
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Read-only view of the remote stargazer data.
pub trait StarSource: Send + Sync + 'static {
    fn repository(&self, repo: &RepoId) -> impl Future<Output = Result<RepoSummary>> + Send;

    fn stargazers_page(
        &self,
        repo: &RepoId,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<StarEvent>>> + Send;
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(mut base_url: Url, token: Option<String>) -> Result<Self> {
        // Url::join drops the last segment of a base without a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("gh-stars/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.token.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StarsError::InvalidRepo(format!("{}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut retries = 0;

        loop {
            let mut request = self.client.get(url.clone()).header(ACCEPT, STAR_MEDIA_TYPE);
            if let Some(token) = &self.token {
                request = request.header(AUTHORIZATION, format!("token {}", token));
            }

            debug!(%url, "GET");
            let response = request.send().await?;
            let rate_limit_remaining = header_u64(response.headers(), "X-RateLimit-Remaining");

            match response.status() {
                StatusCode::OK => {
                    if matches!(rate_limit_remaining, Some(r) if r < 10) {
                        warn!(remaining = ?rate_limit_remaining, "Rate limit low");
                    }
                    let body = response.bytes().await?;
                    return Ok(serde_json::from_slice(&body)?);
                }
                StatusCode::NOT_FOUND => {
                    return Err(StarsError::NotFound(format!("Resource not found: {}", url)));
                }
                StatusCode::UNAUTHORIZED => {
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StarsError::AuthError(format!("Unauthorized: {}", error_text)));
                }
                StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                    if rate_limit_remaining == Some(0) {
                        let reset = header_u64(response.headers(), "X-RateLimit-Reset").unwrap_or(0);
                        let reset_time = SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
                        let wait_time = reset_time
                            .duration_since(SystemTime::now())
                            .unwrap_or(Duration::from_secs(0));

                        if wait_time > MAX_RATE_LIMIT_WAIT {
                            return Err(StarsError::RateLimitExceeded(format!(
                                "API rate limit exceeded. Reset in {} seconds",
                                wait_time.as_secs()
                            )));
                        }
                        warn!("Rate limit reached. Waiting {} seconds", wait_time.as_secs() + 1);
                        sleep(wait_time + Duration::from_secs(1)).await;
                        continue;
                    }
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StarsError::AuthError(format!("Forbidden: {}", error_text)));
                }
                status if status.is_server_error() && retries < MAX_RETRIES => {
                    warn!(%status, retries, "Server error, retrying in 2 seconds");
                    sleep(Duration::from_secs(2)).await;
                    retries += 1;
                    continue;
                }
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StarsError::ApiError(format!(
                        "API request failed with status {}: {}",
                        status, error_text
                    )));
                }
            }
        }
    }
}

impl StarSource for GitHubClient {
    async fn repository(&self, repo: &RepoId) -> Result<RepoSummary> {
        let url = self.endpoint(&format!("repos/{}/{}", repo.owner, repo.name))?;
        self.get_json(url).await
    }

    async fn stargazers_page(&self, repo: &RepoId, page: u32, per_page: u32) -> Result<Vec<StarEvent>> {
        let mut url = self.endpoint(&format!("repos/{}/{}/stargazers", repo.owner, repo.name))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        self.get_json(url).await
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}
