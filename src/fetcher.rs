use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FetchFailure, StarsError};
use crate::github::StarSource;
use crate::repo::RepoId;
use crate::series::{bucket_by_day, DailySeries};
use crate::types::StarEvent;

/// Pages to request for a repository of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub pages: u32,
    pub per_page: u32,
}

impl PagePlan {
    /// Floor division unless `round_up_pages` is set, so by default the
    /// trailing partial page is not requested. Refuses plans at or above
    /// `max_pages`.
    pub fn new(total_stargazers: u32, config: &Config) -> Result<Self, StarsError> {
        let per_page = config.page_size.max(1);
        let pages = if config.round_up_pages {
            total_stargazers.div_ceil(per_page)
        } else {
            total_stargazers / per_page
        };

        if pages >= config.max_pages {
            return Err(StarsError::TooManyPages {
                pages,
                max: config.max_pages,
            });
        }

        Ok(PagePlan { pages, per_page })
    }

    pub fn page_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.pages
    }
}

/// Fetch every planned page concurrently and merge the results, sorted by
/// star time. When any page fails the whole fetch fails with the error of the
/// lowest failing page; the events collected so far travel with it.
pub async fn fetch_stargazers<S: StarSource>(
    source: Arc<S>,
    repo: &RepoId,
    total_stargazers: u32,
    config: &Config,
) -> Result<Vec<StarEvent>, FetchFailure> {
    let plan = PagePlan::new(total_stargazers, config)?;
    info!(repo = %repo, pages = plan.pages, per_page = plan.per_page, "Fetching stargazers");

    let collected = Arc::new(Mutex::new(Vec::<StarEvent>::new()));
    let mut tasks = JoinSet::new();

    for page in plan.page_numbers() {
        let source = Arc::clone(&source);
        let repo = repo.clone();
        let collected = Arc::clone(&collected);
        let per_page = plan.per_page;

        tasks.spawn(async move {
            let events = source
                .stargazers_page(&repo, page, per_page)
                .await
                .map_err(|e| StarsError::PageFetch {
                    page,
                    source: Box::new(e),
                })?;
            debug!(page, count = events.len(), "Fetched stargazers page");
            collected.lock().await.extend(events);
            Ok::<(), StarsError>(())
        });
    }

    let mut failure: Option<StarsError> = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined
            .unwrap_or_else(|e| Err(StarsError::ApiError(format!("page task aborted: {}", e))));
        if let Err(e) = outcome {
            warn!(page = ?e.page(), "Stargazer page failed: {}", e);
            failure = Some(match failure {
                Some(current) if page_rank(&current) <= page_rank(&e) => current,
                _ => e,
            });
        }
    }

    let mut events = std::mem::take(&mut *collected.lock().await);

    if let Some(error) = failure {
        return Err(FetchFailure {
            partial: events,
            error,
        });
    }

    events.sort_by_key(|event| event.occurred_at);
    info!(repo = %repo, count = events.len(), "Fetched all stargazers");
    Ok(events)
}

/// Fetch and bucket in one step. Partial results are dropped on failure.
pub async fn load_series<S: StarSource>(
    source: Arc<S>,
    repo: &RepoId,
    total_stargazers: u32,
    config: &Config,
) -> Result<DailySeries, StarsError> {
    match fetch_stargazers(source, repo, total_stargazers, config).await {
        Ok(events) => Ok(bucket_by_day(&events)),
        Err(failure) => {
            debug!(partial = failure.partial.len(), "Discarding partial stargazer results");
            Err(failure.error)
        }
    }
}

fn page_rank(error: &StarsError) -> u32 {
    error.page().unwrap_or(u32::MAX)
}
