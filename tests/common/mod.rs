#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gh_stars::error::{Result, StarsError};
use gh_stars::github::StarSource;
use gh_stars::repo::RepoId;
use gh_stars::types::{RepoSummary, StarEvent};

pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn star(timestamp: &str) -> StarEvent {
    StarEvent::new(at(timestamp))
}

/// In-memory stand-in for the GitHub API.
#[derive(Default)]
pub struct MockSource {
    summary: Option<RepoSummary>,
    pages: HashMap<u32, Vec<StarEvent>>,
    failing: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    calls: AtomicUsize,
    requested: Mutex<Vec<(u32, u32)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, name: &str, total: u32) -> Self {
        self.summary = Some(RepoSummary {
            name: name.to_string(),
            total_stargazers: total,
        });
        self
    }

    pub fn with_page(mut self, page: u32, events: Vec<StarEvent>) -> Self {
        self.pages.insert(page, events);
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing.insert(page);
        self
    }

    pub fn with_delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(page, per_page)` pairs in request order, sorted by page.
    pub fn requested_pages(&self) -> Vec<(u32, u32)> {
        let mut pages = self.requested.lock().unwrap().clone();
        pages.sort();
        pages
    }
}

impl StarSource for MockSource {
    async fn repository(&self, repo: &RepoId) -> Result<RepoSummary> {
        self.summary
            .clone()
            .ok_or_else(|| StarsError::NotFound(format!("Resource not found: {}", repo)))
    }

    async fn stargazers_page(&self, _repo: &RepoId, page: u32, per_page: u32) -> Result<Vec<StarEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push((page, per_page));

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&page) {
            return Err(StarsError::ApiError(format!("page {} unavailable", page)));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}
