use std::fmt;
use std::process::Command;
use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::error::{Result, StarsError};

/// A GitHub repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse a git remote URL pointing at github.com.
    pub fn from_remote_url(remote: &str) -> Result<Self> {
        let remote = remote.trim();

        // scp-like syntax: git@github.com:owner/name.git
        let path = if let Some(rest) = remote.strip_prefix("git@github.com:") {
            rest.to_string()
        } else {
            let url = Url::parse(remote)
                .map_err(|e| StarsError::InvalidRepo(format!("{}: {}", remote, e)))?;
            if url.host_str() != Some("github.com") {
                return Err(StarsError::InvalidRepo(format!("not a github.com remote: {}", remote)));
            }
            url.path().trim_start_matches('/').to_string()
        };

        let path = path.trim_end_matches('/');
        path.strip_suffix(".git").unwrap_or(path).parse()
    }

    /// Parse a `GH_REPO` value: `OWNER/REPO` or `HOST/OWNER/REPO`.
    pub fn from_gh_repo(value: &str) -> Result<Self> {
        let value = value.trim();
        match value.split('/').collect::<Vec<_>>().as_slice() {
            ["github.com", owner, name] => format!("{}/{}", owner, name).parse(),
            [host, _, _] => Err(StarsError::InvalidRepo(format!(
                "GH_REPO host {} is not github.com: {}",
                host, value
            ))),
            _ => value.parse(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = StarsError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(StarsError::InvalidRepo(format!(
                "Invalid repository name format: {}",
                s
            )));
        }
        Ok(RepoId::new(parts[0], parts[1]))
    }
}

/// Repository implied by the environment: `GH_REPO`, then the `origin`
/// remote of the git checkout in the working directory. A malformed
/// `GH_REPO` is reported as such; a failed git lookup is `NoRepository`.
pub fn current_repository() -> Result<RepoId> {
    if let Ok(repo) = std::env::var("GH_REPO") {
        if !repo.trim().is_empty() {
            return RepoId::from_gh_repo(&repo);
        }
    }

    origin_repository().map_err(|e| {
        debug!("No repository from git: {}", e);
        StarsError::NoRepository
    })
}

fn origin_repository() -> Result<RepoId> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()?;
    if !output.status.success() {
        return Err(StarsError::InvalidRepo(format!(
            "git remote lookup failed with {}",
            output.status
        )));
    }

    let remote = String::from_utf8_lossy(&output.stdout);
    debug!(remote = %remote.trim(), "Resolving repository from git remote");
    RepoId::from_remote_url(&remote)
}

/// The positional argument when given, otherwise the ambient repository.
pub fn resolve(arg: Option<&str>) -> Result<RepoId> {
    match arg {
        Some(repo) => repo.parse(),
        None => current_repository(),
    }
}
