//! Organization repository listing.

use serde::Deserialize;

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::segment;

/// Repository information from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    /// Archived repositories are read-only; removals there are rejected.
    #[serde(default)]
    pub archived: bool,
}

impl GitHubRepo {
    /// Create a repository entry from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archived: false,
        }
    }

    /// Mark the repository as archived.
    pub fn as_archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// Repository listing operations.
pub trait RepoOps {
    /// List the repositories of an organization.
    ///
    /// Only the first page the API returns is fetched.
    fn list_org_repos(&self, org: &str) -> Result<Vec<GitHubRepo>>;
}

impl RepoOps for GitHubClient {
    fn list_org_repos(&self, org: &str) -> Result<Vec<GitHubRepo>> {
        let endpoint = format!("/orgs/{}/repos", segment(org));
        self.get(&endpoint)
    }
}
