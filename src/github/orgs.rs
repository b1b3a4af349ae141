//! Organization listing for the token owner.

use serde::Deserialize;

use crate::error::Result;
use crate::github::GitHubClient;

/// Organization summary from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub login: String,
}

impl Organization {
    /// Create an organization entry from its login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// Organization operations.
pub trait OrgOps {
    /// List the organizations the authenticated user belongs to.
    fn list_user_orgs(&self) -> Result<Vec<Organization>>;
}

impl OrgOps for GitHubClient {
    fn list_user_orgs(&self) -> Result<Vec<Organization>> {
        let orgs: Vec<Organization> = self.get("/user/orgs")?;
        tracing::info!("Found {} organizations", orgs.len());
        Ok(orgs)
    }
}
