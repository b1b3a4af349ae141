//! GitHub API integration for collaborator sweeps.
//!
//! This module provides a blocking client for the handful of REST endpoints
//! a sweep needs:
//! - List the organizations of the token owner
//! - List an organization's repositories
//! - Check and remove repository collaborators
//!
//! Every response is checked against the `X-RateLimit-*` headers and the
//! client sleeps when the remaining quota drops below the configured threshold.
//!
//! # Example
//!
//! ```rust,no_run
//! use collab_sweep::github::{CollaboratorOps, GitHubClient, OrgOps, RepoOps};
//!
//! let client = GitHubClient::new("ghp_your_token_here")?;
//!
//! for org in client.list_user_orgs()? {
//!     for repo in client.list_org_repos(&org.login)? {
//!         if client.is_collaborator(&org.login, &repo.name, "octocat")? {
//!             println!("{}/{}", org.login, repo.name);
//!         }
//!     }
//! }
//! # Ok::<(), collab_sweep::error::SweepError>(())
//! ```

mod client;
mod collaborators;
#[cfg(test)]
mod mock_server;
mod orgs;
mod rate_limit;
mod repos;

pub use client::GitHubClient;
pub use collaborators::{CollaboratorOps, RemovalOutcome};
pub use orgs::{OrgOps, Organization};
pub use rate_limit::{RateLimit, RateLimitPolicy, throttle};
pub use repos::{GitHubRepo, RepoOps};
