//! # Collab Sweep
//!
//! Audit, and optionally revoke, one user's collaborator access across every
//! repository of every organization the token owner belongs to.
//!
//! The sweep walks `GET /user/orgs`, then `GET /orgs/{org}/repos` for each
//! organization, then checks `GET /repos/{owner}/{repo}/collaborators/{user}`
//! for each repository. Depending on the [`SweepMode`], matches are only
//! reported, removed after a prompt, or removed outright.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collab_sweep::prelude::*;
//!
//! let client = GitHubClient::from_env()?;
//! let mut confirm = PromptConfirm::new(std::io::stdin().lock(), std::io::stdout());
//!
//! let report = Sweep::new(&client, "former-contractor")
//!     .mode(SweepMode::Confirm)
//!     .run(&mut std::io::stdout(), &mut confirm)?;
//!
//! println!("removed from {} repositories", report.removed_count());
//! # Ok::<(), collab_sweep::error::SweepError>(())
//! ```
//!
//! ## Rate limits
//!
//! The client reads `X-RateLimit-Remaining` and `X-RateLimit-Reset` on every
//! response and sleeps until the reset (plus a grace period) once fewer than
//! [`RateLimitPolicy::threshold`](github::RateLimitPolicy) requests remain.

pub mod config;
pub mod error;
pub mod github;
pub mod sweep;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, SweepError};
    pub use crate::github::{
        CollaboratorOps, GitHubClient, GitHubRepo, OrgOps, Organization, RateLimit,
        RateLimitPolicy, RemovalOutcome, RepoOps,
    };
    pub use crate::sweep::{
        Action, Confirm, Finding, GitHubApi, PromptConfirm, Sweep, SweepMode, SweepReport,
    };
}

pub use prelude::*;
