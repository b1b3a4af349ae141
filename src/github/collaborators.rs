//! Collaborator membership checks and removal.

use reqwest::{Method, StatusCode};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::client::{api_error, segment};

/// Result of a `DELETE /repos/{owner}/{repo}/collaborators/{user}` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The collaborator was removed (204).
    Removed,
    /// The user was not a collaborator (404).
    NotCollaborator,
    /// Any other status.
    Failed { status: u16, body: String },
}

/// Collaborator operations.
pub trait CollaboratorOps {
    /// Check whether `user` is a collaborator on `owner/repo`.
    ///
    /// 200 and 204 mean yes, 404 means no, anything else is an error.
    fn is_collaborator(&self, owner: &str, repo: &str, user: &str) -> Result<bool>;

    /// Remove `user` from `owner/repo`.
    fn remove_collaborator(&self, owner: &str, repo: &str, user: &str) -> Result<RemovalOutcome>;
}

fn collaborator_endpoint(owner: &str, repo: &str, user: &str) -> String {
    format!(
        "/repos/{}/{}/collaborators/{}",
        segment(owner),
        segment(repo),
        segment(user)
    )
}

impl CollaboratorOps for GitHubClient {
    fn is_collaborator(&self, owner: &str, repo: &str, user: &str) -> Result<bool> {
        let response = self.send(Method::GET, &collaborator_endpoint(owner, repo, user))?;
        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(api_error(response)),
        }
    }

    fn remove_collaborator(&self, owner: &str, repo: &str, user: &str) -> Result<RemovalOutcome> {
        let response = self.send(Method::DELETE, &collaborator_endpoint(owner, repo, user))?;
        Ok(match response.status() {
            StatusCode::NO_CONTENT => RemovalOutcome::Removed,
            StatusCode::NOT_FOUND => RemovalOutcome::NotCollaborator,
            status => RemovalOutcome::Failed {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock_server::MockGitHub;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const MEMBER_PATH: &str = "/repos/acme/api/collaborators/octocat";

    fn respond(github: &MockGitHub, verb: &str, template: ResponseTemplate) {
        github.mount(
            Mock::given(method(verb))
                .and(path(MEMBER_PATH))
                .respond_with(template),
        );
    }

    fn check_with_status(status: u16) -> Result<bool> {
        let github = MockGitHub::start();
        respond(&github, "GET", ResponseTemplate::new(status).set_body_string("nope"));
        github.client().is_collaborator("acme", "api", "octocat")
    }

    fn remove_with_status(status: u16) -> RemovalOutcome {
        let github = MockGitHub::start();
        respond(&github, "DELETE", ResponseTemplate::new(status).set_body_string("bad"));
        github
            .client()
            .remove_collaborator("acme", "api", "octocat")
            .unwrap()
    }

    #[test]
    fn test_membership_no_content_means_collaborator() {
        assert!(check_with_status(204).unwrap());
    }

    #[test]
    fn test_membership_ok_means_collaborator() {
        assert!(check_with_status(200).unwrap());
    }

    #[test]
    fn test_membership_not_found_means_not_collaborator() {
        assert!(!check_with_status(404).unwrap());
    }

    #[test]
    fn test_membership_forbidden_is_an_error() {
        let err = check_with_status(403).unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.body(), Some("nope"));
    }

    #[test]
    fn test_remove_no_content_is_removed() {
        assert_eq!(remove_with_status(204), RemovalOutcome::Removed);
    }

    #[test]
    fn test_remove_not_found_is_not_collaborator() {
        assert_eq!(remove_with_status(404), RemovalOutcome::NotCollaborator);
    }

    #[test]
    fn test_remove_other_status_is_failed_with_body() {
        assert_eq!(
            remove_with_status(422),
            RemovalOutcome::Failed {
                status: 422,
                body: "bad".into(),
            }
        );
    }

    #[test]
    fn test_membership_check_passes_through_low_rate_limit() {
        let github = MockGitHub::start();
        respond(
            &github,
            "GET",
            ResponseTemplate::new(204)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1"),
        );
        assert!(
            github
                .client()
                .is_collaborator("acme", "api", "octocat")
                .unwrap()
        );
    }

    #[test]
    fn test_collaborator_endpoint() {
        assert_eq!(
            collaborator_endpoint("acme", "api", "octocat"),
            "/repos/acme/api/collaborators/octocat"
        );
    }

    #[test]
    fn test_collaborator_endpoint_encodes_segments() {
        assert_eq!(
            collaborator_endpoint("acme", "my repo", "bad/../user"),
            "/repos/acme/my%20repo/collaborators/bad%2F..%2Fuser"
        );
    }
}
