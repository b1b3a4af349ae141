//! The sweep: walk every organization and repository, find the collaborator,
//! and report or remove them.

use std::io::{BufRead, Write};

use crate::error::{Result, SweepError};
use crate::github::{CollaboratorOps, OrgOps, RemovalOutcome, RepoOps};

/// Everything a sweep needs from the GitHub API.
pub trait GitHubApi: OrgOps + RepoOps + CollaboratorOps {}

impl<T: OrgOps + RepoOps + CollaboratorOps> GitHubApi for T {}

/// What to do with each repository the user is found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Report only.
    #[default]
    List,
    /// Ask before each removal.
    Confirm,
    /// Remove without asking.
    Force,
}

impl SweepMode {
    /// Resolve the CLI flags. Forced deletion wins over confirmed deletion.
    pub fn from_flags(delete: bool, force: bool) -> Self {
        match (delete, force) {
            (_, true) => Self::Force,
            (true, false) => Self::Confirm,
            (false, false) => Self::List,
        }
    }
}

/// Asks the operator a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on a writer and reads the answer from a line-oriented reader.
///
/// Only `y` (any case, surrounding whitespace ignored) counts as yes. EOF is no.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// What happened in a repository where the user was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reported only.
    Listed,
    Removed,
    /// GitHub said the user was not a collaborator when asked to remove them.
    NotCollaborator,
    /// The removal request failed; `status` is absent for transport errors.
    RemovalFailed { status: Option<u16> },
    /// The operator declined the removal.
    Skipped,
}

/// A repository the user is a collaborator on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub org: String,
    pub repo: String,
    pub action: Action,
}

impl Finding {
    /// `org/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

/// Summary of a completed sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub orgs_scanned: usize,
    pub repos_scanned: usize,
    pub findings: Vec<Finding>,
    /// API calls that failed and were skipped over.
    pub errors: usize,
}

impl SweepReport {
    /// Whether the user was found anywhere.
    pub fn user_found(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Number of repositories the user was removed from.
    pub fn removed_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.action == Action::Removed)
            .count()
    }
}

/// A sweep for one collaborator across everything the API exposes.
pub struct Sweep<'a, A: GitHubApi> {
    api: &'a A,
    user: String,
    mode: SweepMode,
}

impl<'a, A: GitHubApi> Sweep<'a, A> {
    pub fn new(api: &'a A, user: impl Into<String>) -> Self {
        Self {
            api,
            user: user.into(),
            mode: SweepMode::List,
        }
    }

    pub fn mode(mut self, mode: SweepMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run the sweep, writing progress lines to `out`.
    ///
    /// API failures are reported and skipped; only I/O errors on `out` or the
    /// confirmation prompt abort the sweep.
    pub fn run<W: Write>(&self, out: &mut W, confirm: &mut dyn Confirm) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        let orgs = match self.api.list_user_orgs() {
            Ok(orgs) => orgs,
            Err(e) => {
                report_error(out, "Error getting organizations", &e)?;
                report.errors += 1;
                Vec::new()
            }
        };

        if orgs.is_empty() {
            writeln!(out, "No organizations found, exiting.")?;
            return Ok(report);
        }

        writeln!(out, "Checking for user '{}' in repositories...", self.user)?;

        for org in &orgs {
            let repos = match self.api.list_org_repos(&org.login) {
                Ok(repos) => repos,
                Err(e) => {
                    report_error(
                        out,
                        &format!("Error getting repos for organization: {}", org.login),
                        &e,
                    )?;
                    report.errors += 1;
                    continue;
                }
            };
            report.orgs_scanned += 1;
            tracing::debug!(org = %org.login, repos = repos.len(), "scanning organization");

            for repo in &repos {
                report.repos_scanned += 1;
                match self.api.is_collaborator(&org.login, &repo.name, &self.user) {
                    Ok(true) => {
                        writeln!(
                            out,
                            "User '{}' is a collaborator in: {}/{}{}",
                            self.user,
                            org.login,
                            repo.name,
                            if repo.archived { " (archived)" } else { "" }
                        )?;
                        let action = self.apply(out, confirm, &org.login, &repo.name, &mut report)?;
                        report.findings.push(Finding {
                            org: org.login.clone(),
                            repo: repo.name.clone(),
                            action,
                        });
                    }
                    Ok(false) => {}
                    Err(e) => {
                        report_error(
                            out,
                            &format!(
                                "Error checking {} on {}/{}",
                                self.user, org.login, repo.name
                            ),
                            &e,
                        )?;
                        report.errors += 1;
                    }
                }
            }
        }

        if !report.user_found() {
            writeln!(out, "User '{}' not found in any repository.", self.user)?;
        }
        writeln!(out, "Sweep finished.")?;

        tracing::info!(
            orgs = report.orgs_scanned,
            repos = report.repos_scanned,
            found = report.findings.len(),
            removed = report.removed_count(),
            errors = report.errors,
            "sweep complete"
        );
        Ok(report)
    }

    fn apply<W: Write>(
        &self,
        out: &mut W,
        confirm: &mut dyn Confirm,
        org: &str,
        repo: &str,
        report: &mut SweepReport,
    ) -> Result<Action> {
        match self.mode {
            SweepMode::List => Ok(Action::Listed),
            SweepMode::Force => self.remove(out, org, repo, report),
            SweepMode::Confirm => {
                let prompt = format!(
                    "Are you sure you want to remove '{}' from {}/{}? (y/n): ",
                    self.user, org, repo
                );
                if confirm.confirm(&prompt)? {
                    self.remove(out, org, repo, report)
                } else {
                    writeln!(out, "Skipping removal from {}/{}", org, repo)?;
                    Ok(Action::Skipped)
                }
            }
        }
    }

    fn remove<W: Write>(
        &self,
        out: &mut W,
        org: &str,
        repo: &str,
        report: &mut SweepReport,
    ) -> Result<Action> {
        let action = match self.api.remove_collaborator(org, repo, &self.user) {
            Ok(RemovalOutcome::Removed) => {
                writeln!(out, "Successfully removed {} from {}/{}", self.user, org, repo)?;
                Action::Removed
            }
            Ok(RemovalOutcome::NotCollaborator) => {
                writeln!(
                    out,
                    "Error: {} is not a collaborator on {}/{}",
                    self.user, org, repo
                )?;
                Action::NotCollaborator
            }
            Ok(RemovalOutcome::Failed { status, body }) => {
                writeln!(
                    out,
                    "Error removing {}. Status code: {}",
                    self.user, status
                )?;
                writeln!(out, "{}", body)?;
                report.errors += 1;
                Action::RemovalFailed {
                    status: Some(status),
                }
            }
            Err(e) => {
                report_error(out, &format!("Error removing {}", self.user), &e)?;
                report.errors += 1;
                Action::RemovalFailed { status: e.status() }
            }
        };
        Ok(action)
    }
}

fn report_error<W: Write>(out: &mut W, context: &str, err: &SweepError) -> Result<()> {
    tracing::debug!(error = %err, "{}", context);
    match err {
        SweepError::GitHub { status, body } => {
            writeln!(out, "{}. Status code: {}", context, status)?;
            writeln!(out, "{}", body)?;
        }
        other => writeln!(out, "{}: {}", context, other)?,
    }
    Ok(())
}
