//! Provider trait for the remote issue tracker.
//!
//! The MCP handlers depend on this trait rather than on the concrete API
//! client, so tests can substitute a stub tracker.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Comment, CreateIssueInput, CreatedIssue, Issue, Team, User};

/// Operations the server needs from the remote issue tracker.
///
/// Every method is a single remote call; callers make exactly one attempt
/// and surface failures to their own caller.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch the authenticated user.
    async fn viewer(&self) -> Result<User>;

    /// Fetch issues assigned to the authenticated user.
    async fn assigned_issues(&self) -> Result<Vec<Issue>>;

    /// Fetch teams the authenticated user belongs to.
    async fn teams(&self) -> Result<Vec<Team>>;

    /// Fetch a single issue by id. Returns `None` when the issue does not
    /// exist, so callers can produce their own not-found wording.
    async fn issue(&self, id: &str) -> Result<Option<Issue>>;

    /// Create an issue.
    async fn create_issue(&self, input: CreateIssueInput) -> Result<CreatedIssue>;

    /// Create a comment on an issue, addressed by the issue's API id.
    async fn create_comment(&self, issue_id: &str, body: &str) -> Result<Comment>;
}
