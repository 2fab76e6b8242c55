//! Linear GraphQL wire types.
//!
//! These types represent the raw JSON shapes returned by the Linear GraphQL
//! API. They are deserialized and then mapped to the unified types in
//! `linear-context-core`.

use linear_context_core::{Comment, CreatedIssue, Issue, Team, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// GraphQL envelope
// =============================================================================

/// Request body for a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// Response envelope: `data` plus an optional `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single GraphQL-level error.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

// =============================================================================
// Viewer
// =============================================================================

/// `{ viewer { ... } }` wrapper.
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: ApiUser,
}

/// The authenticated user as Linear returns it.
#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Issues
// =============================================================================

/// Paginated connection wrapper; only `nodes` is consumed.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

/// `{ viewer { assignedIssues { nodes } } }` wrapper.
#[derive(Debug, Deserialize)]
pub struct AssignedIssuesData {
    pub viewer: AssignedIssuesViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedIssuesViewer {
    pub assigned_issues: Connection<ApiIssue>,
}

/// An issue as Linear returns it, with state and assignee names resolved
/// inside the query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIssue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub state: Option<ApiWorkflowState>,
    #[serde(default)]
    pub assignee: Option<ApiUserRef>,
}

/// Workflow state reference (`state { name }`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiWorkflowState {
    pub name: String,
}

/// User reference (`assignee { name }`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUserRef {
    pub name: String,
}

/// `{ issue }` wrapper; null when the id does not resolve.
#[derive(Debug, Deserialize)]
pub struct IssueData {
    #[serde(default)]
    pub issue: Option<ApiIssue>,
}

// =============================================================================
// Teams
// =============================================================================

/// `{ viewer { teams { nodes } } }` wrapper.
#[derive(Debug, Deserialize)]
pub struct TeamsData {
    pub viewer: TeamsViewer,
}

#[derive(Debug, Deserialize)]
pub struct TeamsViewer {
    pub teams: Connection<ApiTeam>,
}

/// A team as Linear returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeam {
    pub id: String,
    pub name: String,
    pub key: String,
}

// =============================================================================
// Mutations
// =============================================================================

/// `{ issueCreate }` wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreateData {
    pub issue_create: IssueCreatePayload,
}

#[derive(Debug, Deserialize)]
pub struct IssueCreatePayload {
    pub success: bool,
    #[serde(default)]
    pub issue: Option<ApiCreatedIssue>,
}

/// The created issue as the mutation returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCreatedIssue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// `{ commentCreate }` wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateData {
    pub comment_create: CommentCreatePayload,
}

#[derive(Debug, Deserialize)]
pub struct CommentCreatePayload {
    pub success: bool,
    #[serde(default)]
    pub comment: Option<ApiComment>,
}

/// A comment as the mutation returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiComment {
    pub id: String,
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
}

// =============================================================================
// Mapping functions: Linear wire types -> unified types
// =============================================================================

pub fn map_user(user: ApiUser) -> User {
    User {
        id: user.id,
        name: user.name,
        email: user.email,
    }
}

pub fn map_issue(issue: ApiIssue) -> Issue {
    Issue {
        id: issue.id,
        identifier: issue.identifier,
        title: issue.title,
        description: issue.description,
        state: issue.state.map(|s| s.name),
        assignee: issue.assignee.map(|a| a.name),
        url: issue.url,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
    }
}

pub fn map_team(team: ApiTeam) -> Team {
    Team {
        id: team.id,
        name: team.name,
        key: team.key,
    }
}

pub fn map_created_issue(issue: ApiCreatedIssue) -> CreatedIssue {
    CreatedIssue {
        id: issue.id,
        identifier: issue.identifier,
        title: issue.title,
        url: issue.url,
    }
}

pub fn map_comment(comment: ApiComment) -> Comment {
    Comment {
        id: comment.id,
        body: comment.body,
        url: comment.url,
    }
}
