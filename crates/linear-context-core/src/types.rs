//! Unified domain types shared across the workspace.
//!
//! The API crate maps raw GraphQL responses into these shapes; the MCP and
//! CLI surfaces project them into the flat JSON payloads callers see.

use serde::{Deserialize, Serialize};

/// The authenticated Linear user ("viewer").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// A Linear team the viewer belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub key: String,
}

/// A Linear issue with state and assignee names already resolved.
///
/// `id` is the API uuid used for mutations; `identifier` is the display key
/// (e.g. "ENG-123") shown to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub url: Option<String>,
}

/// Input for creating an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIssueInput {
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<String>,
}

/// The remote response to a successful issue creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: Option<String>,
}

// =============================================================================
// Projections
// =============================================================================

/// Flat issue summary returned by the `list_issues` tool.
///
/// Both the tool and resource surfaces project from the unified [`Issue`],
/// so the two cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub title: String,
    pub state: String,
    pub url: Option<String>,
}

impl From<&Issue> for IssueSummary {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.identifier.clone(),
            title: issue.title.clone(),
            state: issue.state.clone().unwrap_or_else(|| "Unknown".to_string()),
            url: issue.url.clone(),
        }
    }
}

/// Detailed issue view returned by `resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetail {
    pub title: String,
    pub id: String,
    pub state: String,
    pub assignee: String,
    pub description: String,
}

impl From<&Issue> for IssueDetail {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            id: issue.identifier.clone(),
            state: issue.state.clone().unwrap_or_else(|| "Unknown".to_string()),
            assignee: issue
                .assignee
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string()),
            description: issue
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
        }
    }
}
