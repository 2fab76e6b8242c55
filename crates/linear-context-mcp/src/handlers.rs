//! Tool handlers for the MCP server.
//!
//! The dispatcher matches a tool name against the registry, validates the
//! argument bag against the descriptor's required fields, and runs the
//! matching handler. Failures never escape: every error becomes a
//! `ToolCallResult` with `isError` set.

use std::sync::Arc;

use linear_context_core::{CreateIssueInput, IssueSummary, IssueTracker, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::protocol::{ToolCallResult, ToolDefinition};
use crate::tools;

/// Tool handler that executes tools against the issue tracker.
pub struct ToolHandler {
    tracker: Arc<dyn IssueTracker>,
    tools: Vec<ToolDefinition>,
}

impl ToolHandler {
    /// Create a new tool handler.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            tracker,
            tools: tools::registry(),
        }
    }

    /// Get available tool definitions.
    pub fn available_tools(&self) -> Vec<ToolDefinition> {
        self.tools.clone()
    }

    /// Execute a tool by name with arguments.
    pub async fn execute(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let Some(tool) = self.tools.iter().find(|t| t.name == name) else {
            tracing::warn!("Unknown tool: {}", name);
            return ToolCallResult::error(format!("Error: Unknown tool: {}", name));
        };

        let args = arguments.unwrap_or_else(|| serde_json::json!({}));
        if let Err(message) = validate_arguments(tool, &args) {
            return ToolCallResult::error(message);
        }

        let outcome = match tool.name.as_str() {
            tools::LIST_ISSUES => self.handle_list_issues().await,
            tools::LIST_TEAMS => self.handle_list_teams().await,
            tools::CREATE_ISSUE => self.handle_create_issue(args).await,
            tools::CREATE_COMMENT => self.handle_create_comment(args).await,
            other => return ToolCallResult::error(format!("Error: Unknown tool: {}", other)),
        };

        match outcome {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool call failed");
                ToolCallResult::error(format!("Error: {}", e))
            }
        }
    }

    /// Handle list_issues: the viewer's assigned issues, projected flat.
    async fn handle_list_issues(&self) -> Result<String> {
        let issues = self.tracker.assigned_issues().await?;
        let summaries: Vec<IssueSummary> = issues.iter().map(IssueSummary::from).collect();

        tracing::debug!(count = summaries.len(), "Listing assigned issues");
        Ok(serde_json::to_string_pretty(&summaries)?)
    }

    /// Handle list_teams: the viewer's teams as {id, name, key}.
    async fn handle_list_teams(&self) -> Result<String> {
        let teams = self.tracker.teams().await?;
        Ok(serde_json::to_string_pretty(&teams)?)
    }

    /// Handle create_issue against the viewer's first team.
    async fn handle_create_issue(&self, args: Value) -> Result<String> {
        let params: CreateIssueParams = parse_params(args)?;

        let teams = self.tracker.teams().await?;
        let Some(team) = teams.into_iter().next() else {
            return Err(anyhow::anyhow!("No team found for user").into());
        };

        // Only the sentinel resolves to the viewer; any other assignee
        // value is sent to the remote as-is.
        let assignee_id = match params.assignee {
            Some(a) if a == tools::SELF_ASSIGNEE => Some(self.tracker.viewer().await?.id),
            other => other,
        };

        let created = self
            .tracker
            .create_issue(CreateIssueInput {
                team_id: team.id,
                title: params.title,
                description: params.description,
                assignee_id,
            })
            .await?;

        tracing::info!(issue = %created.identifier, "Created issue");
        Ok(serde_json::to_string_pretty(&created)?)
    }

    /// Handle create_comment: resolve the issue, then comment on its API id.
    async fn handle_create_comment(&self, args: Value) -> Result<String> {
        let params: CreateCommentParams = parse_params(args)?;

        let Some(issue) = self.tracker.issue(&params.id).await? else {
            return Err(anyhow::anyhow!("Issue {} not found", params.id).into());
        };

        let comment = self.tracker.create_comment(&issue.id, &params.body).await?;

        tracing::info!(issue = %issue.identifier, "Created comment");
        Ok(serde_json::to_string_pretty(&comment)?)
    }
}

/// Check an argument bag against a descriptor's required field list.
fn validate_arguments(tool: &ToolDefinition, args: &Value) -> std::result::Result<(), String> {
    let Some(bag) = args.as_object() else {
        return Err(format!(
            "Error: Arguments for tool '{}' must be an object",
            tool.name
        ));
    };

    if let Some(required) = tool.input_schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            match bag.get(field) {
                None | Some(Value::Null) => {
                    return Err(format!(
                        "Error: Missing required argument '{}' for tool '{}'",
                        field, tool.name
                    ));
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

fn parse_params<T: serde::de::DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| linear_context_core::Error::InvalidData(format!("Invalid arguments: {}", e)))
}

/// Parameters for create_issue.
#[derive(Debug, Deserialize)]
struct CreateIssueParams {
    title: String,
    description: Option<String>,
    assignee: Option<String>,
}

/// Parameters for create_comment.
#[derive(Debug, Deserialize)]
struct CreateCommentParams {
    id: String,
    body: String,
}
