//! Linear API client implementation.
//!
//! All operations go through a single GraphQL endpoint. State and assignee
//! names are resolved inside the queries, so callers never make follow-up
//! lookups per issue.

use async_trait::async_trait;
use linear_context_core::{
    Comment, CreateIssueInput, CreatedIssue, Error, Issue, IssueTracker, Result, Team, User,
};
use tracing::{debug, warn};

use crate::types::{
    map_comment, map_created_issue, map_issue, map_team, map_user, AssignedIssuesData,
    CommentCreateData, GraphQlRequest, GraphQlResponse, IssueCreateData, IssueData, TeamsData,
    ViewerData,
};
use crate::DEFAULT_API_URL;

const VIEWER_QUERY: &str = "query { viewer { id name email } }";

const ASSIGNED_ISSUES_QUERY: &str = "query { viewer { assignedIssues { \
nodes { id identifier title description url createdAt updatedAt \
state { name } assignee { name } } } } }";

const TEAMS_QUERY: &str = "query { viewer { teams { nodes { id name key } } } }";

const ISSUE_QUERY: &str = "query Issue($id: String!) { issue(id: $id) { \
id identifier title description url createdAt updatedAt \
state { name } assignee { name } } }";

const ISSUE_CREATE_MUTATION: &str = "mutation IssueCreate($input: IssueCreateInput!) { \
issueCreate(input: $input) { success issue { id identifier title url } } }";

const COMMENT_CREATE_MUTATION: &str = "mutation CommentCreate($input: CommentCreateInput!) { \
commentCreate(input: $input) { success comment { id body url } } }";

/// Linear GraphQL API client.
pub struct LinearClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl LinearClient {
    /// Create a new client against the public Linear endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_API_URL, api_key)
    }

    /// Create a new client with a custom endpoint (also used by tests with
    /// httpmock).
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::builder()
                .user_agent("linear-context-server")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// POST a GraphQL document and unwrap the response envelope.
    async fn post_graphql<T: serde::de::DeserializeOwned>(
        &self,
        query: &'static str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        debug!(endpoint = %self.endpoint, "Linear GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(
                status = status_code,
                message = message,
                "Linear API error response"
            );
            return Err(Error::from_status(status_code, message));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))?;

        if !body.errors.is_empty() {
            let joined = body
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::GraphQl(joined));
        }

        body.data
            .ok_or_else(|| Error::InvalidData("Response missing data".to_string()))
    }
}

#[async_trait]
impl IssueTracker for LinearClient {
    async fn viewer(&self) -> Result<User> {
        let data: ViewerData = self.post_graphql(VIEWER_QUERY, None).await?;
        Ok(map_user(data.viewer))
    }

    async fn assigned_issues(&self) -> Result<Vec<Issue>> {
        let data: AssignedIssuesData = self.post_graphql(ASSIGNED_ISSUES_QUERY, None).await?;
        let issues = data
            .viewer
            .assigned_issues
            .nodes
            .into_iter()
            .map(map_issue)
            .collect::<Vec<_>>();

        debug!(count = issues.len(), "Fetched assigned issues");
        Ok(issues)
    }

    async fn teams(&self) -> Result<Vec<Team>> {
        let data: TeamsData = self.post_graphql(TEAMS_QUERY, None).await?;
        Ok(data.viewer.teams.nodes.into_iter().map(map_team).collect())
    }

    async fn issue(&self, id: &str) -> Result<Option<Issue>> {
        let variables = serde_json::json!({ "id": id });
        // Linear reports unknown ids as a GraphQL "entity not found" error
        // rather than a null issue; both read as absent here.
        match self.post_graphql::<IssueData>(ISSUE_QUERY, Some(variables)).await {
            Ok(data) => Ok(data.issue.map(map_issue)),
            Err(Error::GraphQl(msg)) if msg.to_lowercase().contains("not found") => {
                debug!(issue = id, "Issue does not resolve");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_issue(&self, input: CreateIssueInput) -> Result<CreatedIssue> {
        let mut fields = serde_json::Map::new();
        fields.insert("teamId".to_string(), serde_json::json!(input.team_id));
        fields.insert("title".to_string(), serde_json::json!(input.title));
        if let Some(description) = input.description {
            fields.insert("description".to_string(), serde_json::json!(description));
        }
        if let Some(assignee_id) = input.assignee_id {
            fields.insert("assigneeId".to_string(), serde_json::json!(assignee_id));
        }

        let variables = serde_json::json!({ "input": fields });
        let data: IssueCreateData = self
            .post_graphql(ISSUE_CREATE_MUTATION, Some(variables))
            .await?;

        if !data.issue_create.success {
            return Err(Error::InvalidData(
                "issueCreate reported failure".to_string(),
            ));
        }

        data.issue_create
            .issue
            .map(map_created_issue)
            .ok_or_else(|| Error::InvalidData("issueCreate returned no issue".to_string()))
    }

    async fn create_comment(&self, issue_id: &str, body: &str) -> Result<Comment> {
        let variables = serde_json::json!({
            "input": { "issueId": issue_id, "body": body }
        });
        let data: CommentCreateData = self
            .post_graphql(COMMENT_CREATE_MUTATION, Some(variables))
            .await?;

        if !data.comment_create.success {
            return Err(Error::InvalidData(
                "commentCreate reported failure".to_string(),
            ));
        }

        data.comment_create
            .comment
            .map(map_comment)
            .ok_or_else(|| Error::InvalidData("commentCreate returned no comment".to_string()))
    }
}
