//! Resource listing and reading.
//!
//! Assigned issues are exposed as addressable resources under the
//! `issue://` scheme. Unlike tool calls, failures here stay `Err` so the
//! server surfaces them as JSON-RPC errors rather than soft envelopes.

use std::sync::Arc;

use linear_context_core::{IssueDetail, IssueTracker, Result};

use crate::protocol::{
    ReadResourceResult, ResourceContents, ResourceDescriptor, ResourcesListResult,
};

/// URI scheme for issue resources.
pub const ISSUE_SCHEME: &str = "issue://";

/// MIME type of issue resource payloads.
pub const ISSUE_MIME_TYPE: &str = "application/json";

/// Resource handler backed by the issue tracker.
pub struct ResourceHandler {
    tracker: Arc<dyn IssueTracker>,
}

impl ResourceHandler {
    /// Create a new resource handler.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// List the viewer's assigned issues as resources.
    ///
    /// An absent filter or `"issue"` enumerates issues; any other filter
    /// yields an empty list.
    pub async fn list(&self, resource_type: Option<&str>) -> Result<ResourcesListResult> {
        let mut resources = Vec::new();

        if resource_type.is_none() || resource_type == Some("issue") {
            let issues = self.tracker.assigned_issues().await?;
            resources.extend(issues.iter().map(|issue| ResourceDescriptor {
                uri: format!("{}{}", ISSUE_SCHEME, issue.id),
                mime_type: ISSUE_MIME_TYPE.to_string(),
                name: issue.title.clone(),
                description: format!("Linear issue: {} ({})", issue.title, issue.identifier),
            }));
        }

        tracing::debug!(count = resources.len(), "Listing resources");
        Ok(ResourcesListResult { resources })
    }

    /// Read a single issue resource back as a JSON payload.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult> {
        let Some(issue_id) = uri.strip_prefix(ISSUE_SCHEME) else {
            return Err(anyhow::anyhow!("Unsupported resource type: {}", uri).into());
        };

        let Some(issue) = self.tracker.issue(issue_id).await? else {
            return Err(anyhow::anyhow!("Issue {} not found", issue_id).into());
        };

        let detail = IssueDetail::from(&issue);
        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: ISSUE_MIME_TYPE.to_string(),
                text: serde_json::to_string_pretty(&detail)?,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linear_context_core::{
        Comment, CreateIssueInput, CreatedIssue, Error, Issue, Team, User,
    };

    struct StubTracker {
        issues: Vec<Issue>,
    }

    impl StubTracker {
        fn new() -> Self {
            Self {
                issues: vec![Issue {
                    id: "uuid-1".to_string(),
                    identifier: "ENG-1".to_string(),
                    title: "Fix login".to_string(),
                    description: None,
                    state: None,
                    assignee: None,
                    url: None,
                    created_at: None,
                    updated_at: None,
                }],
            }
        }
    }

    #[async_trait]
    impl IssueTracker for StubTracker {
        async fn viewer(&self) -> linear_context_core::Result<User> {
            Err(Error::Http("not used".to_string()))
        }

        async fn assigned_issues(&self) -> linear_context_core::Result<Vec<Issue>> {
            Ok(self.issues.clone())
        }

        async fn teams(&self) -> linear_context_core::Result<Vec<Team>> {
            Ok(vec![])
        }

        async fn issue(&self, id: &str) -> linear_context_core::Result<Option<Issue>> {
            Ok(self.issues.iter().find(|i| i.id == id).cloned())
        }

        async fn create_issue(
            &self,
            _input: CreateIssueInput,
        ) -> linear_context_core::Result<CreatedIssue> {
            Err(Error::Http("not used".to_string()))
        }

        async fn create_comment(
            &self,
            _issue_id: &str,
            _body: &str,
        ) -> linear_context_core::Result<Comment> {
            Err(Error::Http("not used".to_string()))
        }
    }

    fn handler() -> ResourceHandler {
        ResourceHandler::new(Arc::new(StubTracker::new()))
    }

    #[tokio::test]
    async fn test_list_issues_as_resources() {
        let result = handler().list(None).await.unwrap();

        assert_eq!(result.resources.len(), 1);
        let resource = &result.resources[0];
        assert_eq!(resource.uri, "issue://uuid-1");
        assert_eq!(resource.mime_type, "application/json");
        assert_eq!(resource.name, "Fix login");
        assert!(resource.description.contains("ENG-1"));
    }

    #[tokio::test]
    async fn test_list_with_issue_filter() {
        let result = handler().list(Some("issue")).await.unwrap();
        assert_eq!(result.resources.len(), 1);
    }

    #[tokio::test]
    async fn test_list_with_other_filter_is_empty() {
        let result = handler().list(Some("project")).await.unwrap();
        assert!(result.resources.is_empty());
    }

    #[tokio::test]
    async fn test_read_applies_defaults() {
        let result = handler().read("issue://uuid-1").await.unwrap();

        assert_eq!(result.contents.len(), 1);
        let payload: serde_json::Value =
            serde_json::from_str(&result.contents[0].text).unwrap();
        assert_eq!(payload["id"], "ENG-1");
        assert_eq!(payload["state"], "Unknown");
        assert_eq!(payload["assignee"], "Unassigned");
        assert_eq!(payload["description"], "No description");
    }

    #[tokio::test]
    async fn test_read_missing_issue_fails() {
        let err = handler().read("issue://nope").await.unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_read_unsupported_scheme_fails() {
        let err = handler().read("file:///etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported resource type"));
    }
}
