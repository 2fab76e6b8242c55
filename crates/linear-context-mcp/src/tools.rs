//! Tool registry.
//!
//! The registry is the sole dispatch key space: descriptor names are unique
//! and a name absent from the registry is rejected, never ignored.

use crate::protocol::ToolDefinition;

// Tool names
pub const CREATE_ISSUE: &str = "create_issue";
pub const CREATE_COMMENT: &str = "create_comment";
pub const LIST_ISSUES: &str = "list_issues";
pub const LIST_TEAMS: &str = "list_teams";

/// Sentinel assignee value meaning "the authenticated user".
pub const SELF_ASSIGNEE: &str = "me";

/// The available tool definitions, in stable order.
pub fn registry() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CREATE_ISSUE.to_string(),
            description: "Create a new Linear issue.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Title of the issue"
                    },
                    "description": {
                        "type": "string",
                        "description": "Description of the issue"
                    },
                    "assignee": {
                        "type": "string",
                        "description": format!("Set to '{}' to assign to self", SELF_ASSIGNEE)
                    }
                },
                "required": ["title"]
            }),
        },
        ToolDefinition {
            name: CREATE_COMMENT.to_string(),
            description: "Create a new comment on an existing Linear issue.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "ID of the existing Linear issue."
                    },
                    "body": {
                        "type": "string",
                        "description": "Body of the comment"
                    }
                },
                "required": ["id", "body"]
            }),
        },
        ToolDefinition {
            name: LIST_ISSUES.to_string(),
            description: "List all Linear issues assigned to me.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: LIST_TEAMS.to_string(),
            description: "List all Linear teams I have access to.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_names_exact_and_unique() {
        let tools = registry();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len(), "tool names must be unique");

        let expected: HashSet<&str> = [CREATE_ISSUE, CREATE_COMMENT, LIST_ISSUES, LIST_TEAMS]
            .into_iter()
            .collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_registry_order_is_stable() {
        let first = registry();
        let second = registry();
        let names = |tools: &[crate::protocol::ToolDefinition]| {
            tools.iter().map(|t| t.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_self_assignee_documented_in_descriptor() {
        let tools = registry();
        let create_issue = tools.iter().find(|t| t.name == CREATE_ISSUE).unwrap();
        let assignee_desc = create_issue.input_schema["properties"]["assignee"]["description"]
            .as_str()
            .unwrap();
        assert!(assignee_desc.contains(SELF_ASSIGNEE));
    }

    #[test]
    fn test_required_fields() {
        let tools = registry();

        let required = |name: &str| -> Vec<String> {
            tools
                .iter()
                .find(|t| t.name == name)
                .unwrap()
                .input_schema["required"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect()
        };

        assert_eq!(required(CREATE_ISSUE), vec!["title"]);
        assert_eq!(required(CREATE_COMMENT), vec!["id", "body"]);
        assert!(required(LIST_ISSUES).is_empty());
        assert!(required(LIST_TEAMS).is_empty());
    }
}
