//! Core traits, types, and error handling for the Linear context server.
//!
//! This crate provides the foundational abstractions shared by the API
//! client, the MCP server, and the CLI.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use error::{Error, Result};
pub use provider::IssueTracker;
pub use types::{
    Comment, CreateIssueInput, CreatedIssue, Issue, IssueDetail, IssueSummary, Team, User,
};
