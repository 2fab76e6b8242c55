//! Linear GraphQL API client.
//!
//! Implements the [`linear_context_core::IssueTracker`] trait against the
//! Linear GraphQL endpoint.

pub mod client;
pub mod types;

pub use client::LinearClient;

/// Default Linear GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";
