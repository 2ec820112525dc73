use async_trait::async_trait;
use issues_models::{Issue, IssueFilter, IssuePatch, NewIssue};

use crate::Result;

/// Issue document store.
///
/// Identifiers are received as raw client strings: a malformed identifier
/// behaves exactly like an unknown one and never yields an error.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DbService: Send + Sync {
    /// Issues matching the filter, in store order.
    async fn issues_find(&self, filter: &IssueFilter) -> Result<Vec<Issue>>;
    /// Insert a new issue, assigning its identifier.
    async fn issues_create(&self, instance: NewIssue) -> Result<Issue>;
    async fn issues_get(&self, id: &str) -> Result<Option<Issue>>;
    /// Apply a patch to one issue. Returns whether an issue matched.
    async fn issues_update(&self, id: &str, patch: IssuePatch) -> Result<bool>;
    /// Delete one issue. Returns the deleted count.
    async fn issues_delete(&self, id: &str) -> Result<u64>;
    async fn health_check(&self) -> Result<()>;
    /// Release the underlying connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
