use std::sync::Arc;

use async_trait::async_trait;
use issues_database_interface::{DbService, Result};
use issues_models::{Issue, IssueFilter, IssueId, IssuePatch, NewIssue};
use tokio::sync::RwLock;

/// In-memory issue store, kept in insertion order.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    issues: Arc<RwLock<Vec<Issue>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl DbService for MemoryDb {
    #[tracing::instrument(skip(self))]
    async fn issues_find(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        Ok(self
            .issues
            .read()
            .await
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn issues_create(&self, instance: NewIssue) -> Result<Issue> {
        let issue = instance.into_issue(IssueId::generate());
        self.issues.write().await.push(issue.clone());
        Ok(issue)
    }

    #[tracing::instrument(skip(self))]
    async fn issues_get(&self, id: &str) -> Result<Option<Issue>> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(None);
        };

        Ok(self
            .issues
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn issues_update(&self, id: &str, patch: IssuePatch) -> Result<bool> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(false);
        };

        let mut issues = self.issues.write().await;
        match issues.iter_mut().find(|i| i.id == id) {
            Some(issue) => {
                issue.apply_patch(&patch)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn issues_delete(&self, id: &str) -> Result<u64> {
        let Ok(id) = IssueId::try_from(id) else {
            return Ok(0);
        };

        let mut issues = self.issues.write().await;
        let before = issues.len();
        issues.retain(|i| i.id != id);
        Ok((before - issues.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
