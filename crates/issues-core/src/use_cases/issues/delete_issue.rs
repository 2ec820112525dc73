use async_trait::async_trait;
use issues_models::{IssueField, RequestFields};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeleteIssueInterface: Interface {
    /// Delete an issue, returning its identifier.
    async fn run<'a>(&self, ctx: &CoreContext<'a>, body: &RequestFields) -> Result<String>;
}

#[derive(Component)]
#[shaku(interface = DeleteIssueInterface)]
pub(crate) struct DeleteIssue;

#[async_trait]
impl DeleteIssueInterface for DeleteIssue {
    #[tracing::instrument(skip(self, ctx, body))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, body: &RequestFields) -> Result<String> {
        let id = body
            .present_text(IssueField::Id.to_str())
            .ok_or(DomainError::MissingId)?;

        match ctx.db_service.issues_delete(&id).await? {
            0 => Err(DomainError::DeleteFailed { id }),
            _ => {
                info!(issue_id = %id, "Deleted issue");
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use issues_database_interface::{DbService, MockDbService};
    use issues_models::{current_timestamp, IssueFilter, NewIssue};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn delete() -> Result<()> {
        let ctx = CoreContextTest::new();
        let now = current_timestamp();
        let issue = ctx
            .db_service
            .issues_create(NewIssue {
                project: "apitest".into(),
                issue_title: "Title".into(),
                issue_text: "Text".into(),
                created_on: now,
                updated_on: now,
                created_by: "Joe".into(),
                assigned_to: String::new(),
                open: true,
                status_text: String::new(),
            })
            .await?;
        let id = issue.id.to_string();
        let body = RequestFields::new().with("_id", id.clone());

        assert_eq!(DeleteIssue.run(&ctx.as_context(), &body).await?, id);
        assert_eq!(
            ctx.db_service
                .issues_find(&IssueFilter::new("apitest"))
                .await?,
            vec![]
        );

        assert!(matches!(
            DeleteIssue.run(&ctx.as_context(), &body).await,
            Err(DomainError::DeleteFailed { id: err_id }) if err_id == id
        ));

        Ok(())
    }

    #[tokio::test]
    async fn missing_id_does_not_touch_the_store() {
        let ctx = CoreContextTest::new();
        let mut db_service = MockDbService::new();
        db_service.expect_issues_delete().never();

        assert!(matches!(
            DeleteIssue
                .run(&ctx.as_context_with(&db_service), &RequestFields::new())
                .await,
            Err(DomainError::MissingId)
        ));
    }

    #[tokio::test]
    async fn malformed_id() {
        let ctx = CoreContextTest::new();
        let body = RequestFields::new().with("_id", "not-an-id");

        assert!(matches!(
            DeleteIssue.run(&ctx.as_context(), &body).await,
            Err(DomainError::DeleteFailed { id }) if id == "not-an-id"
        ));
    }
}
