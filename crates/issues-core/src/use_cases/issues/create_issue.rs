use async_trait::async_trait;
use issues_models::{current_timestamp, Issue, IssueField, NewIssue, RequestFields};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateIssueInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        project: &str,
        body: &RequestFields,
        query: &RequestFields,
    ) -> Result<Issue>;
}

#[derive(Component)]
#[shaku(interface = CreateIssueInterface)]
pub(crate) struct CreateIssue;

#[async_trait]
impl CreateIssueInterface for CreateIssue {
    #[tracing::instrument(skip(self, ctx, body, query), fields(project))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        project: &str,
        body: &RequestFields,
        query: &RequestFields,
    ) -> Result<Issue> {
        // Required fields may come from the body or the query string.
        let required = |field: IssueField| {
            body.present_text(field.to_str())
                .or_else(|| query.present_text(field.to_str()))
        };

        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            required(IssueField::IssueTitle),
            required(IssueField::IssueText),
            required(IssueField::CreatedBy),
        ) else {
            return Err(DomainError::RequiredFieldsMissing);
        };

        let project = match project {
            "" => ctx.config.default_project.clone(),
            project => project.to_owned(),
        };
        let now = current_timestamp();

        let issue = ctx
            .db_service
            .issues_create(NewIssue {
                project,
                issue_title,
                issue_text,
                created_on: now,
                updated_on: now,
                created_by,
                assigned_to: body
                    .present_text(IssueField::AssignedTo.to_str())
                    .unwrap_or_default(),
                open: true,
                status_text: body
                    .present_text(IssueField::StatusText.to_str())
                    .unwrap_or_default(),
            })
            .await?;

        info!(
            issue_id = %issue.id,
            project = %issue.project,
            "Created issue"
        );

        Ok(issue)
    }
}
