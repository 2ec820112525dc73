use async_trait::async_trait;
use issues_models::{Issue, IssueField, IssueFilter, RequestFields};
use shaku::{Component, Interface};
use tracing::debug;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListIssuesInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        project: &str,
        query: &RequestFields,
    ) -> Result<Vec<Issue>>;
}

#[derive(Component)]
#[shaku(interface = ListIssuesInterface)]
pub(crate) struct ListIssues;

#[async_trait]
impl ListIssuesInterface for ListIssues {
    #[tracing::instrument(skip(self, ctx, query), fields(project))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        project: &str,
        query: &RequestFields,
    ) -> Result<Vec<Issue>> {
        let filter = Self::build_filter(project, query);
        Ok(ctx.db_service.issues_find(&filter).await?)
    }
}

impl ListIssues {
    /// Build the issue filter from the present query fields.
    ///
    /// The route project always wins over a `project` query field.
    pub fn build_filter(project: &str, query: &RequestFields) -> IssueFilter {
        let mut filter = IssueFilter::new(project);

        for (name, value) in query.present_fields() {
            match IssueField::try_from(name) {
                Ok(IssueField::Project) => (),
                Ok(field) => filter.add_clause(field, value.to_text()),
                Err(_) => debug!(field = name, "Ignoring unknown filter field"),
            }
        }

        filter
    }
}
