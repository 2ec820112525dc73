use clap::Parser;
use issues_core::use_cases::issues::ListIssuesInterface;
use issues_models::RequestFields;
use shaku::HasComponent;

use super::{parse_field, render, write_json};
use crate::{commands::CommandContext, Result};

/// List issues of a project
#[derive(Parser)]
pub(crate) struct IssueListCommand {
    /// Project name
    project: String,
    /// Equality filter (e.g. `open=false`)
    #[arg(long = "filter", value_parser = parse_field)]
    filters: Vec<(String, String)>,
}

impl IssueListCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let query = RequestFields::from_text_pairs(self.filters);

        let uc: &dyn ListIssuesInterface = ctx.core_module.resolve_ref();
        let result = uc
            .run(&ctx.as_core_context(), &self.project, &query)
            .await;
        let output = render(result, |issues| Ok(serde_json::to_value(issues)?))?;

        write_json(ctx, &output).await
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use crate::testutils::{create_issue, test_command, CommandContextTest};

    #[tokio::test]
    async fn run_no_issues() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["issues", "list", "apitest"]).await,
            "[]\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_with_filters() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        create_issue(&ctx, "apitest", "First", true).await?;
        create_issue(&ctx, "apitest", "Second", false).await?;
        create_issue(&ctx, "other", "Third", false).await?;

        let output =
            test_command(ctx, &["issues", "list", "apitest", "--filter", "open=false"]).await;
        let issues: Value = serde_json::from_str(&output)?;

        assert_eq!(issues.as_array().map(Vec::len), Some(1));
        assert_eq!(issues[0]["issue_title"], "Second");

        Ok(())
    }
}
