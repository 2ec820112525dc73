use clap::Parser;
use issues_core::use_cases::issues::CreateIssueInterface;
use issues_models::{IssueField, RequestFields};
use shaku::HasComponent;

use super::{render, write_json};
use crate::{commands::CommandContext, Result};

/// Create an issue
#[derive(Parser)]
pub(crate) struct IssueCreateCommand {
    /// Project name
    project: String,
    /// Issue title
    #[arg(long)]
    title: String,
    /// Issue text
    #[arg(long)]
    text: String,
    /// Issue author
    #[arg(long)]
    created_by: String,
    /// Assignee
    #[arg(long, default_value = "")]
    assigned_to: String,
    /// Status text
    #[arg(long, default_value = "")]
    status_text: String,
}

impl IssueCreateCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let body = RequestFields::new()
            .with(IssueField::IssueTitle.to_str(), self.title)
            .with(IssueField::IssueText.to_str(), self.text)
            .with(IssueField::CreatedBy.to_str(), self.created_by)
            .with(IssueField::AssignedTo.to_str(), self.assigned_to)
            .with(IssueField::StatusText.to_str(), self.status_text);

        let uc: &dyn CreateIssueInterface = ctx.core_module.resolve_ref();
        let result = uc
            .run(
                &ctx.as_core_context(),
                &self.project,
                &body,
                &RequestFields::new(),
            )
            .await;
        let output = render(result, |issue| Ok(serde_json::to_value(issue)?))?;

        write_json(ctx, &output).await
    }
}
