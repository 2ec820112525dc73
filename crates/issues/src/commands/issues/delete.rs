use clap::Parser;
use issues_core::use_cases::issues::DeleteIssueInterface;
use issues_models::{IssueField, RequestFields};
use shaku::HasComponent;

use super::{render, write_json};
use crate::{commands::CommandContext, Result};

/// Delete an issue
#[derive(Parser)]
pub(crate) struct IssueDeleteCommand {
    /// Issue identifier
    id: String,
}

impl IssueDeleteCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let body = RequestFields::new().with(IssueField::Id.to_str(), self.id);

        let uc: &dyn DeleteIssueInterface = ctx.core_module.resolve_ref();
        let result = uc.run(&ctx.as_core_context(), &body).await;
        let output = render(result, |id| {
            Ok(serde_json::json!({"result": "successfully deleted", "_id": id}))
        })?;

        write_json(ctx, &output).await
    }
}
