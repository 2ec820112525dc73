use clap::Parser;
use issues_core::use_cases::issues::UpdateIssueInterface;
use issues_models::{IssueField, RequestFields};
use shaku::HasComponent;

use super::{parse_field, render, write_json};
use crate::{commands::CommandContext, Result};

/// Update an issue
#[derive(Parser)]
pub(crate) struct IssueUpdateCommand {
    /// Issue identifier
    id: String,
    /// Field to set (e.g. `status_text=In QA`)
    #[arg(long = "set", value_parser = parse_field)]
    values: Vec<(String, String)>,
}

impl IssueUpdateCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let body =
            RequestFields::from_text_pairs(self.values).with(IssueField::Id.to_str(), self.id);

        let uc: &dyn UpdateIssueInterface = ctx.core_module.resolve_ref();
        let result = uc.run(&ctx.as_core_context(), &body).await;
        let output = render(result, |id| {
            Ok(serde_json::json!({"result": "successfully updated", "_id": id}))
        })?;

        write_json(ctx, &output).await
    }
}
