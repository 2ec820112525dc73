//! Issue commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use issues_server::rejection_body;
use serde_json::Value;

use super::{Command, CommandContext};
use crate::Result;

mod create;
mod delete;
mod list;
mod update;

use self::{
    create::IssueCreateCommand, delete::IssueDeleteCommand, list::IssueListCommand,
    update::IssueUpdateCommand,
};

/// Manage issues
#[derive(Parser)]
pub(crate) struct IssuesCommand {
    #[clap(subcommand)]
    inner: IssuesSubCommand,
}

#[async_trait]
impl Command for IssuesCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let result = match self.inner {
            IssuesSubCommand::List(sub) => sub.run(&ctx).await,
            IssuesSubCommand::Create(sub) => sub.run(&ctx).await,
            IssuesSubCommand::Update(sub) => sub.run(&ctx).await,
            IssuesSubCommand::Delete(sub) => sub.run(&ctx).await,
        };

        ctx.db_service.close().await?;
        result
    }
}

#[derive(Subcommand)]
enum IssuesSubCommand {
    List(IssueListCommand),
    Create(IssueCreateCommand),
    Update(IssueUpdateCommand),
    Delete(IssueDeleteCommand),
}

/// Parse a `name=value` pair.
fn parse_field(input: &str) -> std::result::Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid field '{input}', expected 'name=value'"))
}

/// Render a use case outcome as the HTTP endpoint would.
fn render<T>(
    result: issues_core::Result<T>,
    on_success: impl FnOnce(T) -> Result<Value>,
) -> Result<Value> {
    match result {
        Ok(value) => on_success(value),
        Err(e) if e.is_rejection() => Ok(rejection_body(&e)),
        Err(e) => Err(e.into()),
    }
}

async fn write_json(ctx: &CommandContext, value: &Value) -> Result<()> {
    writeln!(
        ctx.writer.write().await,
        "{}",
        serde_json::to_string_pretty(value)?
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_field;

    #[test]
    fn fields() {
        assert_eq!(
            parse_field("open=false"),
            Ok(("open".to_string(), "false".to_string()))
        );
        assert_eq!(
            parse_field("status_text=a=b"),
            Ok(("status_text".to_string(), "a=b".to_string()))
        );
        assert!(parse_field("open").is_err());
    }
}
