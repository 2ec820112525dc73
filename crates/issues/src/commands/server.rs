use async_trait::async_trait;
use clap::Parser;
use issues_server::server::{run_issue_server, AppContext};

use super::{Command, CommandContext};
use crate::Result;

/// Start server
#[derive(Parser)]
pub(crate) struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let context = AppContext::new(ctx.config, ctx.core_module, ctx.db_service);
        run_issue_server(context).await?;

        Ok(())
    }
}
