//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use issues_config::Config;
use issues_core::{CoreContext, CoreModule};
use issues_database_interface::DbService;
use tokio::sync::RwLock;

use self::{issues::IssuesCommand, server::ServerCommand};
use crate::Result;

mod issues;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService>,
    pub core_module: CoreModule,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Issues(IssuesCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Issues(sub) => sub.execute(ctx).await,
        }
    }
}
