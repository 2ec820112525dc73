use std::sync::Arc;

use clap::Parser;
use issues_config::{Config, DatabaseDriver};
use issues_core::CoreModule;
use issues_database_interface::DbService;
use issues_database_memory::MemoryDb;
use issues_database_pg::{establish_pool_connection, run_migrations, PostgresDb};
use issues_sentry::with_sentry_configuration;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService> = {
                if config.database.driver == DatabaseDriver::Postgres {
                    info!("Using PostgresDb database driver");

                    let pool = establish_pool_connection(&config).await?;
                    run_migrations(&pool).await?;

                    Box::new(PostgresDb::new(pool))
                } else {
                    info!("Using MemoryDb database driver");
                    Box::new(MemoryDb::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                db_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config, || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        actix_rt::System::with_tokio_rt(move || runtime).block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
