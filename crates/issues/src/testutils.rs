use std::{io::Write, sync::Arc};

use clap::Parser;
use issues_config::Config;
use issues_core::CoreModule;
use issues_database_interface::DbService;
use issues_database_memory::MemoryDb;
use issues_models::{current_timestamp, Issue, NewIssue};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version().unwrap(),
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            writer,
        }
    }
}

pub(crate) async fn create_issue(
    ctx: &CommandContextTest,
    project: &str,
    title: &str,
    open: bool,
) -> issues_database_interface::Result<Issue> {
    let now = current_timestamp();

    ctx.db_service
        .issues_create(NewIssue {
            project: project.into(),
            issue_title: title.into(),
            issue_text: "Text".into(),
            created_on: now,
            updated_on: now,
            created_by: "Joe".into(),
            assigned_to: String::new(),
            open,
            status_text: String::new(),
        })
        .await
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["issues"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
