use clap::Parser;
use user_registry::cli::{self, tables::TableAction, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::CreateTables => cli::tables::run(TableAction::Create).await,
        Command::DropTables => cli::tables::run(TableAction::Drop).await,
    }
}
