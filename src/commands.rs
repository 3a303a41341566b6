use crate::cli::{Cli, Command};

pub mod import;
pub mod list;
pub mod sync;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Import(args) => import::run(args).await,
        Command::Sync(args) => sync::run(args).await,
        Command::List(args) => list::run(args).await,
    }
}
