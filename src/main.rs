mod cli;
mod commands;
mod config;
mod error;
mod fs;
mod gitea;
mod helps;
mod import;
mod manifest;
mod notify;
mod output;
mod profile;
mod progress;
mod project;
mod sync;
mod transfer;
mod tui;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
