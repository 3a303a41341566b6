use clap::{Parser, Subcommand};

use crate::commands::{import, list, sync};

#[derive(Debug, Parser)]
#[command(name = "sbm")]
#[command(about = "Scripture Burrito Sync CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// ローカルフォルダから burrito リソースを取り込み
    Import(import::Args),

    /// Gitea リポジトリからプロジェクトを同期
    Sync(sync::Args),

    /// 取り込み済みプロジェクトの一覧
    List(list::Args),
}
