//! sbm sync コマンド
//!
//! Gitea リポジトリのブランチからプロジェクトをユーザーの projects
//! 配下へ同期する。進捗はトラッカーのスナップショットでバーに反映する。

use crate::config::AppConfig;
use crate::fs::{FileSystem, RealFs};
use crate::gitea::{GiteaClient, RepoRef};
use crate::output;
use crate::profile::UserProfile;
use crate::project::UserRoots;
use crate::sync::{RemoteSync, SyncOutcome};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Parser)]
pub struct Args {
    /// Repository in owner/repo or owner/repo@ref format
    pub source: String,

    /// Branch or ref to sync from (overrides @ref)
    #[arg(long)]
    pub branch: Option<String>,

    /// Gitea access token (falls back to GITEA_TOKEN)
    #[arg(long)]
    pub token: Option<String>,
}

pub async fn run(args: Args) -> Result<(), String> {
    // 1. 設定とプロファイルを解決
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    let profile = UserProfile::resolve(&config.base_path).map_err(|e| e.to_string())?;
    let roots = UserRoots::new(&config.base_path, &profile.username);
    let projects_root = roots.projects_dir();

    let fs = RealFs;
    fs.create_dir_all(&projects_root).map_err(|e| e.to_string())?;

    // 2. リポジトリ参照とクライアント
    let repo = RepoRef::parse(&args.source).map_err(|e| e.to_string())?;
    let branch = args
        .branch
        .clone()
        .unwrap_or_else(|| repo.ref_or_default().to_string());

    let mut client = GiteaClient::new(&config.gitea_url);
    if let Some(token) = &args.token {
        client = client.with_token(token.as_str());
    }

    println!("Syncing {}@{} ...", repo.full_name(), branch);

    // 3. 同期実行(バーはトラッカーのスナップショットに追従する)
    let bar = sync_bar();
    let mut sync = RemoteSync::new(&client, &fs);
    let report = sync
        .run(&repo, &branch, &profile.username, &projects_root, |state| {
            if state.sync_started {
                bar.set_length(state.total_files as u64);
                bar.set_position(state.completed_files as u64);
            }
        })
        .await;
    bar.finish_and_clear();

    // 4. 結果表示
    output::print_notifications(&report.notifications);
    match report.outcome {
        SyncOutcome::Succeeded {
            project_name,
            dest,
            duplicate,
        } => {
            if duplicate {
                println!("  replaced existing project '{}'", project_name);
            }
            println!("  -> {}", dest.display());
            Ok(())
        }
        SyncOutcome::Failed { .. } => Err("sync failed".to_string()),
    }
}

fn sync_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}
