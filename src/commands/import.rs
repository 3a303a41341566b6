//! sbm import コマンド
//!
//! ローカルフォルダの burrito リソースをユーザーの resources 配下へ
//! 取り込む。同名プロジェクトがある場合は確認ダイアログを挟む。

use crate::config::AppConfig;
use crate::fs::{FileSystem, RealFs};
use crate::helps;
use crate::import::{self, ImportOutcome, ImportPlan, ImportReport};
use crate::output;
use crate::profile::UserProfile;
use crate::project::UserRoots;
use crate::tui;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to the resource folder
    pub path: String,

    /// Resource kind to import
    #[arg(long, value_enum, default_value_t = ResourceKind::Burrito)]
    pub kind: ResourceKind,

    /// Replace an existing project without asking
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceKind {
    /// Scripture burrito resource (bible, obs, audio)
    Burrito,
    /// Door43 helps resource (TN, TW, TQ, TA)
    Helps,
}

pub async fn run(args: Args) -> Result<(), String> {
    // 1. 設定とプロファイルを解決
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    let profile = UserProfile::resolve(&config.base_path).map_err(|e| e.to_string())?;
    let roots = UserRoots::new(&config.base_path, &profile.username);
    let resources_root = roots.resources_dir();

    let fs = RealFs;
    fs.create_dir_all(&resources_root).map_err(|e| e.to_string())?;

    // 2. helps リソースは独自の取り込みルートを通る
    if args.kind == ResourceKind::Helps {
        let report = helps::upload_local_helps(&fs, Path::new(&args.path), &resources_root);
        return finish(report);
    }

    // 3. 取り込み計画
    let plan = import::plan_import(&fs, Path::new(&args.path), &resources_root)
        .map_err(|e| e.to_string())?;

    let pending = match plan {
        ImportPlan::Rejected(rejection) => {
            output::print_notification(&rejection.notification());
            return Err("import rejected".to_string());
        }
        ImportPlan::Ready(pending) => pending,
        ImportPlan::NeedsConfirmation(pending) => {
            // 明示的な確認が得られるまで転送は実行しない
            let confirmed = args.yes
                || tui::confirm(
                    "Replace resource",
                    &format!(
                        "Project '{}' already exists. Replace it?",
                        pending.project_name
                    ),
                    "Replace",
                )
                .map_err(|e| e.to_string())?;

            if !confirmed {
                println!("Import cancelled.");
                return Ok(());
            }
            pending
        }
    };

    // 4. 転送
    let spinner = loading_spinner();
    let report = import::confirm_import(&fs, pending);
    spinner.finish_and_clear();

    finish(report)
}

/// ローカルパス用の単純なローディング表示
fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} Importing...")
            .unwrap(),
    );
    spinner
}

fn finish(report: ImportReport) -> Result<(), String> {
    output::print_notifications(&report.notifications);
    match report.outcome {
        ImportOutcome::Succeeded { dest } => {
            println!("  -> {}", dest.display());
            Ok(())
        }
        ImportOutcome::Failed { .. } => Err("import failed".to_string()),
    }
}
