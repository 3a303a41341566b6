//! sbm list コマンド
//!
//! ユーザーの resources / projects 配下の取り込み済みプロジェクトを
//! 一覧表示する。

use crate::config::AppConfig;
use crate::fs::{FileSystem, RealFs};
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::profile::UserProfile;
use crate::project::UserRoots;
use chrono::DateTime;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Parser)]
pub struct Args {
    /// Output in JSON format
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Output only project names
    #[arg(long, conflicts_with = "json")]
    pub simple: bool,
}

/// 一覧の1行
#[derive(Debug, Clone, Serialize)]
struct ProjectRow {
    name: String,
    flavor: String,
    version: String,
    created: String,
    store: String,
}

pub async fn run(args: Args) -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    let profile = UserProfile::resolve(&config.base_path).map_err(|e| e.to_string())?;
    let roots = UserRoots::new(&config.base_path, &profile.username);

    let fs = RealFs;
    let mut rows = Vec::new();

    for (store, root) in [
        ("resources", roots.resources_dir()),
        ("projects", roots.projects_dir()),
    ] {
        if !fs.exists(&root) {
            continue;
        }
        for entry in fs.read_dir(&root).map_err(|e| e.to_string())? {
            if !entry.is_dir() {
                continue;
            }
            rows.push(project_row(&fs, &entry.path, store));
        }
    }

    rows.sort_by(|a, b| a.name.cmp(&b.name));

    if args.json {
        print_json(&rows)?;
    } else if args.simple {
        print_simple(&rows);
    } else {
        print_table(&rows);
    }

    Ok(())
}

/// プロジェクトディレクトリを1行に変換
///
/// マニフェストが壊れていてもプレースホルダー行で一覧には残す。
fn project_row(fs: &dyn FileSystem, path: &Path, store: &str) -> ProjectRow {
    let dir_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "-".to_string());

    let manifest = fs
        .read_to_string(&path.join(MANIFEST_FILE))
        .ok()
        .and_then(|content| Manifest::parse(&content).ok());

    match manifest {
        Some(manifest) => ProjectRow {
            name: dir_name,
            flavor: manifest.burrito_type().label().to_string(),
            version: manifest.meta.version.clone(),
            created: format_date(manifest.meta.date_created.as_deref()),
            store: store.to_string(),
        },
        None => ProjectRow {
            name: dir_name,
            flavor: "-".to_string(),
            version: "-".to_string(),
            created: "-".to_string(),
            store: store.to_string(),
        },
    }
}

fn format_date(raw: Option<&str>) -> String {
    raw.and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_json(rows: &[ProjectRow]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn print_simple(rows: &[ProjectRow]) {
    for row in rows {
        println!("{}", row.name);
    }
    println!("\n{} project(s)", rows.len());
}

fn print_table(rows: &[ProjectRow]) {
    if rows.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Name", "Flavor", "Version", "Created", "Store"]);

    for row in rows {
        table.add_row([
            row.name.as_str(),
            row.flavor.as_str(),
            row.version.as_str(),
            row.created.as_str(),
            row.store.as_str(),
        ]);
    }

    println!("{table}");
    println!("{} project(s)", rows.len());
}
