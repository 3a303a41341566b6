//! Door43 helps リソースの取り込み
//!
//! burrito パイプラインとは別ルートで、Resource Container 形式の
//! helps リソース(TN, TW, TQ, TA)を resources 配下へ取り込む。
//! 検証はこのルートが独自に行う(`manifest.yaml` を要求する)。

use crate::fs::FileSystem;
use crate::import::{ImportOutcome, ImportReport};
use crate::notify::{Notification, Severity};
use serde::Deserialize;
use std::path::Path;

/// 対応する helps リソース識別子の接尾辞
const SUPPORTED_SUFFIXES: [&str; 4] = ["tn", "tw", "tq", "ta"];

/// Resource Container の manifest.yaml(必要な部分のみ)
#[derive(Debug, Deserialize)]
struct RcManifest {
    dublin_core: DublinCore,
}

#[derive(Debug, Deserialize)]
struct DublinCore {
    identifier: String,
    #[serde(default)]
    language: Option<RcLanguage>,
}

#[derive(Debug, Deserialize)]
struct RcLanguage {
    #[serde(default)]
    identifier: Option<String>,
}

/// helps リソースをアップロード
///
/// burrito 同様、失敗は通知としてレポートに載せて返す。
pub fn upload_local_helps(
    fs: &dyn FileSystem,
    source: &Path,
    resources_root: &Path,
) -> ImportReport {
    let manifest_path = source.join("manifest.yaml");
    if !fs.exists(&manifest_path) {
        return ImportReport {
            notifications: vec![Notification::new(
                "Resource",
                "Unable to find helps manifest (manifest.yaml).",
                Severity::Warning,
            )],
            outcome: ImportOutcome::Failed {
                error: "manifest.yaml not found".to_string(),
            },
        };
    }

    let parsed = fs
        .read_to_string(&manifest_path)
        .ok()
        .and_then(|content| serde_yaml::from_str::<RcManifest>(&content).ok());
    let Some(rc) = parsed else {
        return ImportReport::failed(
            "Resource",
            "Invalid helps manifest (manifest.yaml).".to_string(),
        );
    };

    let identifier = rc.dublin_core.identifier.to_lowercase();
    if !SUPPORTED_SUFFIXES
        .iter()
        .any(|suffix| identifier == *suffix || identifier.ends_with(&format!("_{}", suffix)))
    {
        return ImportReport::failed(
            "Resource",
            format!(
                "Unsupported helps resource '{}'. Supported: TN, TW, TQ, TA.",
                rc.dublin_core.identifier
            ),
        );
    }

    // プロジェクト名は <言語>_<識別子>
    let name = match rc
        .dublin_core
        .language
        .as_ref()
        .and_then(|l| l.identifier.as_deref())
    {
        Some(language) if !identifier.starts_with(&format!("{}_", language)) => {
            format!("{}_{}", language, identifier)
        }
        _ => identifier.clone(),
    };

    match fs.copy_dir(source, &resources_root.join(&name), true) {
        Ok(()) => ImportReport {
            notifications: vec![Notification::new(
                "Resource",
                format!("Helps resource '{}' imported successfully.", name),
                Severity::Success,
            )],
            outcome: ImportOutcome::Succeeded {
                dest: resources_root.join(&name),
            },
        },
        Err(e) => ImportReport::failed("Resource", e.to_string()),
    }
}

#[cfg(test)]
#[path = "helps_test.rs"]
mod tests;
