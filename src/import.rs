//! ローカル取り込みオーケストレーター
//!
//! ローカルフォルダから burrito リソースを取り込む。確認待ちを
//! コールバックではなく2段階の明示的な操作として表す:
//! `plan_import` が計画(または却下)を返し、呼び出し側が保持した
//! `PendingImport` を `confirm_import` に渡したときにだけ転送が走る。
//!
//! ## 状態遷移
//!
//! ```text
//! idle → checkingManifest → resolvingDuplicate
//!      → {awaitingConfirmation | transferring} → idle
//! ```

use crate::error::Result;
use crate::fs::FileSystem;
use crate::manifest::{self, BurritoType, Manifest, MANIFEST_FILE};
use crate::notify::{Notification, Severity};
use crate::project;
use crate::transfer;
use std::path::{Path, PathBuf};

/// 取り込み計画の却下理由
///
/// マニフェストが存在しない場合と、存在するが不正な場合は
/// 別の条件であり、呼び出し側は別々に分岐しなければならない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ManifestMissing,
    ManifestInvalid,
}

impl Rejection {
    /// ユーザー向け通知に変換
    pub fn notification(&self) -> Notification {
        match self {
            Rejection::ManifestMissing => Notification::new(
                "Resource",
                "Unable to find burrito file (metadata.json).",
                Severity::Warning,
            ),
            Rejection::ManifestInvalid => Notification::new(
                "Resource",
                "Invalid burrito file (metadata.json).",
                Severity::Error,
            ),
        }
    }
}

/// 確認と転送の間で呼び出し側が保持する取り込みパラメータ
#[derive(Debug, Clone)]
pub struct PendingImport {
    pub source: PathBuf,
    pub projects_root: PathBuf,
    pub project_name: String,
    pub burrito_type: BurritoType,
    pub duplicate: bool,
}

/// 取り込み計画
#[derive(Debug)]
pub enum ImportPlan {
    /// 却下: 転送は実行されない
    Rejected(Rejection),
    /// 重複なし: そのまま転送してよい
    Ready(PendingImport),
    /// 同名プロジェクトが存在: 明示的な確認があるまで転送しない
    NeedsConfirmation(PendingImport),
}

/// 取り込みの結末
#[derive(Debug)]
pub enum ImportOutcome {
    Succeeded { dest: PathBuf },
    Failed { error: String },
}

/// 取り込みレポート
#[derive(Debug)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub notifications: Vec<Notification>,
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ImportOutcome::Succeeded { .. })
    }

    pub(crate) fn failed(subject: &str, error: String) -> Self {
        Self {
            notifications: vec![Notification::new(subject, error.clone(), Severity::Error)],
            outcome: ImportOutcome::Failed { error },
        }
    }
}

/// 取り込みを計画
///
/// マニフェストを探して検証し、重複を解決する。この順序は固定で、
/// 検証と重複確認の両方を通るまで転送は決して実行されない。
pub fn plan_import(
    fs: &dyn FileSystem,
    source: &Path,
    projects_root: &Path,
) -> Result<ImportPlan> {
    let manifest_path = source.join(MANIFEST_FILE);
    if !fs.exists(&manifest_path) {
        return Ok(ImportPlan::Rejected(Rejection::ManifestMissing));
    }

    let Ok(document) = fs.read_to_string(&manifest_path) else {
        return Ok(ImportPlan::Rejected(Rejection::ManifestInvalid));
    };
    let Ok(parsed) = Manifest::parse(&document) else {
        return Ok(ImportPlan::Rejected(Rejection::ManifestInvalid));
    };

    let label = manifest_path.to_string_lossy().to_string();
    if !manifest::validate("metadata", &label, &document, &parsed.meta.version) {
        return Ok(ImportPlan::Rejected(Rejection::ManifestInvalid));
    }

    // 末尾セグメントの導出は両区切り文字で行う(基底名取得は Windows
    // パスで壊れるため)
    let project_name = project::derive_project_name(&source.to_string_lossy())
        .ok_or_else(|| {
            crate::error::SbmError::Sync(format!(
                "Cannot derive project name from {}",
                source.display()
            ))
        })?;

    let duplicate = project::project_exists(fs, projects_root, &project_name);

    let pending = PendingImport {
        source: source.to_path_buf(),
        projects_root: projects_root.to_path_buf(),
        project_name,
        burrito_type: parsed.burrito_type(),
        duplicate,
    };

    if pending.duplicate {
        Ok(ImportPlan::NeedsConfirmation(pending))
    } else {
        Ok(ImportPlan::Ready(pending))
    }
}

/// 計画された取り込みを実行
///
/// 失敗はレポート内の通知に変換され、ハードフォールトとしては
/// 伝播しない。
pub fn confirm_import(fs: &dyn FileSystem, pending: PendingImport) -> ImportReport {
    match transfer::transfer(
        fs,
        &pending.source,
        &pending.projects_root,
        &pending.project_name,
        &pending.burrito_type,
    ) {
        Ok(transferred) => ImportReport {
            notifications: vec![Notification::new(
                "Resource",
                "Resource imported successfully.",
                Severity::Success,
            )],
            outcome: ImportOutcome::Succeeded {
                dest: transferred.dest,
            },
        },
        Err(e) => ImportReport::failed("Resource", e.to_string()),
    }
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
