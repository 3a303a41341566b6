//! リモート同期オーケストレーター
//!
//! Gitea リポジトリのブランチからプロジェクトを取り込む。
//!
//! ## 状態遷移
//!
//! ```text
//! idle → fetchingManifest → validating → {rejected | resolvingDuplicate}
//!      → transferring → {succeeded | failed} → idle
//! ```
//!
//! すべての失敗はオーケストレーター境界で捕捉され、通知と終端状態の
//! リセットに変換される。呼び出し側へハードフォールトは伝播しない。
//!
//! ## 使い方
//!
//! ```ignore
//! let client = GiteaClient::new("https://git.door43.org");
//! let mut sync = RemoteSync::new(&client, &RealFs);
//! let report = sync
//!     .run(&repo, "master", "alice", &projects_root, |state| {
//!         println!("{}/{}", state.completed_files, state.total_files);
//!     })
//!     .await;
//! ```

use crate::error::{Result, SbmError};
use crate::fs::FileSystem;
use crate::gitea::{ContentTransport, RepoRef};
use crate::manifest::{self, Manifest, MANIFEST_FILE};
use crate::notify::{Notification, Severity};
use crate::progress::{ProgressState, ProgressTracker};
use crate::project;
use crate::transfer;
use std::path::{Component, Path, PathBuf};

/// 同期セッション(リモートパス専用の一時的な集約)
///
/// 同期開始時に構築され、成功・失敗を問わず終了時に破棄される。
#[derive(Debug, Clone)]
pub struct SyncSession {
    pub repo: RepoRef,
    pub branch: String,
    pub manifest: Manifest,
    pub local_username: String,
    /// 追跡のみ。マージ処理はここでは実行されない
    pub merge_status: bool,
}

/// 同期の結末
#[derive(Debug)]
pub enum SyncOutcome {
    Succeeded {
        project_name: String,
        dest: PathBuf,
        /// 同名プロジェクトが既に存在したか(常に上書き取り込みされる)
        duplicate: bool,
    },
    Failed {
        error: String,
    },
}

/// 同期レポート
#[derive(Debug)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    pub notifications: Vec<Notification>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Succeeded { .. })
    }
}

/// リモート同期オーケストレーター
///
/// トラッカーとセッションの書き込みは常にこのインスタンスのみが行う。
pub struct RemoteSync<'a> {
    transport: &'a dyn ContentTransport,
    fs: &'a dyn FileSystem,
    progress: ProgressTracker,
    session: Option<SyncSession>,
}

impl<'a> RemoteSync<'a> {
    pub fn new(transport: &'a dyn ContentTransport, fs: &'a dyn FileSystem) -> Self {
        Self {
            transport,
            fs,
            progress: ProgressTracker::new(),
            session: None,
        }
    }

    /// 実行中に保持されるセッション(終了後は常に None)
    pub fn session(&self) -> Option<&SyncSession> {
        self.session.as_ref()
    }

    /// 現在の進捗スナップショット
    pub fn progress(&self) -> ProgressState {
        self.progress.snapshot()
    }

    /// 同期を実行
    ///
    /// `on_progress` はトラッカーが動くたびにスナップショットを受け取る。
    /// 結末に関わらずトラッカーはリセットされ、セッションは破棄される。
    pub async fn run<F>(
        &mut self,
        repo: &RepoRef,
        branch: &str,
        username: &str,
        projects_root: &Path,
        mut on_progress: F,
    ) -> SyncReport
    where
        F: FnMut(ProgressState),
    {
        let result = self
            .run_inner(repo, branch, username, projects_root, &mut on_progress)
            .await;

        // 結末に関わらず実行される後始末
        self.session = None;
        self.progress.reset();
        on_progress(self.progress.snapshot());

        match result {
            Ok((project_name, dest, duplicate)) => SyncReport {
                notifications: vec![Notification::new(
                    "Sync",
                    "Project sync successful",
                    Severity::Success,
                )],
                outcome: SyncOutcome::Succeeded {
                    project_name,
                    dest,
                    duplicate,
                },
            },
            Err(e) => {
                let error = e.to_string();
                SyncReport {
                    notifications: vec![Notification::new(
                        "Sync",
                        format!("Sync failed: {}", error),
                        Severity::Failure,
                    )],
                    outcome: SyncOutcome::Failed { error },
                }
            }
        }
    }

    async fn run_inner(
        &mut self,
        repo: &RepoRef,
        branch: &str,
        username: &str,
        projects_root: &Path,
        on_progress: &mut dyn FnMut(ProgressState),
    ) -> Result<(String, PathBuf, bool)> {
        // 1. ブランチからマニフェストを取得
        let document = self.fetch_document(repo, branch, MANIFEST_FILE).await?;

        // 2. バリデーション
        let parsed = Manifest::parse(&document)
            .map_err(|_| SbmError::Sync("Burrito Validation Failed".to_string()))?;
        let label = format!("{}/{}", repo.full_name(), MANIFEST_FILE);
        if !manifest::validate("metadata", &label, &document, &parsed.meta.version) {
            return Err(SbmError::Sync("Burrito Validation Failed".to_string()));
        }

        // 3. 進捗開始、セッション構築
        self.progress.begin(parsed.ingredient_count());
        on_progress(self.progress.snapshot());
        self.session = Some(SyncSession {
            repo: repo.clone(),
            branch: branch.to_string(),
            manifest: parsed.clone(),
            local_username: username.to_string(),
            merge_status: false,
        });

        // 4. 重複確認。フラグは結果へ渡すが制御フローは分岐しない
        //    (マージは未実装。重複は常に新規取り込みとして上書きされる)
        let duplicate = project::project_exists(self.fs, projects_root, repo.name());

        // 5. ingredient を staging に集めてから転送
        let staging = tempfile::tempdir()?;
        let staging_root = staging.path().join(repo.name());

        for ingredient in parsed.ingredients.keys() {
            let body = self.fetch_ingredient(repo, branch, ingredient).await?;
            let staged = staged_path(&staging_root, ingredient)?;
            self.fs.write(&staged, &body)?;
            self.progress.advance();
            on_progress(self.progress.snapshot());
        }
        self.fs
            .write(&staging_root.join(MANIFEST_FILE), document.as_bytes())?;

        let transferred = transfer::transfer(
            self.fs,
            &staging_root,
            projects_root,
            repo.name(),
            &parsed.burrito_type(),
        )?;

        // 終端ステップ
        self.progress.advance();
        on_progress(self.progress.snapshot());

        Ok((repo.name().to_string(), transferred.dest, duplicate))
    }

    /// マニフェスト文書を取得
    ///
    /// 読み取りが内容を返さない場合は "Failed to read MetaData"。
    /// トランスポート自体の失敗はそのまま伝播する。
    async fn fetch_document(
        &self,
        repo: &RepoRef,
        branch: &str,
        filepath: &str,
    ) -> Result<String> {
        let entry = self.transport.read_content(repo, branch, filepath).await?;
        let Some(url) = entry.download_url else {
            return Err(SbmError::Sync("Failed to read MetaData".to_string()));
        };
        let body = self.transport.fetch_body(&url).await?;
        if body.is_empty() {
            return Err(SbmError::Sync("Failed to read MetaData".to_string()));
        }
        Ok(String::from_utf8_lossy(&body).to_string())
    }

    async fn fetch_ingredient(
        &self,
        repo: &RepoRef,
        branch: &str,
        ingredient: &str,
    ) -> Result<Vec<u8>> {
        let entry = self
            .transport
            .read_content(repo, branch, ingredient)
            .await?;
        let Some(url) = entry.download_url else {
            return Err(SbmError::Sync(format!("Failed to read {}", ingredient)));
        };
        self.transport.fetch_body(&url).await
    }
}

/// staging 配下の ingredient パスを解決
///
/// マニフェスト由来のパスが staging の外へ出ないことを保証する。
fn staged_path(root: &Path, ingredient: &str) -> Result<PathBuf> {
    let rel = Path::new(ingredient);
    let escapes = rel.is_absolute()
        || rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        return Err(SbmError::Sync(format!(
            "Unsafe ingredient path: {}",
            ingredient
        )));
    }
    Ok(root.join(rel))
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
