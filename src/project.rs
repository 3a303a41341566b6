//! プロジェクトの同定と配置
//!
//! プロジェクトの識別子は導出名である。ローカル取り込みでは取り込み元
//! フォルダの末尾セグメント、リモート同期ではリポジトリ名を使う。

use crate::fs::FileSystem;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// アプリケーションディレクトリ名
pub const APP_DIR: &str = "sbm";

/// 取り込み元パスからプロジェクト名を導出
///
/// ホストプラットフォームに関係なく `\` と `/` の両方で分割し、
/// 末尾の空でないセグメントを返す。末尾区切り文字は無視する。
pub fn derive_project_name(source: &str) -> Option<String> {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATORS.get_or_init(|| Regex::new(r"[\\/]+").expect("separator regex"));

    re.split(source)
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// 同名プロジェクトが既に存在するか
///
/// ファイルシステムへの純粋な存在確認で、副作用はない。
/// 検証の後、転送の前に必ず両エントリパスで実行される。
pub fn project_exists(fs: &dyn FileSystem, projects_root: &Path, name: &str) -> bool {
    fs.exists(&projects_root.join(name))
}

/// ユーザー別ディレクトリレイアウト
///
/// `<base>/sbm/users/<username>/` 配下に resources と projects を持つ。
#[derive(Debug, Clone)]
pub struct UserRoots {
    base: PathBuf,
    username: String,
}

impl UserRoots {
    pub fn new(base: impl Into<PathBuf>, username: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            username: username.into(),
        }
    }

    fn user_dir(&self) -> PathBuf {
        self.base.join(APP_DIR).join("users").join(&self.username)
    }

    /// ローカル取り込みの宛先ルート
    pub fn resources_dir(&self) -> PathBuf {
        self.user_dir().join("resources")
    }

    /// リモート同期の宛先ルート
    pub fn projects_dir(&self) -> PathBuf {
        self.user_dir().join("projects")
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;

#[cfg(test)]
#[path = "project_proptests.rs"]
mod proptests;
