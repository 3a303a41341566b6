//! リポジトリ参照

use crate::error::{Result, SbmError};

/// Gitea リポジトリ参照
///
/// リモート同期ではリポジトリ名がそのままプロジェクト名になる。
#[derive(Debug, Clone)]
pub struct RepoRef {
    owner: String,
    name: String,
    git_ref: Option<String>,
}

impl RepoRef {
    /// 新しい RepoRef を作成
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            git_ref: None,
        }
    }

    /// ref を指定して RepoRef を作成
    pub fn with_ref(
        owner: impl Into<String>,
        name: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            git_ref: Some(git_ref.into()),
        }
    }

    /// "owner/repo" または "owner/repo@ref" 形式をパース
    pub fn parse(input: &str) -> Result<Self> {
        let (repo_part, git_ref) = match input.split_once('@') {
            Some((repo, ref_part)) => (repo, Some(ref_part.to_string())),
            None => (input, None),
        };

        let (owner, name) = repo_part
            .split_once('/')
            .ok_or_else(|| SbmError::InvalidRepoFormat(input.to_string()))?;

        let owner = owner.trim();
        let name = name.trim();

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(SbmError::InvalidRepoFormat(input.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            git_ref,
        })
    }

    /// オーナー名
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// リポジトリ名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Git ref(ブランチ/タグ)
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// 指定された ref、なければデフォルトブランチ
    pub fn ref_or_default(&self) -> &str {
        self.git_ref.as_deref().unwrap_or("master")
    }

    /// フルパス形式 (owner/repo)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
