//! Gitea コンテンツトランスポート
//!
//! リモートリポジトリからのファイル取得を抽象化する。コアが消費する
//! のは「ref のパスからファイルエントリを読む」と「ダウンロード URL
//! から本文を取る」の2つの能力のみ。

pub mod client;
pub mod repo;

pub use client::GiteaClient;
pub use repo::RepoRef;

use crate::error::Result;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// コンテンツ API が返すファイルエントリ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// リモートコンテンツトランスポート trait
///
/// 本番コードでは GiteaClient を使用する。テスト時にモックを注入できる。
pub trait ContentTransport: Send + Sync {
    /// ref のファイルエントリを読み取り、ダウンロード URL を得る
    fn read_content<'a>(
        &'a self,
        repo: &'a RepoRef,
        branch: &'a str,
        filepath: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ContentEntry>> + Send + 'a>>;

    /// ダウンロード URL から本文を取得
    fn fetch_body<'a>(
        &'a self,
        download_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}
