//! アプリケーション設定とHTTP設定

use crate::error::{Result, SbmError};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// デフォルトの Gitea ベース URL
pub const DEFAULT_GITEA_URL: &str = "https://git.door43.org";

/// 環境変数を取得(空文字列は None として扱う)
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// タイムアウト(秒)
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: "sbm-cli".to_string(),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_else(|_| Client::new())
    }
}

/// config.toml のスキーマ
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    base_path: Option<PathBuf>,
    #[serde(default)]
    gitea_url: Option<String>,
}

/// アプリケーション設定
///
/// 優先順位: 環境変数 > `~/.config/sbm/config.toml` > デフォルト。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// プロジェクトストアのベースパス
    pub base_path: PathBuf,
    /// 同期先 Gitea のベース URL
    pub gitea_url: String,
}

impl AppConfig {
    /// デフォルトの場所から設定を読み込み
    pub fn load() -> Result<Self> {
        let home = env_var("HOME").ok_or_else(|| {
            SbmError::Config("HOME environment variable not set".to_string())
        })?;
        let config_path = PathBuf::from(&home)
            .join(".config")
            .join("sbm")
            .join("config.toml");
        Self::load_with(&config_path, PathBuf::from(home))
    }

    /// 設定ファイルパスとフォールバックベースを指定して読み込み
    fn load_with(config_path: &std::path::Path, fallback_base: PathBuf) -> Result<Self> {
        let file = match std::fs::read_to_string(config_path) {
            Ok(content) => toml::from_str::<ConfigFile>(&content).map_err(|e| {
                SbmError::Config(format!(
                    "Failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ConfigFile::default(),
            Err(e) => return Err(SbmError::Io(e)),
        };

        let base_path = env_var("SBM_BASE")
            .map(PathBuf::from)
            .or(file.base_path)
            .unwrap_or(fallback_base);

        let gitea_url = env_var("SBM_GITEA_URL")
            .or(file.gitea_url)
            .unwrap_or_else(|| DEFAULT_GITEA_URL.to_string());

        Ok(Self {
            base_path,
            gitea_url,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
