//! Gitea API クライアント

use super::{ContentEntry, ContentTransport, RepoRef};
use crate::config::{env_var, HttpConfig};
use crate::error::{Result, SbmError};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

/// Gitea トークンを取得
///
/// 優先順位: 1. 明示的に設定されたトークン, 2. GITEA_TOKEN 環境変数
fn resolve_token(explicit: Option<&str>) -> Option<String> {
    if let Some(token) = explicit {
        return Some(token.to_string());
    }
    env_var("GITEA_TOKEN")
}

/// Gitea API クライアント
pub struct GiteaClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GiteaClient {
    /// 新しいクライアントを作成
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HttpConfig::default().build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// トークンを設定
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn auth_token(&self) -> Option<String> {
        resolve_token(self.token.as_deref())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut req = self.client.get(url);

        if let Some(token) = self.auth_token() {
            req = req.header("Authorization", format!("token {}", token));
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SbmError::GiteaApi { status, message });
        }

        Ok(response)
    }
}

impl ContentTransport for GiteaClient {
    fn read_content<'a>(
        &'a self,
        repo: &'a RepoRef,
        branch: &'a str,
        filepath: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ContentEntry>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "{}/api/v1/repos/{}/{}/contents/{}?ref={}",
                self.base_url,
                repo.owner(),
                repo.name(),
                filepath,
                branch
            );

            let response = self.get(&url).await?;
            Ok(response.json::<ContentEntry>().await?)
        })
    }

    fn fetch_body<'a>(
        &'a self,
        download_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let response = self.get(download_url).await?;
            Ok(response.bytes().await?.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GiteaClient::new("https://git.door43.org/");
        assert_eq!(client.base_url, "https://git.door43.org");
    }

    #[test]
    fn test_explicit_token_wins() {
        assert_eq!(
            resolve_token(Some("abc123")),
            Some("abc123".to_string())
        );
    }
}
