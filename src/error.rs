use thiserror::Error;

/// sbm統一エラー型
#[derive(Debug, Error)]
pub enum SbmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gitea API error: {message} (status: {status})")]
    GiteaApi { status: u16, message: String },

    #[error("Invalid repository format: {0}. Expected 'owner/repo' or 'owner/repo@ref'")]
    InvalidRepoFormat(String),

    #[error("Invalid burrito metadata: {0}")]
    InvalidManifest(String),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("{0}")]
    Sync(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SbmError>;
