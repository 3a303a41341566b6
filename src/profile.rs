//! ユーザープロファイル
//!
//! プロジェクトストアはユーザー別に分かれるため、ローカルユーザー名の
//! 解決が両エントリパスの前提になる。

use crate::config::env_var;
use crate::error::{Result, SbmError};
use crate::project::APP_DIR;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// ユーザープロファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
}

impl UserProfile {
    /// プロファイルを解決
    ///
    /// 優先順位: 1. SBM_USER 環境変数, 2. `<base>/sbm/profile.json`,
    /// 3. USER 環境変数(この場合は初回として profile.json に保存)。
    pub fn resolve(base: &Path) -> Result<Self> {
        if let Some(username) = env_var("SBM_USER") {
            return Ok(Self { username });
        }

        let path = Self::path(base);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SbmError::Profile(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let username = env_var("USER").ok_or_else(|| {
                    SbmError::Profile(
                        "Unable to determine username. Set SBM_USER.".to_string(),
                    )
                })?;
                let profile = Self { username };
                profile.save(base)?;
                Ok(profile)
            }
            Err(e) => Err(SbmError::Io(e)),
        }
    }

    fn path(base: &Path) -> PathBuf {
        base.join(APP_DIR).join("profile.json")
    }

    /// プロファイルを保存
    pub fn save(&self, base: &Path) -> Result<()> {
        let path = Self::path(base);
        let parent = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;

        // 同じディレクトリに一時ファイルを作ってアトミックに置換
        let mut temp_file = NamedTempFile::new_in(parent)
            .map_err(|e| SbmError::Profile(format!("Failed to create temp file: {}", e)))?;
        let content = serde_json::to_string_pretty(self)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file
            .persist(&path)
            .map_err(|e| SbmError::Profile(format!("Failed to persist profile: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
