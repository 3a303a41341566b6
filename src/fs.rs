//! ファイルシステム抽象化
//!
//! プロジェクト全体で使用するファイルシステム操作の抽象化レイヤー。
//! テスト時に MockFs を注入してファイル操作をモック化できる。

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ファイル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsFileType {
    File,
    Dir,
}

/// ファイルシステム抽象化のための独自 DirEntry
#[derive(Debug, Clone)]
pub struct FsDirEntry {
    pub path: PathBuf,
    pub file_type: FsFileType,
}

impl FsDirEntry {
    /// ディレクトリかどうか
    pub fn is_dir(&self) -> bool {
        self.file_type == FsFileType::Dir
    }

    /// ファイルかどうか
    pub fn is_file(&self) -> bool {
        self.file_type == FsFileType::File
    }
}

/// ファイルシステム操作を抽象化するトレイト
///
/// テスト時に MockFs を注入してファイル操作をモック化できる。
/// 本番コードでは RealFs を使用する。
pub trait FileSystem: Send + Sync {
    /// パスが存在するか
    fn exists(&self, path: &Path) -> bool;

    /// ディレクトリかどうか
    fn is_dir(&self, path: &Path) -> bool;

    /// ディレクトリを再帰的に作成
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// ディレクトリを再帰的にコピー
    ///
    /// - 宛先ディレクトリにマージ
    /// - `overwrite: true` なら既存ファイルを上書き、false なら既存ファイルを残す
    /// - 同一/子孫パスへのコピーは Err
    fn copy_dir(&self, src: &Path, dst: &Path, overwrite: bool) -> Result<()>;

    /// ファイルまたはディレクトリを移動(リネーム)
    fn rename(&self, src: &Path, dst: &Path) -> Result<()>;

    /// ファイル内容を読み込み
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// ファイルに書き込み
    ///
    /// - 親ディレクトリは自動作成
    /// - 既存ファイルは上書き
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// ディレクトリ内のエントリを取得
    ///
    /// - 順序は未定義
    /// - 引数がディレクトリでない場合は Err
    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>>;
}

/// 本番用ファイルシステム実装
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dst: &Path, overwrite: bool) -> Result<()> {
        // 同一/子孫パスチェック
        if let (Ok(src_canonical), Ok(dst_canonical)) = (src.canonicalize(), dst.canonicalize()) {
            if dst_canonical.starts_with(&src_canonical) {
                return Err(crate::error::SbmError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "Cannot copy directory into itself or its subdirectory",
                )));
            }
        }

        std::fs::create_dir_all(dst)?;

        for entry in WalkDir::new(src).min_depth(1) {
            let entry = entry.map_err(|e| {
                crate::error::SbmError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    e.to_string(),
                ))
            })?;
            let relative = entry.path().strip_prefix(src).map_err(|e| {
                crate::error::SbmError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    e.to_string(),
                ))
            })?;
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                if !overwrite && target.exists() {
                    continue;
                }
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(entry.path(), &target)?;
            }
        }

        Ok(())
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<()> {
        std::fs::rename(src, dst)?;
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        // 親ディレクトリを作成
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let file_type = if metadata.is_dir() {
                FsFileType::Dir
            } else {
                FsFileType::File
            };
            entries.push(FsDirEntry {
                path: entry.path(),
                file_type,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
