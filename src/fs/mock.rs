//! テスト用モックファイルシステム

use super::*;
use std::collections::HashMap;
use std::sync::RwLock;

/// テスト用モックファイルシステム
pub struct MockFs {
    files: RwLock<HashMap<String, MockFile>>,
}

struct MockFile {
    content: Vec<u8>,
    file_type: FsFileType,
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// ファイルを追加
    pub fn add_file(&self, path: &str, content: &str) {
        self.files.write().unwrap().insert(
            path.to_string(),
            MockFile {
                content: content.as_bytes().to_vec(),
                file_type: FsFileType::File,
            },
        );
    }

    /// ディレクトリを追加
    pub fn add_dir(&self, path: &str) {
        self.files.write().unwrap().insert(
            path.to_string(),
            MockFile {
                content: Vec::new(),
                file_type: FsFileType::Dir,
            },
        );
    }

    /// ファイル内容を取得(テストのアサーション用)
    pub fn file_content(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .filter(|f| f.file_type == FsFileType::File)
            .map(|f| String::from_utf8_lossy(&f.content).to_string())
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFs {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .contains_key(path.to_string_lossy().as_ref())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .map(|f| f.file_type == FsFileType::Dir)
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(&path.to_string_lossy());
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dst: &Path, overwrite: bool) -> Result<()> {
        let src_str = src.to_string_lossy().to_string();
        let dst_str = dst.to_string_lossy().to_string();

        // 同一/子孫パスチェック
        if dst_str.starts_with(&src_str) {
            return Err(crate::error::SbmError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Cannot copy directory into itself or its subdirectory",
            )));
        }

        let files = self.files.read().unwrap();
        let entries_to_copy: Vec<_> = files
            .iter()
            .filter(|(path, _)| path.starts_with(&src_str))
            .map(|(path, file)| {
                let relative = path.strip_prefix(&src_str).unwrap_or(path);
                let new_path = format!("{}{}", dst_str, relative);
                (new_path, file.content.clone(), file.file_type)
            })
            .collect();
        drop(files);

        let mut files = self.files.write().unwrap();
        files.insert(
            dst_str,
            MockFile {
                content: Vec::new(),
                file_type: FsFileType::Dir,
            },
        );
        for (new_path, content, file_type) in entries_to_copy {
            if !overwrite && files.contains_key(&new_path) {
                continue;
            }
            files.insert(new_path, MockFile { content, file_type });
        }

        Ok(())
    }

    fn rename(&self, src: &Path, dst: &Path) -> Result<()> {
        let mut files = self.files.write().unwrap();
        match files.remove(src.to_string_lossy().as_ref()) {
            Some(file) => {
                files.insert(dst.to_string_lossy().to_string(), file);
                Ok(())
            }
            None => Err(crate::error::SbmError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not found",
            ))),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .map(|f| String::from_utf8_lossy(&f.content).to_string())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found").into())
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.files.write().unwrap().insert(
            path.to_string_lossy().to_string(),
            MockFile {
                content: content.to_vec(),
                file_type: FsFileType::File,
            },
        );
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let path_str = path.to_string_lossy().to_string();
        let files = self.files.read().unwrap();

        if let Some(file) = files.get(&path_str) {
            if file.file_type != FsFileType::Dir {
                return Err(crate::error::SbmError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "Not a directory",
                )));
            }
        }

        let prefix = if path_str.ends_with('/') {
            path_str.clone()
        } else {
            format!("{}/", path_str)
        };

        // 直接の子のみ(サブディレクトリの中身は除外)
        let entries: Vec<_> = files
            .iter()
            .filter(|(k, _)| {
                if !k.starts_with(&prefix) {
                    return false;
                }
                let remainder = &k[prefix.len()..];
                !remainder.contains('/')
            })
            .map(|(k, v)| FsDirEntry {
                path: PathBuf::from(k),
                file_type: v.file_type,
            })
            .collect();

        Ok(entries)
    }
}
