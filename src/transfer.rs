//! リソース転送エンジン
//!
//! burrito の内容を正規のプロジェクトレイアウトへコピーする。
//! audio 専用プロジェクトのための再配置ルールを持つ。

use crate::error::{Result, SbmError};
use crate::fs::FileSystem;
use crate::manifest::{BurritoType, MANIFEST_FILE};
use std::path::{Path, PathBuf};

/// 転送の結果
#[derive(Debug, Clone)]
pub struct Transferred {
    /// コピー先ディレクトリ
    pub dest: PathBuf,
    /// audio 再配置ブランチを通ったか
    pub audio_restructured: bool,
}

/// burrito の内容を宛先ルート配下へ転送
///
/// 1. audio 翻訳でかつ取り込み元に `audio` サブフォルダが無い場合のみ、
///    宛先は `dest_root/name/audio`。それ以外は `dest_root/name`。
/// 2. 再帰コピー(既存ファイルは上書き — 明示的に確認済みの上書き動作)。
/// 3. audio ブランチを通った場合、コピー完了後に metadata.json を
///    プロジェクト直下へ戻す。マニフェストは常に
///    `dest_root/name/metadata.json` に置かれ、`audio/` 配下には残らない。
///
/// コピー途中の失敗で部分的にコピーされたファイルのロールバックは行わない。
pub fn transfer(
    fs: &dyn FileSystem,
    source: &Path,
    dest_root: &Path,
    project_name: &str,
    burrito_type: &BurritoType,
) -> Result<Transferred> {
    // Text を持つプロジェクトは 'audio' フォルダを持つ。audio 専用
    // burrito は持たないため、宛先側でフォルダを補う。
    let restructure =
        burrito_type.is_audio_translation() && !fs.exists(&source.join("audio"));

    let project_dir = dest_root.join(project_name);
    let dest = if restructure {
        project_dir.join("audio")
    } else {
        project_dir.clone()
    };

    fs.copy_dir(source, &dest, true)
        .map_err(|e| SbmError::Transfer(format!("copy to {} failed: {}", dest.display(), e)))?;

    // コピーが確実に成功した後にのみ実行する軽量なメタデータ修正
    if restructure {
        let nested = dest.join(MANIFEST_FILE);
        let top = project_dir.join(MANIFEST_FILE);
        fs.rename(&nested, &top).map_err(|e| {
            SbmError::Transfer(format!("relocate {} failed: {}", MANIFEST_FILE, e))
        })?;
    }

    Ok(Transferred {
        dest,
        audio_restructured: restructure,
    })
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
