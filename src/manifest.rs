//! Scripture Burrito メタデータ
//!
//! burrito パッケージの `metadata.json` を表すモデルとバリデーション。
//! マニフェストは読み込み後は不変で、転送動作の唯一の情報源となる。

use crate::error::{Result, SbmError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// マニフェストのファイル名
pub const MANIFEST_FILE: &str = "metadata.json";

/// バリデーション対象のスキーマを持つバージョン
const SUPPORTED_VERSIONS: [&str; 2] = ["0.3.0", "1.0.0"];

/// metadata.json のスキーマ
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub meta: Meta,
    #[serde(default)]
    pub identification: Option<Identification>,
    #[serde(default, rename = "type")]
    pub type_section: Option<TypeSection>,
    #[serde(default)]
    pub ingredients: BTreeMap<String, Ingredient>,
}

/// meta セクション
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub version: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "dateCreated")]
    pub date_created: Option<String>,
    #[serde(default, rename = "defaultLocale")]
    pub default_locale: Option<String>,
}

/// identification セクション(ロケール別の表示名)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identification {
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    #[serde(default)]
    pub abbreviation: BTreeMap<String, String>,
}

/// type セクション(flavor 分類)
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSection {
    #[serde(rename = "flavorType")]
    pub flavor_type: FlavorType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorType {
    pub name: String,
    #[serde(default)]
    pub flavor: Option<Flavor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Flavor {
    pub name: String,
}

/// ingredients の1エントリ(コンテンツファイル記述子)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ingredient {
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub checksum: Option<serde_json::Value>,
    #[serde(default)]
    pub scope: Option<serde_json::Value>,
}

/// burrito の分類
///
/// audio 変種は転送先レイアウトを変える(転送エンジン参照)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurritoType {
    Scripture,
    AudioTranslation,
    OpenBibleStories,
    Other(String),
}

impl BurritoType {
    /// audio 専用プロジェクトかどうか
    pub fn is_audio_translation(&self) -> bool {
        matches!(self, BurritoType::AudioTranslation)
    }

    /// 表示用ラベル
    pub fn label(&self) -> &str {
        match self {
            BurritoType::Scripture => "scripture",
            BurritoType::AudioTranslation => "scripture / audioTranslation",
            BurritoType::OpenBibleStories => "obs",
            BurritoType::Other(label) => label,
        }
    }
}

impl std::fmt::Display for BurritoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Manifest {
    /// JSONからパース
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SbmError::InvalidManifest(format!("Failed to parse metadata.json: {}", e)))
    }

    /// ingredients のエントリ数
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// type セクションから分類を導出
    pub fn burrito_type(&self) -> BurritoType {
        let Some(section) = &self.type_section else {
            return BurritoType::Other("unknown".to_string());
        };
        let flavor = section
            .flavor_type
            .flavor
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("");
        match flavor {
            "audioTranslation" => BurritoType::AudioTranslation,
            "textTranslation" => BurritoType::Scripture,
            "textStories" => BurritoType::OpenBibleStories,
            _ => BurritoType::Other(format!("{} / {}", section.flavor_type.name, flavor)),
        }
    }

    /// identification から表示名を導出
    ///
    /// defaultLocale のエントリ、なければ "en"、なければ最初のエントリ。
    pub fn project_name(&self) -> Option<String> {
        let identification = self.identification.as_ref()?;
        let names = &identification.name;

        if let Some(locale) = &self.meta.default_locale {
            if let Some(name) = names.get(locale) {
                return Some(name.clone());
            }
        }
        if let Some(name) = names.get("en") {
            return Some(name.clone());
        }
        names.values().next().cloned()
    }
}

/// マニフェスト文書をバリデーション
///
/// 宣言バージョンでスキーマを選択し、必須フィールドを確認する。
/// スキーマ不一致、JSON不正、必須フィールド欠落のいずれも false を
/// 返す(例外にはしない)。呼び出し側が警告として表示する責務を持つ。
pub fn validate(kind: &str, _source_label: &str, document: &str, declared_version: &str) -> bool {
    if kind != "metadata" {
        return false;
    }

    // 宣言バージョンにスキーマがなければ不合格
    if !SUPPORTED_VERSIONS.contains(&declared_version) {
        return false;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(document) else {
        return false;
    };

    // 文書内バージョンと宣言バージョンの一致を要求
    let declared_matches = value
        .pointer("/meta/version")
        .and_then(|v| v.as_str())
        .map(|v| v == declared_version)
        .unwrap_or(false);
    if !declared_matches {
        return false;
    }

    // ingredients はオブジェクトとして存在しなければならない
    if !value.get("ingredients").map(|v| v.is_object()).unwrap_or(false) {
        return false;
    }

    Manifest::parse(document).is_ok()
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
