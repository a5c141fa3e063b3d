use serde::{Deserialize, Serialize};

/// 表示するロゴ
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Logo {
    /// 取得できた画像
    Image {
        bytes: Vec<u8>,
        content_type: String,
    },
    /// 取得できなかった場合に表示する1文字
    Fallback { glyph: char },
}

impl Logo {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Logo::Fallback { .. })
    }
}

/// 名前から代替表示用の1文字を決める
///
/// 前後の空白を除いた名前の最初の文字。空の場合は `?`。
pub fn fallback_glyph(name: &str) -> char {
    name.trim().chars().next().unwrap_or('?')
}
