use serde::{Deserialize, Serialize};

/// 初期カラーパレット（24色）
///
/// サブスクリプション作成時に1色ずつ割り当てられ、プールから取り除かれる。
pub const DEFAULT_PALETTE: [&str; 24] = [
    "#FF5733", "#33FF57", "#3357FF", "#FF33A8", "#F5A623", "#8B572A", "#FF6F61", "#6B5B95",
    "#88B04B", "#F7CAC9", "#92A8D1", "#955251", "#B565A7", "#009688", "#3F51B5", "#CDDC39",
    "#FFC107", "#9C27B0", "#FF9800", "#795548", "#607D8B", "#E91E63", "#03A9F4", "#4CAF50",
];

/// カラープールの状態
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColorPoolStatus {
    /// 割り当て可能な色（挿入順）
    pub available: Vec<String>,
    /// 割り当て可能な色の数
    pub remaining: usize,
    /// パレット全体の色数
    pub palette_size: usize,
}

impl ColorPoolStatus {
    pub fn new(available: Vec<String>) -> Self {
        let remaining = available.len();
        Self {
            available,
            remaining,
            palette_size: DEFAULT_PALETTE.len(),
        }
    }

    /// すべての色が使用済みかどうか
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
