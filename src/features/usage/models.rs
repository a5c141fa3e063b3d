use crate::shared::utils::{format_usage_date, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 利用記録データモデル
///
/// 名前と色は記録時点のサブスクリプションからコピーされた表示用の値。
/// 集計の紐付けには `subscription_id` を使う。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UsageRecord {
    pub id: i64,
    /// 削除済み・旧データで紐付け不能な場合はNone
    pub subscription_id: Option<i64>,
    pub subscription_name: String,
    pub usage_date: NaiveDate,
    pub color: Option<String>,
}

/// 利用記録作成用DTO（UIで選択されたサブスクリプション）
#[derive(Debug, Deserialize, Clone)]
pub struct RecordUsageDto {
    pub subscription_ids: Vec<i64>,
}

/// 利用記録の日付による絞り込み条件
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UsageFilter {
    /// すべて
    #[default]
    All,
    /// 日付完全一致
    Date(NaiveDate),
    /// 年月の前方一致
    Month(YearMonth),
}

impl UsageFilter {
    /// usage_date に対するSQL条件とそのパラメータ（絞り込みなしの場合はNone）
    pub fn sql_condition(&self) -> Option<(&'static str, String)> {
        match self {
            UsageFilter::All => None,
            UsageFilter::Date(date) => Some(("usage_date = ?", format_usage_date(*date))),
            UsageFilter::Month(month) => Some((
                "usage_date LIKE ?",
                format!("{}%", month.usage_prefix()),
            )),
        }
    }
}
