use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 色が記録されていない利用記録の表示色
pub const FALLBACK_MARKING_COLOR: &str = "#999999";

/// カレンダーの1日分に表示する1件のマーク
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarMarking {
    pub color: String,
    pub subscription_name: String,
}

/// 日付（YYYY-MM-DD）ごとのマーク一覧
pub type CalendarMarkings = BTreeMap<String, Vec<CalendarMarking>>;

/// 選択された日の利用内容
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayUsage {
    /// 保存形式の日付（YYYY-MM-DD）
    pub date: String,
    /// 表示用の日付（DD/MM/YYYY）
    pub date_label: String,
    pub markings: Vec<CalendarMarking>,
}
