use crate::shared::utils::{format_cost, YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// サブスクリプションごとの利用統計
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubscriptionStatistics {
    pub subscription_id: i64,
    pub subscription_name: String,
    pub monthly_cost: f64,
    pub usage_count: i64,
    /// 1回あたりのコスト（利用回数が0の場合はNone）
    pub cost_per_use: Option<f64>,
    pub color: Option<String>,
}

impl SubscriptionStatistics {
    /// 月額料金の表示用文字列（小数点以下2桁）
    pub fn monthly_cost_label(&self) -> String {
        format_cost(self.monthly_cost)
    }

    /// 1回あたりのコストの表示用文字列（利用が無い場合は "N/A"）
    pub fn cost_per_use_label(&self) -> String {
        self.cost_per_use
            .map(format_cost)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// 月別統計のレスポンス
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthlyStatistics {
    pub month: YearMonth,
    /// 表示用ラベル（MM/YYYY）
    pub label: String,
    pub statistics: Vec<SubscriptionStatistics>,
}

/// カテゴリ別件数の集計結果
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategorySummary {
    /// カテゴリ名の昇順
    pub counts: BTreeMap<String, usize>,
    /// サブスクリプションの総数
    pub total: usize,
}
