use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{
    format_display_date, validate_color_hex, validate_monthly_cost, validate_required_field,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// サブスクリプションデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub monthly_cost: f64,
    pub start_date: NaiveDate,
    /// 旧データでは未設定の場合がある
    pub color: Option<String>,
}

impl Subscription {
    /// 開始日の表示用文字列（DD/MM/YYYY）
    pub fn start_date_label(&self) -> String {
        format_display_date(self.start_date)
    }
}

/// サブスクリプション作成用DTO
#[derive(Debug, Deserialize, Clone)]
pub struct CreateSubscriptionDto {
    pub name: String,
    pub category: String,
    pub monthly_cost: f64,
    pub start_date: NaiveDate,
    /// 未指定の場合はプールの先頭の色を使う
    pub color: Option<String>,
}

impl CreateSubscriptionDto {
    /// 入力値を検証する
    ///
    /// # 引数
    /// * `today` - 今日の日付（開始日が未来でないことの判定に使う）
    ///
    /// # 戻り値
    /// 有効な場合はOk(())、無効な場合はバリデーションエラー
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        validate_required_field(&self.name, "名前")?;
        validate_required_field(&self.category, "カテゴリ")?;
        validate_monthly_cost(self.monthly_cost)?;

        if self.start_date > today {
            return Err(AppError::validation(
                "開始日に未来の日付は指定できません",
            ));
        }

        if let Some(color) = &self.color {
            validate_color_hex(color)?;
        }

        Ok(())
    }
}

/// サブスクリプション一覧の絞り込み条件
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubscriptionFilter {
    /// すべて
    #[default]
    All,
    /// カテゴリ完全一致
    Category(String),
}

impl SubscriptionFilter {
    /// UIから渡される任意のカテゴリ名から絞り込み条件を作る
    pub fn from_category(category: Option<String>) -> Self {
        match category {
            Some(category) => SubscriptionFilter::Category(category),
            None => SubscriptionFilter::All,
        }
    }
}
