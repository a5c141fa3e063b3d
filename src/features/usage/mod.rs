/// 利用記録機能モジュール
///
/// サブスクリプションを「今日使った」ことを記録し、日付・年月・
/// サブスクリプションごとに利用記録を取得する機能を提供します。
pub mod commands;
pub mod models;
pub mod repository;

// 公開インターフェース
pub use commands::{
    get_available_subscriptions_for_today, get_subscription_usage, get_usage, record_usage_today,
};

pub use models::{RecordUsageDto, UsageFilter, UsageRecord};

pub use repository::{
    find_available_for_date, find_usage, find_usage_for_subscription, insert, is_used_on,
    record_usage,
};
