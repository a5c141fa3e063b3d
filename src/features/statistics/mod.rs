/// 統計機能モジュール
///
/// このモジュールは、利用状況の集計に関連する機能を提供します：
/// - 月別・全期間の利用回数と1回あたりのコスト
/// - カテゴリ別のサブスクリプション数
pub mod commands;
pub mod models;
pub mod repository;
pub mod service;

pub use commands::{get_category_summary, get_lifetime_statistics, get_monthly_statistics};
pub use models::{CategorySummary, MonthlyStatistics, SubscriptionStatistics};
pub use repository::{compute_lifetime_statistics, compute_monthly_statistics};
pub use service::{cost_per_use, count_by_category};
