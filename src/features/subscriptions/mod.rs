/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連するすべての機能を提供します：
/// - サブスクリプションの作成（色の割り当てを含む）、取得、削除
/// - カテゴリによる絞り込み
/// - 月額合計の計算
pub mod commands;
pub mod models;
pub mod repository;

// 公開インターフェース
pub use commands::{
    create_subscription, delete_subscription, get_monthly_subscription_total, get_subscription,
    get_subscriptions,
};

pub use models::{CreateSubscriptionDto, Subscription, SubscriptionFilter};

pub use repository::{calculate_monthly_total, create, delete, find_all, find_by_id};
