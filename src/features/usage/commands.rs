use super::models::{RecordUsageDto, UsageFilter, UsageRecord};
use super::repository;
use crate::features::subscriptions::models::Subscription;
use crate::AppState;

/// 選択されたサブスクリプションを今日利用したとして記録する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `dto` - 選択されたサブスクリプション
///
/// # 戻り値
/// 作成された利用記録、または失敗時はエラーメッセージ
pub fn record_usage_today(
    state: &AppState,
    dto: RecordUsageDto,
) -> Result<Vec<UsageRecord>, String> {
    let today = state.today();

    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::record_usage(&db, &dto.subscription_ids, today)
        .map_err(|e| e.report("利用記録の追加"))
}

/// 今日まだ利用記録の無いサブスクリプションを取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 選択可能なサブスクリプション、または失敗時はエラーメッセージ
pub fn get_available_subscriptions_for_today(
    state: &AppState,
) -> Result<Vec<Subscription>, String> {
    let today = state.today();

    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::find_available_for_date(&db, today)
        .map_err(|e| e.report("選択可能なサブスクリプションの取得"))
}

/// 利用記録を取得する
pub fn get_usage(state: &AppState, filter: UsageFilter) -> Result<Vec<UsageRecord>, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::find_usage(&db, &filter).map_err(|e| e.report("利用記録の取得"))
}

/// 特定のサブスクリプションの利用記録を取得する
pub fn get_subscription_usage(
    state: &AppState,
    subscription_id: i64,
    filter: UsageFilter,
) -> Result<Vec<UsageRecord>, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::find_usage_for_subscription(&db, subscription_id, &filter)
        .map_err(|e| e.report("利用記録の取得"))
}
