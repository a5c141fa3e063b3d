use super::models::{CategorySummary, MonthlyStatistics, SubscriptionStatistics};
use super::{repository, service};
use crate::features::subscriptions::models::SubscriptionFilter;
use crate::features::subscriptions::repository as subscriptions;
use crate::shared::utils::YearMonth;
use crate::AppState;

/// 月別の利用統計を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `month` - 対象年月（YYYY-MM形式）。未指定の場合は今月
///
/// # 戻り値
/// 月別統計、または失敗時はエラーメッセージ
pub fn get_monthly_statistics(
    state: &AppState,
    month: Option<String>,
) -> Result<MonthlyStatistics, String> {
    let month = match month {
        Some(value) => value
            .parse::<YearMonth>()
            .map_err(|e| e.report("年月の解析"))?,
        None => YearMonth::current(state.config.timezone),
    };

    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    let statistics = repository::compute_monthly_statistics(&db, month)
        .map_err(|e| e.report("月別統計の集計"))?;

    Ok(MonthlyStatistics {
        month,
        label: month.label(),
        statistics,
    })
}

/// 全期間の利用統計を取得する
pub fn get_lifetime_statistics(state: &AppState) -> Result<Vec<SubscriptionStatistics>, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::compute_lifetime_statistics(&db).map_err(|e| e.report("全期間統計の集計"))
}

/// カテゴリ別のサブスクリプション数を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// カテゴリ別件数、または失敗時はエラーメッセージ
pub fn get_category_summary(state: &AppState) -> Result<CategorySummary, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    let all = subscriptions::find_all(&db, &SubscriptionFilter::All)
        .map_err(|e| e.report("サブスクリプション一覧の取得"))?;

    Ok(CategorySummary {
        counts: service::count_by_category(&all),
        total: all.len(),
    })
}
