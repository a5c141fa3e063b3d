use super::models::{CreateSubscriptionDto, Subscription, SubscriptionFilter};
use super::repository;
use crate::AppState;

/// サブスクリプションを作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `dto` - サブスクリプション作成用DTO
///
/// # 戻り値
/// 作成されたサブスクリプション、または失敗時はエラーメッセージ
pub fn create_subscription(
    state: &AppState,
    dto: CreateSubscriptionDto,
) -> Result<Subscription, String> {
    let today = state.today();

    // データベース接続を取得
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::create(&db, dto, today).map_err(|e| e.report("サブスクリプションの作成"))
}

/// サブスクリプション一覧を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `category` - 指定された場合はそのカテゴリのみ（完全一致）
///
/// # 戻り値
/// サブスクリプションのリスト、または失敗時はエラーメッセージ
pub fn get_subscriptions(
    state: &AppState,
    category: Option<String>,
) -> Result<Vec<Subscription>, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    let filter = SubscriptionFilter::from_category(category);
    repository::find_all(&db, &filter).map_err(|e| e.report("サブスクリプション一覧の取得"))
}

/// サブスクリプションを1件取得する
pub fn get_subscription(state: &AppState, id: i64) -> Result<Subscription, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::find_by_id(&db, id).map_err(|e| e.report("サブスクリプションの取得"))
}

/// サブスクリプションを削除する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `id` - サブスクリプションID
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラーメッセージ
pub fn delete_subscription(state: &AppState, id: i64) -> Result<(), String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::delete(&db, id).map_err(|e| e.report("サブスクリプションの削除"))
}

/// 全サブスクリプションの月額合計を取得する
pub fn get_monthly_subscription_total(state: &AppState) -> Result<f64, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    repository::calculate_monthly_total(&db).map_err(|e| e.report("月額合計の計算"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use chrono::NaiveDate;

    fn dto(name: &str, category: &str) -> CreateSubscriptionDto {
        CreateSubscriptionDto {
            name: name.to_string(),
            category: category.to_string(),
            monthly_cost: 9.99,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            color: None,
        }
    }

    #[test]
    fn test_subscription_commands() {
        let state = test_state();

        let created = create_subscription(&state, dto("Netflix", "Streaming")).unwrap();
        create_subscription(&state, dto("Spotify", "Music")).unwrap();

        let all = get_subscriptions(&state, None).unwrap();
        assert_eq!(all.len(), 2);

        let streaming = get_subscriptions(&state, Some("Streaming".to_string())).unwrap();
        assert_eq!(streaming.len(), 1);
        assert_eq!(streaming[0].id, created.id);

        assert_eq!(get_subscription(&state, created.id).unwrap().name, "Netflix");
        assert!((get_monthly_subscription_total(&state).unwrap() - 19.98).abs() < 1e-9);

        delete_subscription(&state, created.id).unwrap();
        assert!(get_subscription(&state, created.id).is_err());
    }

    #[test]
    fn test_create_subscription_reports_validation_message() {
        let state = test_state();

        let error = create_subscription(&state, dto("", "Streaming")).unwrap_err();

        assert_eq!(error, "名前は必須項目です");
    }

    #[test]
    fn test_create_subscription_rejects_future_start_date() {
        let state = test_state();
        let mut request = dto("Netflix", "Streaming");
        request.start_date = state.today().succ_opt().unwrap();

        let error = create_subscription(&state, request).unwrap_err();

        assert_eq!(error, "開始日に未来の日付は指定できません");
    }
}
