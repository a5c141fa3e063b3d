use super::models::SubscriptionStatistics;
use super::service::cost_per_use;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::YearMonth;
use rusqlite::{params, Connection, Row};

/// 集計行を統計に変換する（1回あたりのコストはRust側で計算する）
fn map_row(row: &Row<'_>) -> rusqlite::Result<SubscriptionStatistics> {
    let monthly_cost: f64 = row.get(2)?;
    let usage_count: i64 = row.get(4)?;

    Ok(SubscriptionStatistics {
        subscription_id: row.get(0)?,
        subscription_name: row.get(1)?,
        monthly_cost,
        usage_count,
        cost_per_use: cost_per_use(monthly_cost, usage_count),
        color: row.get(3)?,
    })
}

/// 指定月の利用回数と1回あたりのコストを集計する
///
/// その月に1回以上利用されたサブスクリプションのみを返す。
/// 集計はサブスクリプションIDごとに行うため、同名のサブスクリプションは別の行になる。
///
/// # 引数
/// * `conn` - データベース接続
/// * `month` - 対象年月
///
/// # 戻り値
/// 名前順（同名はID順）の統計、または失敗時はエラー
pub fn compute_monthly_statistics(
    conn: &Connection,
    month: YearMonth,
) -> AppResult<Vec<SubscriptionStatistics>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.name, s.cost, s.color, COUNT(u.id) AS usage_count
         FROM subscriptions s
         INNER JOIN subscription_usage u ON u.subscription_id = s.id
         WHERE u.usage_date LIKE ?1
         GROUP BY s.id
         ORDER BY s.name, s.id",
    )?;

    let pattern = format!("{}%", month.usage_prefix());
    let statistics = stmt
        .query_map(params![pattern], map_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Database(e.to_string()))?;

    log::debug!("{month} の統計を集計しました: {}件", statistics.len());
    Ok(statistics)
}

/// 全期間の利用回数を集計する
///
/// 利用記録の無いサブスクリプションも含め、その場合の1回あたりのコストはNone。
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 名前順（同名はID順）の統計、または失敗時はエラー
pub fn compute_lifetime_statistics(conn: &Connection) -> AppResult<Vec<SubscriptionStatistics>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.name, s.cost, s.color, COUNT(u.id) AS usage_count
         FROM subscriptions s
         LEFT JOIN subscription_usage u ON u.subscription_id = s.id
         GROUP BY s.id
         ORDER BY s.name, s.id",
    )?;

    let statistics = stmt
        .query_map([], map_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::subscriptions::models::CreateSubscriptionDto;
    use crate::features::subscriptions::repository as subscriptions;
    use crate::features::usage::repository as usage;
    use crate::shared::database::create_tables;
    use chrono::NaiveDate;

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create(conn: &Connection, name: &str, cost: f64) -> i64 {
        let dto = CreateSubscriptionDto {
            name: name.to_string(),
            category: "Streaming".to_string(),
            monthly_cost: cost,
            start_date: date(2024, 1, 1),
            color: None,
        };
        subscriptions::create(conn, dto, date(2024, 12, 31)).unwrap().id
    }

    fn june() -> YearMonth {
        YearMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_monthly_statistics_scenario() {
        let conn = create_test_db();
        let netflix = create(&conn, "Netflix", 15.0);
        let spotify = create(&conn, "Spotify", 10.0);
        for day in [1, 8, 15] {
            usage::record_usage(&conn, &[netflix], date(2024, 6, day)).unwrap();
        }
        usage::record_usage(&conn, &[spotify], date(2024, 7, 1)).unwrap();

        let statistics = compute_monthly_statistics(&conn, june()).unwrap();

        assert_eq!(statistics.len(), 1);
        let row = &statistics[0];
        assert_eq!(row.subscription_id, netflix);
        assert_eq!(row.subscription_name, "Netflix");
        assert_eq!(row.monthly_cost, 15.0);
        assert_eq!(row.usage_count, 3);
        assert_eq!(row.cost_per_use, Some(5.0));
        assert_eq!(row.color.as_deref(), Some("#FF5733"));
    }

    #[test]
    fn test_monthly_statistics_groups_by_id() {
        let conn = create_test_db();
        let first = create(&conn, "Prime", 8.0);
        let second = create(&conn, "Prime", 12.0);
        usage::record_usage(&conn, &[first, second], date(2024, 6, 3)).unwrap();
        usage::record_usage(&conn, &[second], date(2024, 6, 4)).unwrap();

        let statistics = compute_monthly_statistics(&conn, june()).unwrap();

        assert_eq!(statistics.len(), 2);
        assert_eq!(statistics[0].subscription_id, first);
        assert_eq!(statistics[0].usage_count, 1);
        assert_eq!(statistics[1].subscription_id, second);
        assert_eq!(statistics[1].usage_count, 2);
        assert_eq!(statistics[1].cost_per_use, Some(6.0));
    }

    #[test]
    fn test_monthly_statistics_is_ordered_by_name() {
        let conn = create_test_db();
        let zulu = create(&conn, "Zulu", 1.0);
        let alpha = create(&conn, "Alpha", 1.0);
        usage::record_usage(&conn, &[zulu, alpha], date(2024, 6, 10)).unwrap();

        let names: Vec<String> = compute_monthly_statistics(&conn, june())
            .unwrap()
            .into_iter()
            .map(|s| s.subscription_name)
            .collect();

        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn test_monthly_statistics_empty_month() {
        let conn = create_test_db();
        create(&conn, "Netflix", 15.0);

        assert!(compute_monthly_statistics(&conn, june()).unwrap().is_empty());
    }

    #[test]
    fn test_deleted_subscription_is_excluded() {
        let conn = create_test_db();
        let netflix = create(&conn, "Netflix", 15.0);
        usage::record_usage(&conn, &[netflix], date(2024, 6, 1)).unwrap();

        subscriptions::delete(&conn, netflix).unwrap();

        assert!(compute_monthly_statistics(&conn, june()).unwrap().is_empty());
        assert!(compute_lifetime_statistics(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_lifetime_statistics_includes_unused() {
        let conn = create_test_db();
        let netflix = create(&conn, "Netflix", 15.0);
        create(&conn, "Spotify", 10.0);
        usage::record_usage(&conn, &[netflix], date(2024, 5, 31)).unwrap();
        usage::record_usage(&conn, &[netflix], date(2024, 6, 1)).unwrap();

        let statistics = compute_lifetime_statistics(&conn).unwrap();

        assert_eq!(statistics.len(), 2);
        assert_eq!(statistics[0].usage_count, 2);
        assert_eq!(statistics[0].cost_per_use, Some(7.5));
        assert_eq!(statistics[1].subscription_name, "Spotify");
        assert_eq!(statistics[1].usage_count, 0);
        assert_eq!(statistics[1].cost_per_use, None);
    }
}
