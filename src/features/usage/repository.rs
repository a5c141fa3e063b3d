use super::models::{UsageFilter, UsageRecord};
use crate::features::subscriptions::models::{Subscription, SubscriptionFilter};
use crate::features::subscriptions::repository as subscriptions;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{format_usage_date, parse_usage_date};
use chrono::NaiveDate;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashSet;

const SELECT_COLUMNS: &str =
    "SELECT id, subscription_id, subscription_name, usage_date, color FROM subscription_usage";

/// 行を利用記録に変換する
fn map_row(row: &Row<'_>) -> rusqlite::Result<UsageRecord> {
    let raw_date: String = row.get(3)?;
    let usage_date = parse_usage_date(&raw_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(UsageRecord {
        id: row.get(0)?,
        subscription_id: row.get(1)?,
        subscription_name: row.get(2)?,
        usage_date,
        color: row.get(4)?,
    })
}

/// 条件に一致する利用記録を挿入順で取得する
fn query_usage(
    conn: &Connection,
    conditions: Vec<&'static str>,
    values: Vec<Value>,
) -> AppResult<Vec<UsageRecord>> {
    let mut sql = SELECT_COLUMNS.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let records = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    records
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Database(e.to_string()))
}

/// 利用記録を1件挿入する
///
/// 名前と色はサブスクリプションの現在の値をコピーする。
///
/// # 引数
/// * `conn` - データベース接続
/// * `subscription` - 利用したサブスクリプション
/// * `date` - 利用日
///
/// # 戻り値
/// 作成された利用記録、または失敗時はエラー
pub fn insert(
    conn: &Connection,
    subscription: &Subscription,
    date: NaiveDate,
) -> AppResult<UsageRecord> {
    conn.execute(
        "INSERT INTO subscription_usage (subscription_id, subscription_name, usage_date, color)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            subscription.id,
            subscription.name,
            format_usage_date(date),
            subscription.color
        ],
    )?;

    Ok(UsageRecord {
        id: conn.last_insert_rowid(),
        subscription_id: Some(subscription.id),
        subscription_name: subscription.name.clone(),
        usage_date: date,
        color: subscription.color.clone(),
    })
}

/// 選択されたサブスクリプションの利用を記録する
///
/// すべての記録を1つのトランザクションで挿入する。
/// 選択内の重複IDは1件として扱う。
///
/// # 引数
/// * `conn` - データベース接続
/// * `subscription_ids` - 利用したサブスクリプションのID
/// * `date` - 利用日
///
/// # 戻り値
/// 作成された利用記録、または失敗時はエラー
///
/// # エラー
/// - 選択が空の場合はバリデーションエラー
/// - 存在しないIDが含まれる場合はNotFound
/// - 同じ日に既に記録済みのサブスクリプションが含まれる場合はバリデーションエラー
pub fn record_usage(
    conn: &Connection,
    subscription_ids: &[i64],
    date: NaiveDate,
) -> AppResult<Vec<UsageRecord>> {
    if subscription_ids.is_empty() {
        return Err(AppError::validation(
            "サブスクリプションを1つ以上選択してください",
        ));
    }

    let tx = conn.unchecked_transaction()?;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(subscription_ids.len());

    for &id in subscription_ids {
        if !seen.insert(id) {
            continue;
        }

        let subscription = subscriptions::find_by_id(&tx, id)?;

        if is_used_on(&tx, id, date)? {
            return Err(AppError::validation(format!(
                "{}は{}に既に記録されています",
                subscription.name,
                format_usage_date(date)
            )));
        }

        records.push(insert(&tx, &subscription, date)?);
    }

    tx.commit()?;

    log::info!(
        "利用を記録しました: {}件, date={}",
        records.len(),
        format_usage_date(date)
    );
    Ok(records)
}

/// 利用記録を取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `filter` - 日付による絞り込み条件
///
/// # 戻り値
/// 挿入順の利用記録、または失敗時はエラー
pub fn find_usage(conn: &Connection, filter: &UsageFilter) -> AppResult<Vec<UsageRecord>> {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some((condition, value)) = filter.sql_condition() {
        conditions.push(condition);
        values.push(Value::Text(value));
    }

    query_usage(conn, conditions, values)
}

/// 特定のサブスクリプションの利用記録を取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `subscription_id` - サブスクリプションID
/// * `filter` - 日付による絞り込み条件
///
/// # 戻り値
/// 挿入順の利用記録、または失敗時はエラー
pub fn find_usage_for_subscription(
    conn: &Connection,
    subscription_id: i64,
    filter: &UsageFilter,
) -> AppResult<Vec<UsageRecord>> {
    let mut conditions = vec!["subscription_id = ?"];
    let mut values = vec![Value::Integer(subscription_id)];

    if let Some((condition, value)) = filter.sql_condition() {
        conditions.push(condition);
        values.push(Value::Text(value));
    }

    query_usage(conn, conditions, values)
}

/// サブスクリプションが指定日に利用済みかどうか
pub fn is_used_on(conn: &Connection, subscription_id: i64, date: NaiveDate) -> AppResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM subscription_usage WHERE subscription_id = ?1 AND usage_date = ?2",
        params![subscription_id, format_usage_date(date)],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

/// 指定日にまだ利用記録の無いサブスクリプションを取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `date` - 対象日
///
/// # 戻り値
/// 選択可能なサブスクリプション、または失敗時はエラー
pub fn find_available_for_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<Subscription>> {
    let used: HashSet<i64> = find_usage(conn, &UsageFilter::Date(date))?
        .into_iter()
        .filter_map(|record| record.subscription_id)
        .collect();

    let available = subscriptions::find_all(conn, &SubscriptionFilter::All)?
        .into_iter()
        .filter(|sub| !used.contains(&sub.id))
        .collect();

    Ok(available)
}
