use super::models::{CreateSubscriptionDto, Subscription, SubscriptionFilter};
use crate::features::colors::repository as colors;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{format_display_date, normalize_string, parse_display_date};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

const SELECT_COLUMNS: &str = "SELECT id, name, category, cost, subscriptionDate, color FROM subscriptions";

/// 行をサブスクリプションに変換する
fn map_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let raw_date: String = row.get(4)?;
    let start_date = parse_display_date(&raw_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Subscription {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        monthly_cost: row.get(3)?,
        start_date,
        color: row.get(5)?,
    })
}

/// サブスクリプションを作成する
///
/// 色の消費と行の挿入を1つのトランザクションで行う。
/// どちらかが失敗した場合は両方とも取り消される。
///
/// # 引数
/// * `conn` - データベース接続
/// * `dto` - サブスクリプション作成用DTO
/// * `today` - 今日の日付
///
/// # 戻り値
/// 作成されたサブスクリプション、または失敗時はエラー
pub fn create(
    conn: &Connection,
    dto: CreateSubscriptionDto,
    today: NaiveDate,
) -> AppResult<Subscription> {
    dto.validate(today)?;

    let tx = conn.unchecked_transaction()?;

    if colors::count_available(&tx)? == 0 {
        return Err(AppError::color_unavailable(
            "カラーパレットの24色はすべて使用済みです",
        ));
    }

    let color = match dto.color {
        Some(color) => color,
        None => colors::first_available(&tx)?
            .ok_or_else(|| AppError::color_unavailable("割り当て可能な色がありません"))?,
    };

    colors::consume(&tx, &color)?;

    tx.execute(
        "INSERT INTO subscriptions (name, category, cost, subscriptionDate, color)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            normalize_string(&dto.name),
            normalize_string(&dto.category),
            dto.monthly_cost,
            format_display_date(dto.start_date),
            color
        ],
    )?;

    let id = tx.last_insert_rowid();
    tx.commit()?;

    log::info!("サブスクリプションを作成しました: id={id}, color={color}");
    find_by_id(conn, id)
}

/// IDでサブスクリプションを取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - サブスクリプションID
///
/// # 戻り値
/// サブスクリプション、または失敗時はエラー
pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Subscription> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        map_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => {
            AppError::not_found(format!("ID {id} のサブスクリプション"))
        }
        _ => AppError::Database(e.to_string()),
    })
}

/// サブスクリプション一覧を取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `filter` - 絞り込み条件
///
/// # 戻り値
/// 名前順（同名はID順）のサブスクリプションのリスト、または失敗時はエラー
pub fn find_all(conn: &Connection, filter: &SubscriptionFilter) -> AppResult<Vec<Subscription>> {
    let subscriptions = match filter {
        SubscriptionFilter::All => {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY name, id"))?;
            let rows = stmt.query_map([], map_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
        SubscriptionFilter::Category(category) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE category = ?1 ORDER BY name, id"
            ))?;
            let rows = stmt.query_map(params![category], map_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
    };

    subscriptions.map_err(|e| AppError::Database(e.to_string()))
}

/// サブスクリプションを削除する
///
/// 割り当て済みの色はプールに戻さない。利用記録は孤立したまま残る。
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - サブスクリプションID
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let rows_affected = conn.execute("DELETE FROM subscriptions WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(AppError::not_found(format!("ID {id} のサブスクリプション")));
    }

    log::info!("サブスクリプションを削除しました: id={id}");
    Ok(())
}

/// 全サブスクリプションの月額合計を計算する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 月額合計金額、または失敗時はエラー
pub fn calculate_monthly_total(conn: &Connection) -> AppResult<f64> {
    let subscriptions = find_all(conn, &SubscriptionFilter::All)?;

    Ok(subscriptions.iter().map(|sub| sub.monthly_cost).sum())
}
