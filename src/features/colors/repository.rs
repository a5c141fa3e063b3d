use super::models::DEFAULT_PALETTE;
use crate::shared::errors::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension};

/// パレットをカラーテーブルに投入する
///
/// 既存のサブスクリプションに割り当て済みの色は投入しない。
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 投入した色の数、または失敗時はエラー
pub fn seed_palette(conn: &Connection) -> AppResult<usize> {
    let mut seeded = 0;

    for color in DEFAULT_PALETTE {
        seeded += conn.execute(
            "INSERT OR IGNORE INTO colors (color)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM subscriptions WHERE color = ?1)",
            params![color],
        )?;
    }

    Ok(seeded)
}

/// 割り当て可能な色を挿入順で取得する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 色のリスト（空の場合もある）、または失敗時はエラー
pub fn list_available(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT color FROM colors ORDER BY rowid")?;
    let colors = stmt.query_map([], |row| row.get::<_, String>(0))?;

    colors
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Database(e.to_string()))
}

/// 割り当て可能な色の数を取得する
pub fn count_available(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM colors", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// 最初に割り当て可能な色を取得する
pub fn first_available(conn: &Connection) -> AppResult<Option<String>> {
    conn.query_row(
        "SELECT color FROM colors ORDER BY rowid LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| AppError::Database(e.to_string()))
}

/// 色をプールから取り除く
///
/// サブスクリプション作成のトランザクション内で呼び出すこと。
///
/// # 引数
/// * `conn` - データベース接続
/// * `color` - 取り除く色
///
/// # 戻り値
/// 成功時はOk(())、色がプールに無い場合はNotFound
pub fn consume(conn: &Connection, color: &str) -> AppResult<()> {
    let rows_affected = conn.execute("DELETE FROM colors WHERE color = ?1", params![color])?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(format!(
            "色 {color} は既に使用されているか存在しません"
        )));
    }

    log::debug!("カラープールから色を取り除きました: {color}");
    Ok(())
}
