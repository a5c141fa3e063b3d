use crate::features::colors::repository::seed_palette;
use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

/// データベース接続を開き、テーブル作成とマイグレーションを実行する
///
/// # 引数
/// * `database_path` - データベースファイルのパス
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
///
/// # 処理内容
/// 1. データベース接続の開設（ファイルが無ければ作成される）
/// 2. テーブル作成とマイグレーションの実行
pub fn initialize_database(database_path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(database_path)?;

    create_tables(&conn)?;

    log::info!("データベースを初期化しました: {database_path:?}");

    Ok(conn)
}

/// データベーステーブルを作成する
///
/// 既存のデータファイル（名前のみで利用記録を紐付ける旧スキーマ）も
/// そのまま開けるよう、不足しているカラムだけを追加する。
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    create_subscriptions_table(conn)?;
    create_usage_table(conn)?;
    migrate_usage_subscription_ids(conn)?;
    create_colors_table(conn)?;
    create_indexes(conn)?;

    Ok(())
}

/// サブスクリプションテーブルを作成する
///
/// 開始日（subscriptionDate）は DD/MM/YYYY 形式で保存する。
fn create_subscriptions_table(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS subscriptions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            cost REAL NOT NULL,
            subscriptionDate TEXT NOT NULL,
            color TEXT
        )",
        [],
    )?;

    Ok(())
}

/// 利用記録テーブルを作成する
///
/// 利用日（usage_date）は YYYY-MM-DD 形式で保存する。
fn create_usage_table(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS subscription_usage (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subscription_name TEXT NOT NULL,
            usage_date TEXT NOT NULL,
            color TEXT,
            subscription_id INTEGER
        )",
        [],
    )?;

    Ok(())
}

/// 旧スキーマの利用記録に subscription_id を追加し、名前から補完する
///
/// カラム追加時に一度だけ実行する。同名のサブスクリプションが複数ある場合は最も古いIDに紐付ける。
/// 補完できなかった記録はNULLのまま残り、以後は統計に含まれない。
fn migrate_usage_subscription_ids(conn: &Connection) -> AppResult<()> {
    if check_column_exists(conn, "subscription_usage", "subscription_id") {
        return Ok(());
    }

    log::info!("subscription_usageにsubscription_idカラムを追加します...");
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "ALTER TABLE subscription_usage ADD COLUMN subscription_id INTEGER",
        [],
    )?;

    let backfilled = tx.execute(
        "UPDATE subscription_usage
         SET subscription_id = (
             SELECT s.id FROM subscriptions s
             WHERE s.name = subscription_usage.subscription_name
             ORDER BY s.id
             LIMIT 1
         )
         WHERE subscription_id IS NULL",
        [],
    )?;

    tx.commit()?;

    log::info!("利用記録{backfilled}件のsubscription_idを補完しました");
    Ok(())
}

/// カラーテーブルを作成する
///
/// パレットの投入はテーブル新規作成時のみ行う。
/// 使い切ったパレットが再起動で復活することはない。
fn create_colors_table(conn: &Connection) -> AppResult<()> {
    let table_exists = check_table_exists(conn, "colors")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS colors (
            color TEXT PRIMARY KEY
        )",
        [],
    )?;

    if !table_exists {
        let seeded = seed_palette(conn)?;
        log::info!("カラーパレットを初期化しました: {seeded}色");
    }

    Ok(())
}

/// インデックスを作成する
fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_usage_date ON subscription_usage(usage_date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_usage_subscription_id ON subscription_usage(subscription_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_subscriptions_category ON subscriptions(category)",
        [],
    )?;

    Ok(())
}

/// テーブルが存在するかチェックする
fn check_table_exists(conn: &Connection, table_name: &str) -> AppResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        )
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(count > 0)
}

/// テーブルに指定されたカラムが存在するかチェックする
///
/// # 引数
/// * `conn` - データベース接続
/// * `table_name` - テーブル名
/// * `column_name` - カラム名
///
/// # 戻り値
/// カラムが存在する場合はtrue、存在しないかエラーの場合はfalse
fn check_column_exists(conn: &Connection, table_name: &str, column_name: &str) -> bool {
    let query = format!("PRAGMA table_info({table_name})");

    match conn.prepare(&query) {
        Ok(mut stmt) => match stmt.query_map([], |row| row.get::<_, String>(1)) {
            Ok(rows) => rows.flatten().any(|name| name == column_name),
            Err(_) => false,
        },
        Err(_) => false,
    }
}
